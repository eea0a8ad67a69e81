// src/db/tables.rs

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    db::{
        memory::MemoryTable,
        pg::PgTable,
        repository::{Table, UserTable},
    },
    models::{
        announcements::Announcement,
        classes::ClassSession,
        finance::{FinancialTransaction, TransactionCategory},
        promotions::PromotionPlan,
        settings::SiteSettings,
        store::Product,
        tatame::{Booking, TatameArea},
    },
};

/// Uma tabela por coleção do estado da academia.
#[derive(Clone)]
pub struct Tables {
    pub users: Arc<dyn UserTable>,
    pub classes: Arc<dyn Table<ClassSession>>,
    pub announcements: Arc<dyn Table<Announcement>>,
    pub products: Arc<dyn Table<Product>>,
    pub tatame_areas: Arc<dyn Table<TatameArea>>,
    pub bookings: Arc<dyn Table<Booking>>,
    pub promotions: Arc<dyn Table<PromotionPlan>>,
    pub settings: Arc<dyn Table<SiteSettings>>,
    pub categories: Arc<dyn Table<TransactionCategory>>,
    pub transactions: Arc<dyn Table<FinancialTransaction>>,
}

impl Tables {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgTable::new(pool.clone())),
            classes: Arc::new(PgTable::new(pool.clone())),
            announcements: Arc::new(PgTable::new(pool.clone())),
            products: Arc::new(PgTable::new(pool.clone())),
            tatame_areas: Arc::new(PgTable::new(pool.clone())),
            bookings: Arc::new(PgTable::new(pool.clone())),
            promotions: Arc::new(PgTable::new(pool.clone())),
            settings: Arc::new(PgTable::new(pool.clone())),
            categories: Arc::new(PgTable::new(pool.clone())),
            transactions: Arc::new(PgTable::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryTable::new()),
            classes: Arc::new(MemoryTable::new()),
            announcements: Arc::new(MemoryTable::new()),
            products: Arc::new(MemoryTable::new()),
            tatame_areas: Arc::new(MemoryTable::new()),
            bookings: Arc::new(MemoryTable::new()),
            promotions: Arc::new(MemoryTable::new()),
            settings: Arc::new(MemoryTable::new()),
            categories: Arc::new(MemoryTable::new()),
            transactions: Arc::new(MemoryTable::new()),
        }
    }
}
