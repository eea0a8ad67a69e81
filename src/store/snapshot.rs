// src/store/snapshot.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Record, Tables},
    models::{
        announcements::Announcement,
        classes::ClassSession,
        finance::{FinancialTransaction, TransactionCategory},
        promotions::PromotionPlan,
        settings::SiteSettings,
        store::Product,
        tatame::{Booking, TatameArea},
        user::{User, UserView},
    },
    services::cart::Cart,
};

/// Cópia local de todas as tabelas. Só muda depois que a escrita remota
/// deu certo.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub classes: Vec<ClassSession>,
    pub announcements: Vec<Announcement>,
    pub products: Vec<Product>,
    pub tatame_areas: Vec<TatameArea>,
    pub bookings: Vec<Booking>,
    pub promotions: Vec<PromotionPlan>,
    pub settings: SiteSettings,
    pub categories: Vec<TransactionCategory>,
    pub transactions: Vec<FinancialTransaction>,
}

/// Entidade que vive numa coleção do snapshot.
pub trait Collection: Record {
    fn items(snapshot: &Snapshot) -> &[Self];
    fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;

    // Ordem de exibição, reaplicada a cada inserção.
    fn arrange(_items: &mut [Self]) {}
}

macro_rules! collection {
    ($ty:ty, $field:ident) => {
        impl Collection for $ty {
            fn items(snapshot: &Snapshot) -> &[Self] {
                &snapshot.$field
            }

            fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
                &mut snapshot.$field
            }
        }
    };
}

collection!(User, users);
collection!(ClassSession, classes);
collection!(Product, products);
collection!(TatameArea, tatame_areas);
collection!(Booking, bookings);
collection!(PromotionPlan, promotions);
collection!(TransactionCategory, categories);
collection!(FinancialTransaction, transactions);

impl Collection for Announcement {
    fn items(snapshot: &Snapshot) -> &[Self] {
        &snapshot.announcements
    }

    fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.announcements
    }

    // Mais recentes primeiro
    fn arrange(items: &mut [Self]) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

impl Snapshot {
    /// Recarga completa: busca todas as tabelas de novo.
    pub async fn load(tables: &Tables) -> Result<Self, AppError> {
        let mut announcements = tables.announcements.select_all().await?;
        Announcement::arrange(&mut announcements);

        let settings = tables
            .settings
            .select_all()
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(Self {
            users: tables.users.select_all().await?,
            classes: tables.classes.select_all().await?,
            announcements,
            products: tables.products.select_all().await?,
            tatame_areas: tables.tatame_areas.select_all().await?,
            bookings: tables.bookings.select_all().await?,
            promotions: tables.promotions.select_all().await?,
            settings,
            categories: tables.categories.select_all().await?,
            transactions: tables.transactions.select_all().await?,
        })
    }

    pub fn find<T: Collection>(&self, id: Uuid) -> Option<&T> {
        T::items(self).iter().find(|row| row.id() == id)
    }

    /// Busca ou `ResourceNotFound` com o nome da tabela.
    pub fn get<T: Collection>(&self, id: Uuid) -> Result<&T, AppError> {
        self.find(id)
            .ok_or_else(|| AppError::ResourceNotFound(T::TABLE.to_string()))
    }

    pub fn replace<T: Collection>(&mut self, row: T) {
        let items = T::items_mut(self);
        match items.iter_mut().find(|other| other.id() == row.id()) {
            Some(slot) => *slot = row,
            None => items.push(row),
        }
        T::arrange(items);
    }

    pub fn remove<T: Collection>(&mut self, id: Uuid) {
        T::items_mut(self).retain(|row| row.id() != id);
    }
}

/// Tudo o que o ator pode ver, de uma vez (GET /api/state).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub me: UserView,
    pub users: Vec<UserView>,
    pub classes: Vec<ClassSession>,
    pub announcements: Vec<Announcement>,
    pub products: Vec<Product>,
    pub tatame_areas: Vec<TatameArea>,
    pub bookings: Vec<Booking>,
    pub promotions: Vec<PromotionPlan>,
    pub settings: SiteSettings,
    pub cart: Cart,

    // Só para quem vê o financeiro
    pub categories: Option<Vec<TransactionCategory>>,
    pub transactions: Option<Vec<FinancialTransaction>>,
}
