// src/db/finance_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::finance::{FinancialTransaction, TransactionCategory},
};

impl Record for TransactionCategory {
    const TABLE: &'static str = "transaction_categories";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for TransactionCategory {
    const COLUMNS: &'static [&'static str] = &["id", "name", "emoji", "kind"];
    const ORDER_BY: &'static str = "kind ASC, name ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.emoji)
            .bind(self.kind)
    }
}

impl Record for FinancialTransaction {
    const TABLE: &'static str = "financial_transactions";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for FinancialTransaction {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "date",
        "description",
        "amount",
        "kind",
        "category_id",
        "user_id",
        "created_at",
    ];
    const ORDER_BY: &'static str = "date DESC, created_at DESC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(self.date)
            .bind(&self.description)
            .bind(self.amount)
            .bind(self.kind)
            .bind(self.category_id)
            .bind(self.user_id)
            .bind(self.created_at)
    }
}
