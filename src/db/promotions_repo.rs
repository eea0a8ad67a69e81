// src/db/promotions_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::promotions::PromotionPlan,
};

impl Record for PromotionPlan {
    const TABLE: &'static str = "promotions";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for PromotionPlan {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "price",
        "total",
        "features",
        "best_value",
        "duration_months",
    ];
    const ORDER_BY: &'static str = "price ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(self.price)
            .bind(self.total)
            .bind(&self.features)
            .bind(self.best_value)
            .bind(self.duration_months)
    }
}
