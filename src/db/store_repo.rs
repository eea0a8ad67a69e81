// src/db/store_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::store::Product,
};

impl Record for Product {
    const TABLE: &'static str = "products";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for Product {
    const COLUMNS: &'static [&'static str] = &["id", "name", "price", "image", "category"];
    const ORDER_BY: &'static str = "category ASC, name ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(self.price)
            .bind(&self.image)
            .bind(&self.category)
    }
}
