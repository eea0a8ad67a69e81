// src/db/user_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::user::User,
};

impl Record for User {
    const TABLE: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }

    // E-mail único sem diferenciar maiúsculas (índice em lower(email)).
    fn unique_key(&self) -> Option<String> {
        Some(self.email.trim().to_lowercase())
    }
}

impl PgRecord for User {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "email",
        "name",
        "role",
        "belt",
        "payment_due_date",
        "password_hash",
        "created_at",
    ];
    const ORDER_BY: &'static str = "name ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.email)
            .bind(&self.name)
            .bind(self.role)
            .bind(&self.belt)
            .bind(self.payment_due_date)
            .bind(&self.password_hash)
            .bind(self.created_at)
    }
}
