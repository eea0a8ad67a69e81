// src/db/announcements_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::announcements::Announcement,
};

impl Record for Announcement {
    const TABLE: &'static str = "announcements";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for Announcement {
    const COLUMNS: &'static [&'static str] = &["id", "title", "content", "created_at"];
    // Mais recentes primeiro
    const ORDER_BY: &'static str = "created_at DESC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.title)
            .bind(&self.content)
            .bind(self.created_at)
    }
}
