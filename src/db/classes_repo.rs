// src/db/classes_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::classes::ClassSession,
};

impl Record for ClassSession {
    const TABLE: &'static str = "classes";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for ClassSession {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "day_of_week",
        "start_time",
        "end_time",
        "instructor",
        "level",
    ];
    const ORDER_BY: &'static str = "day_of_week ASC, start_time ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(self.day_of_week)
            .bind(self.start_time)
            .bind(self.end_time)
            .bind(&self.instructor)
            .bind(&self.level)
    }
}
