// src/db/tatame_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::tatame::{Booking, TatameArea},
};

impl Record for TatameArea {
    const TABLE: &'static str = "tatame_areas";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for TatameArea {
    const COLUMNS: &'static [&'static str] = &["id", "name", "time_slots"];
    const ORDER_BY: &'static str = "name ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query.bind(self.id).bind(&self.name).bind(&self.time_slots)
    }
}

impl Record for Booking {
    const TABLE: &'static str = "bookings";

    fn id(&self) -> Uuid {
        self.id
    }

    // Um agendamento por (área, data, horário): coluna slot_key UNIQUE.
    fn unique_key(&self) -> Option<String> {
        Some(self.slot_key.clone())
    }
}

impl PgRecord for Booking {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "area_id",
        "date",
        "time_slot",
        "slot_key",
        "user_id",
        "user_name",
        "status",
        "created_at",
    ];
    const ORDER_BY: &'static str = "date ASC, time_slot ASC";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(self.area_id)
            .bind(self.date)
            .bind(&self.time_slot)
            .bind(&self.slot_key)
            .bind(self.user_id)
            .bind(&self.user_name)
            .bind(self.status)
            .bind(self.created_at)
    }
}
