// src/db/settings_repo.rs

use uuid::Uuid;

use crate::{
    db::{
        pg::{PgQueryAs, PgRecord},
        repository::Record,
    },
    models::settings::SiteSettings,
};

// Tabela de linha única (id = SINGLETON_ID), gravada sempre por upsert.
impl Record for SiteSettings {
    const TABLE: &'static str = "site_settings";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl PgRecord for SiteSettings {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "academy_name",
        "instagram_url",
        "facebook_url",
        "whatsapp",
        "payment_gateway",
        "pix_key",
        "pix_merchant_name",
        "pix_merchant_city",
        "gateway_public_key",
        "gateway_secret_key",
        "booking_instructions",
        "logo_image",
        "login_image",
        "store_category_id",
        "membership_category_id",
        "updated_at",
    ];
    const ORDER_BY: &'static str = "id";

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.id)
            .bind(&self.academy_name)
            .bind(&self.instagram_url)
            .bind(&self.facebook_url)
            .bind(&self.whatsapp)
            .bind(self.payment_gateway)
            .bind(&self.pix_key)
            .bind(&self.pix_merchant_name)
            .bind(&self.pix_merchant_city)
            .bind(&self.gateway_public_key)
            .bind(&self.gateway_secret_key)
            .bind(&self.booking_instructions)
            .bind(&self.logo_image)
            .bind(&self.login_image)
            .bind(self.store_category_id)
            .bind(self.membership_category_id)
            .bind(self.updated_at)
    }
}
