// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_image_data_uri, validate_pix_key};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_gateway", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentGateway {
    #[default]
    Pix, // Manual: o aluno paga via PIX e a academia confirma
    MercadoPago,
    Stripe,
}

impl PaymentGateway {
    pub fn is_hosted(self) -> bool {
        !matches!(self, PaymentGateway::Pix)
    }
}

/// Linha única de configuração da academia.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[schema(ignore)]
    pub id: Uuid,

    #[schema(example = "Academia Gracie Barra Centro")]
    pub academy_name: String,

    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,

    #[schema(example = "+55 11 99999-8888")]
    pub whatsapp: Option<String>,

    pub payment_gateway: PaymentGateway,

    #[schema(example = "financeiro@academia.com")]
    pub pix_key: Option<String>,

    #[schema(example = "ACADEMIA CENTRO")]
    pub pix_merchant_name: Option<String>,

    #[schema(example = "SAO PAULO")]
    pub pix_merchant_city: Option<String>,

    pub gateway_public_key: Option<String>,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub gateway_secret_key: Option<String>,

    #[schema(example = "Chegue 10 minutos antes e traga sua faixa.")]
    pub booking_instructions: Option<String>,

    // data URIs
    pub logo_image: Option<String>,
    pub login_image: Option<String>,

    /// Categoria de entrada usada nas vendas da loja.
    pub store_category_id: Option<Uuid>,

    /// Categoria de entrada usada nos planos/mensalidades.
    pub membership_category_id: Option<Uuid>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl SiteSettings {
    pub const SINGLETON_ID: Uuid = Uuid::nil();
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: Self::SINGLETON_ID,
            academy_name: "Academia".to_string(),
            instagram_url: None,
            facebook_url: None,
            whatsapp: None,
            payment_gateway: PaymentGateway::Pix,
            pix_key: None,
            pix_merchant_name: None,
            pix_merchant_city: None,
            gateway_public_key: None,
            gateway_secret_key: None,
            booking_instructions: None,
            logo_image: None,
            login_image: None,
            store_category_id: None,
            membership_category_id: None,
            updated_at: None,
        }
    }
}

// Campos ausentes ficam inalterados.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, message = "O nome da academia é obrigatório."))]
    pub academy_name: Option<String>,

    #[validate(url(message = "URL inválida."))]
    pub instagram_url: Option<String>,

    #[validate(url(message = "URL inválida."))]
    pub facebook_url: Option<String>,

    pub whatsapp: Option<String>,

    pub payment_gateway: Option<PaymentGateway>,

    #[validate(
        length(min = 1, max = 77, message = "Chave PIX inválida."),
        custom(function = "validate_pix_key")
    )]
    pub pix_key: Option<String>,

    #[validate(length(min = 1, max = 25, message = "Máximo de 25 caracteres."))]
    pub pix_merchant_name: Option<String>,

    #[validate(length(min = 1, max = 15, message = "Máximo de 15 caracteres."))]
    pub pix_merchant_city: Option<String>,

    pub gateway_public_key: Option<String>,
    pub gateway_secret_key: Option<String>,

    pub booking_instructions: Option<String>,

    #[validate(custom(function = "validate_image_data_uri"))]
    pub logo_image: Option<String>,

    #[validate(custom(function = "validate_image_data_uri"))]
    pub login_image: Option<String>,

    pub store_category_id: Option<Uuid>,
    pub membership_category_id: Option<Uuid>,
}

impl SiteSettings {
    pub fn apply(mut self, input: UpdateSettingsRequest, now: DateTime<Utc>) -> Self {
        fn set<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        if let Some(name) = input.academy_name {
            self.academy_name = name;
        }
        if let Some(gateway) = input.payment_gateway {
            self.payment_gateway = gateway;
        }
        set(&mut self.instagram_url, input.instagram_url);
        set(&mut self.facebook_url, input.facebook_url);
        set(&mut self.whatsapp, input.whatsapp);
        set(&mut self.pix_key, input.pix_key);
        set(&mut self.pix_merchant_name, input.pix_merchant_name);
        set(&mut self.pix_merchant_city, input.pix_merchant_city);
        set(&mut self.gateway_public_key, input.gateway_public_key);
        set(&mut self.gateway_secret_key, input.gateway_secret_key);
        set(&mut self.booking_instructions, input.booking_instructions);
        set(&mut self.logo_image, input.logo_image);
        set(&mut self.login_image, input.login_image);
        set(&mut self.store_category_id, input.store_category_id);
        set(&mut self.membership_category_id, input.membership_category_id);

        self.id = Self::SINGLETON_ID;
        self.updated_at = Some(now);
        self
    }
}

/// Resposta de GET /api/settings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    #[serde(flatten)]
    pub settings: SiteSettings,

    pub ai_assistant_enabled: bool,
}
