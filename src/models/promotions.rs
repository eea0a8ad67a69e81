// src/models/promotions.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_price;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPlan {
    pub id: Uuid,

    #[schema(example = "Plano Trimestral")]
    pub name: String,

    /// Valor mensal exibido.
    #[schema(example = "180.00")]
    pub price: Decimal,

    /// Valor fechado dos planos de prazo fixo.
    #[schema(example = "510.00")]
    pub total: Option<Decimal>,

    #[schema(example = json!(["Aulas ilimitadas", "1 kimono"]))]
    pub features: Vec<String>,

    pub best_value: bool,

    /// Quando ausente, a duração é deduzida do nome do plano.
    #[schema(example = 3)]
    pub duration_months: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPayload {
    #[validate(length(min = 1, message = "O nome do plano é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_price"))]
    pub total: Option<Decimal>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub best_value: bool,

    #[validate(range(min = 1, max = 60, message = "Duração entre 1 e 60 meses."))]
    pub duration_months: Option<i32>,
}

impl PromotionPlan {
    pub fn from_payload(id: Uuid, payload: PromotionPayload) -> Self {
        Self {
            id,
            name: payload.name,
            price: payload.price,
            total: payload.total,
            features: payload.features,
            best_value: payload.best_value,
            duration_months: payload.duration_months,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribePayload {
    /// Aluno que está pagando; ausente = o próprio usuário.
    pub user_id: Option<Uuid>,
}
