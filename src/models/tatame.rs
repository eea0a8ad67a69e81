// src/models/tatame.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_time_slots;

/// Área de tatame com horários reserváveis, na ordem de exibição.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TatameArea {
    pub id: Uuid,

    #[schema(example = "Tatame Principal")]
    pub name: String,

    #[schema(example = json!(["07:00 - 08:00", "12:00 - 13:00"]))]
    pub time_slots: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TatameAreaPayload {
    #[validate(length(min = 1, message = "O nome da área é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_time_slots"))]
    #[schema(example = json!(["07:00 - 08:00", "12:00 - 13:00"]))]
    pub time_slots: Vec<String>,
}

impl TatameArea {
    pub fn from_payload(id: Uuid, payload: TatameAreaPayload) -> Self {
        Self {
            id,
            name: payload.name,
            time_slots: payload
                .time_slots
                .into_iter()
                .map(|slot| slot.trim().to_string())
                .collect(),
        }
    }
}

// Negar e cancelar apagam o registro; não existe um terceiro status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,

    pub area_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-18")]
    pub date: NaiveDate,

    #[schema(example = "07:00 - 08:00")]
    pub time_slot: String,

    /// Chave derivada (área, data, horário), única no armazenamento.
    pub slot_key: String,

    pub user_id: Uuid,

    #[schema(example = "João da Silva")]
    pub user_name: String,

    pub status: BookingStatus,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub area_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-18")]
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "Escolha um horário."))]
    #[schema(example = "07:00 - 08:00")]
    pub time_slot: String,
}
