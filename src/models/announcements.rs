// src/models/announcements.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,

    #[schema(example = "Graduação de fim de ano")]
    pub title: String,

    #[schema(example = "Dia 15/12 às 10h, traga seu kimono limpo!")]
    pub content: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,

    #[validate(length(min = 1, message = "O conteúdo é obrigatório."))]
    pub content: String,
}
