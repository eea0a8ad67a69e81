// src/models/user.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::services::payment_status::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mestre, // Instrutor / gerente
    User,   // Aluno
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "aluno@academia.com")]
    pub email: String,

    #[schema(example = "João da Silva")]
    pub name: String,

    pub role: Role,

    #[schema(example = "Faixa Azul")]
    pub belt: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-05-10")]
    pub payment_due_date: Option<NaiveDate>,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// Usuário + status de pagamento calculado (lista e detalhe).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub payment_status: PaymentStatus,
}

// Campos ausentes ficam inalterados.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub belt: Option<String>,

    pub role: Option<Role>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-05-10")]
    pub payment_due_date: Option<NaiveDate>,

    #[serde(default)]
    pub clear_payment_due_date: bool,
}
