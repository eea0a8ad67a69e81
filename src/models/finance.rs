// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_amount;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,  // Entrada
    Expense, // Saída
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCategory {
    pub id: Uuid,

    #[schema(example = "Mensalidades")]
    pub name: String,

    #[schema(example = "🥋")]
    pub emoji: String,

    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTransaction {
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub date: NaiveDate,

    #[schema(example = "Plano Trimestral - João da Silva")]
    pub description: String,

    #[schema(example = "510.00")]
    pub amount: Decimal,

    pub kind: TransactionKind,

    pub category_id: Option<Uuid>,

    // Aluno relacionado (plano ou compra na loja)
    pub user_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "O nome da categoria é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub emoji: String,

    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    pub kind: TransactionKind,

    pub category_id: Option<Uuid>,
}
