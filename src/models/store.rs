// src/models/store.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_image_data_uri, validate_price};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(example = "Kimono Trançado A2")]
    pub name: String,

    #[schema(example = "349.90")]
    pub price: Decimal,

    // data URI em base64
    pub image: Option<String>,

    #[schema(example = "Vestuário")]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(example = "349.90")]
    pub price: Decimal,

    #[validate(custom(function = "validate_image_data_uri"))]
    pub image: Option<String>,

    #[serde(default)]
    pub category: String,
}

impl Product {
    pub fn from_payload(id: Uuid, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            price: payload.price,
            image: payload.image,
            category: payload.category,
        }
    }
}

/// Linha do carrinho: produto + quantidade. Vive só em memória até o checkout.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    #[schema(example = 2)]
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartQuantityPayload {
    /// Zero ou negativo remove o item; acima de 999 fica em 999.
    #[schema(example = 2)]
    pub quantity: i64,
}
