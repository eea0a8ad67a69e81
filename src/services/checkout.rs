// src/services/checkout.rs

// Checkout em duas etapas: revisão (sem escrita) e confirmação (um único
// lançamento de entrada com o total do carrinho).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        finance::{FinancialTransaction, TransactionCategory},
        settings::{PaymentGateway, SiteSettings},
        store::CartItem,
    },
    services::{
        cart::Cart,
        finance::{income_entry, resolve_category, CategoryMapping},
        pix::{qr_svg, PixCharge},
    },
};

// Identificador padrão de cobrança estática no BR Code.
const STATIC_TXID: &str = "***";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReview {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub gateway: PaymentGateway,

    /// PIX "copia e cola", presente quando o gateway é PIX e há chave cadastrada.
    pub pix_payload: Option<String>,

    /// QR Code do payload acima, em SVG.
    pub pix_qr_svg: Option<String>,
}

pub fn review(cart: &Cart, settings: &SiteSettings) -> Result<CheckoutReview, AppError> {
    let mut review = CheckoutReview {
        items: cart.items.clone(),
        total: cart.total,
        gateway: settings.payment_gateway,
        pix_payload: None,
        pix_qr_svg: None,
    };

    if settings.payment_gateway == PaymentGateway::Pix && cart.total > Decimal::ZERO {
        if let Some(key) = settings.pix_key.as_deref().filter(|k| !k.trim().is_empty()) {
            let payload = PixCharge {
                key,
                merchant_name: settings
                    .pix_merchant_name
                    .as_deref()
                    .unwrap_or(&settings.academy_name),
                merchant_city: settings.pix_merchant_city.as_deref().unwrap_or("BRASIL"),
                amount: cart.total,
                txid: STATIC_TXID,
            }
            .payload()?;

            review.pix_qr_svg = Some(qr_svg(&payload)?);
            review.pix_payload = Some(payload);
        }
    }

    Ok(review)
}

/// "Venda loja: 2x Kimono, 1x Faixa"
pub fn sale_description(cart: &Cart) -> String {
    let lines = cart
        .items
        .iter()
        .map(|item| format!("{}x {}", item.quantity, item.product.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Venda loja: {}", lines)
}

/// Valida o carrinho e monta o lançamento da venda. Não escreve nada.
pub fn sale_entry(
    cart: &Cart,
    settings: &SiteSettings,
    categories: &[TransactionCategory],
    buyer: Uuid,
    today: NaiveDate,
    stamp: DateTime<Utc>,
) -> Result<FinancialTransaction, AppError> {
    if cart.is_empty() || cart.total <= Decimal::ZERO {
        return Err(AppError::EmptyCart);
    }

    // Gateway hospedado é simulado, mas exige a chave cadastrada.
    if settings.payment_gateway.is_hosted()
        && settings
            .gateway_public_key
            .as_deref()
            .is_none_or(|k| k.trim().is_empty())
    {
        return Err(AppError::GatewayNotConfigured);
    }

    let category_id = resolve_category(
        categories,
        CategoryMapping::store(settings.store_category_id),
    )?;

    Ok(income_entry(
        sale_description(cart),
        cart.total,
        today,
        category_id,
        buyer,
        stamp,
    ))
}
