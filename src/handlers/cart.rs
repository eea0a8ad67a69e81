// src/handlers/cart.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::store::{AddToCartPayload, CartQuantityPayload},
    services::{cart::Cart, checkout::CheckoutReview},
    store::{Command, Event},
};

async fn run(
    app_state: &AppState,
    locale: &Locale,
    user: &AuthenticatedUser,
    command: Command,
) -> Result<Event, ApiError> {
    app_state
        .store
        .execute(&user.actor(), command)
        .await
        .map_err(|e| e.to_api_error(locale))
}

// GET /api/cart
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses((status = 200, description = "Carrinho do usuário", body = Cart)),
    security(("api_jwt" = []))
)]
pub async fn get_cart(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    let cart = app_state.store.cart(&user.actor()).await;
    (StatusCode::OK, Json(cart))
}

// POST /api/cart
#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    request_body = AddToCartPayload,
    responses((status = 200, description = "Produto adicionado", body = Event)),
    security(("api_jwt" = []))
)]
pub async fn add_to_cart(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<AddToCartPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let command = Command::AddToCart {
        product_id: payload.product_id,
    };
    let event = run(&app_state, &locale, &user, command).await?;
    Ok((StatusCode::OK, Json(event)))
}

// DELETE /api/cart
#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    responses((status = 200, description = "Carrinho esvaziado", body = Event)),
    security(("api_jwt" = []))
)]
pub async fn clear_cart(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let event = run(&app_state, &locale, &user, Command::ClearCart).await?;
    Ok((StatusCode::OK, Json(event)))
}

// PUT /api/cart/{product_id}
#[utoipa::path(
    put,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    request_body = CartQuantityPayload,
    responses((status = 200, description = "Quantidade atualizada", body = Event)),
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    security(("api_jwt" = []))
)]
pub async fn set_quantity(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<CartQuantityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let command = Command::SetCartQuantity {
        product_id,
        quantity: payload.quantity,
    };
    let event = run(&app_state, &locale, &user, command).await?;
    Ok((StatusCode::OK, Json(event)))
}

// DELETE /api/cart/{product_id}
#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    responses((status = 200, description = "Item removido", body = Event)),
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    security(("api_jwt" = []))
)]
pub async fn remove_item(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = run(&app_state, &locale, &user, Command::RemoveFromCart { product_id }).await?;
    Ok((StatusCode::OK, Json(event)))
}

// GET /api/cart/checkout
#[utoipa::path(
    get,
    path = "/api/cart/checkout",
    tag = "Cart",
    responses(
        (status = 200, description = "Revisão do pedido (PIX copia e cola quando aplicável)", body = CheckoutReview)
    ),
    security(("api_jwt" = []))
)]
pub async fn checkout_review(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let review = app_state
        .store
        .checkout_review(&user.actor())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(review)))
}

// POST /api/cart/checkout
#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    tag = "Cart",
    responses(
        (status = 201, description = "Venda registrada no financeiro", body = Event),
        (status = 400, description = "Carrinho vazio"),
        (status = 422, description = "Categoria da loja ou gateway não configurados")
    ),
    security(("api_jwt" = []))
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let event = run(&app_state, &locale, &user, Command::Checkout).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
