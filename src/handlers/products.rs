// src/handlers/products.rs

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
    models::store::{Product, ProductPayload},
    store::{Command, Event},
};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Store",
    responses(
        (status = 200, description = "Produtos da loja", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let products = app_state.store.read().await.products.clone();
    (StatusCode::OK, Json(products))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Store",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Event)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreateProduct(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Store",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID do produto")),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::UpdateProduct { id, payload })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Store",
    responses(
        (status = 200, description = "Produto removido", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID do produto")),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeleteProduct { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}
