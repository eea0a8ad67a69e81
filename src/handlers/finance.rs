// src/handlers/finance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{capabilities::Capability, error::ApiError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::finance::{
        CategoryPayload, FinancialTransaction, TransactionCategory, TransactionPayload,
    },
    store::{Command, Event},
};

// --- Categorias ---

#[utoipa::path(
    get,
    path = "/api/finance/categories",
    tag = "Finance",
    responses(
        (status = 200, description = "Categorias de entrada e saída", body = Vec<TransactionCategory>),
        (status = 403, description = "Sem acesso ao financeiro")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    user.actor()
        .require(Capability::ViewFinance)
        .map_err(|e| e.to_api_error(&locale))?;

    let categories = app_state.store.read().await.categories.clone();
    Ok((StatusCode::OK, Json(categories)))
}

#[utoipa::path(
    post,
    path = "/api/finance/categories",
    tag = "Finance",
    request_body = CategoryPayload,
    responses((status = 201, description = "Categoria criada", body = Event)),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreateCategory(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/api/finance/categories/{id}",
    tag = "Finance",
    responses((status = 200, description = "Categoria removida", body = Event)),
    params(("id" = Uuid, Path, description = "ID da categoria")),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeleteCategory { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

// --- Lançamentos ---

#[utoipa::path(
    get,
    path = "/api/finance/transactions",
    tag = "Finance",
    responses(
        (status = 200, description = "Lançamentos, mais recentes primeiro", body = Vec<FinancialTransaction>),
        (status = 403, description = "Sem acesso ao financeiro")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    user.actor()
        .require(Capability::ViewFinance)
        .map_err(|e| e.to_api_error(&locale))?;

    let mut transactions = app_state.store.read().await.transactions.clone();
    transactions.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
    Ok((StatusCode::OK, Json(transactions)))
}

#[utoipa::path(
    post,
    path = "/api/finance/transactions",
    tag = "Finance",
    request_body = TransactionPayload,
    responses((status = 201, description = "Lançamento criado", body = Event)),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreateTransaction(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/api/finance/transactions/{id}",
    tag = "Finance",
    responses((status = 200, description = "Lançamento removido", body = Event)),
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    security(("api_jwt" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeleteTransaction { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}
