// src/handlers/promotions.rs

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
    models::promotions::{PromotionPayload, PromotionPlan, SubscribePayload},
    store::{Command, Event},
};

#[utoipa::path(
    get,
    path = "/api/promotions",
    tag = "Promotions",
    responses((status = 200, description = "Planos disponíveis", body = Vec<PromotionPlan>)),
    security(("api_jwt" = []))
)]
pub async fn list_promotions(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let promotions = app_state.store.read().await.promotions.clone();
    (StatusCode::OK, Json(promotions))
}

#[utoipa::path(
    post,
    path = "/api/promotions",
    tag = "Promotions",
    request_body = PromotionPayload,
    responses((status = 201, description = "Plano criado", body = Event)),
    security(("api_jwt" = []))
)]
pub async fn create_promotion(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<PromotionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreatePromotion(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    put,
    path = "/api/promotions/{id}",
    tag = "Promotions",
    request_body = PromotionPayload,
    responses((status = 200, description = "Plano atualizado", body = Event)),
    params(("id" = Uuid, Path, description = "ID do plano")),
    security(("api_jwt" = []))
)]
pub async fn update_promotion(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PromotionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::UpdatePromotion { id, payload })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/api/promotions/{id}",
    tag = "Promotions",
    responses((status = 200, description = "Plano removido", body = Event)),
    params(("id" = Uuid, Path, description = "ID do plano")),
    security(("api_jwt" = []))
)]
pub async fn delete_promotion(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeletePromotion { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

// POST /api/promotions/{id}/subscribe
// Sem corpo (ou sem userId) assina para o próprio usuário.
#[utoipa::path(
    post,
    path = "/api/promotions/{id}/subscribe",
    tag = "Promotions",
    request_body = SubscribePayload,
    responses(
        (status = 201, description = "Vencimento estendido e pagamento lançado", body = Event),
        (status = 422, description = "Categoria de mensalidades não configurada")
    ),
    params(("id" = Uuid, Path, description = "ID do plano")),
    security(("api_jwt" = []))
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(plan_id): Path<Uuid>,
    payload: Option<Json<SubscribePayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let actor = user.actor();
    let user_id = payload
        .and_then(|Json(p)| p.user_id)
        .unwrap_or(actor.id);

    let event = app_state
        .store
        .execute(&actor, Command::SubscribePlan { plan_id, user_id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}
