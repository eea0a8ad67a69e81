// src/handlers/tatame.rs

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
    models::tatame::{Booking, BookingRequest, TatameArea, TatameAreaPayload},
    store::{Command, Event},
};

// --- Áreas ---

#[utoipa::path(
    get,
    path = "/api/tatame/areas",
    tag = "Tatame",
    responses(
        (status = 200, description = "Áreas de tatame e seus horários", body = Vec<TatameArea>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_areas(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let areas = app_state.store.read().await.tatame_areas.clone();
    (StatusCode::OK, Json(areas))
}

#[utoipa::path(
    post,
    path = "/api/tatame/areas",
    tag = "Tatame",
    request_body = TatameAreaPayload,
    responses(
        (status = 201, description = "Área criada", body = Event),
        (status = 400, description = "Horário fora do formato HH:MM - HH:MM")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_area(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<TatameAreaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreateTatameArea(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    put,
    path = "/api/tatame/areas/{id}",
    tag = "Tatame",
    request_body = TatameAreaPayload,
    responses(
        (status = 200, description = "Área atualizada", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID da área")),
    security(("api_jwt" = []))
)]
pub async fn update_area(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TatameAreaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::UpdateTatameArea { id, payload })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/api/tatame/areas/{id}",
    tag = "Tatame",
    responses(
        (status = 200, description = "Área removida junto com seus agendamentos", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID da área")),
    security(("api_jwt" = []))
)]
pub async fn delete_area(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeleteTatameArea { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

// --- Agendamentos ---

// Todos veem a ocupação dos horários.
#[utoipa::path(
    get,
    path = "/api/tatame/bookings",
    tag = "Tatame",
    responses(
        (status = 200, description = "Agendamentos pendentes e confirmados", body = Vec<Booking>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let bookings = app_state.store.read().await.bookings.clone();
    (StatusCode::OK, Json(bookings))
}

#[utoipa::path(
    post,
    path = "/api/tatame/bookings",
    tag = "Tatame",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Solicitação registrada como pendente", body = Event),
        (status = 409, description = "Horário já solicitado"),
        (status = 400, description = "Horário não existe na área")
    ),
    security(("api_jwt" = []))
)]
pub async fn request_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::RequestBooking(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    post,
    path = "/api/tatame/bookings/{id}/confirm",
    tag = "Tatame",
    responses(
        (status = 200, description = "Agendamento confirmado (idempotente)", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    security(("api_jwt" = []))
)]
pub async fn confirm_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::ConfirmBooking { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

#[utoipa::path(
    post,
    path = "/api/tatame/bookings/{id}/deny",
    tag = "Tatame",
    responses(
        (status = 200, description = "Solicitação negada e removida", body = Event),
        (status = 409, description = "Agendamento não está pendente")
    ),
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    security(("api_jwt" = []))
)]
pub async fn deny_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DenyBooking { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

#[utoipa::path(
    delete,
    path = "/api/tatame/bookings/{id}",
    tag = "Tatame",
    responses(
        (status = 200, description = "Agendamento cancelado", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    security(("api_jwt" = []))
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CancelBooking { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}
