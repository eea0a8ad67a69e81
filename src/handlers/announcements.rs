// src/handlers/announcements.rs

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
    models::announcements::{Announcement, AnnouncementPayload},
    store::{Command, Event},
};

// GET /api/announcements
#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "Announcements",
    responses(
        (status = 200, description = "Avisos, mais recentes primeiro", body = Vec<Announcement>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_announcements(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let announcements = app_state.store.read().await.announcements.clone();
    (StatusCode::OK, Json(announcements))
}

// POST /api/announcements
#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = "Announcements",
    request_body = AnnouncementPayload,
    responses(
        (status = 201, description = "Aviso publicado", body = Event)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_announcement(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<AnnouncementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreateAnnouncement(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// DELETE /api/announcements/{id}
#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    tag = "Announcements",
    responses(
        (status = 200, description = "Aviso removido", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID do aviso")),
    security(("api_jwt" = []))
)]
pub async fn delete_announcement(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeleteAnnouncement { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}
