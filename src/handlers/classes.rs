// src/handlers/classes.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::classes::{CalendarLink, ClassPayload, ClassSession},
    store::{Command, Event},
};

// GET /api/classes
#[utoipa::path(
    get,
    path = "/api/classes",
    tag = "Classes",
    responses(
        (status = 200, description = "Grade de aulas", body = Vec<ClassSession>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_classes(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> impl IntoResponse {
    let classes = app_state.store.read().await.classes.clone();
    (StatusCode::OK, Json(classes))
}

// POST /api/classes
#[utoipa::path(
    post,
    path = "/api/classes",
    tag = "Classes",
    request_body = ClassPayload,
    responses(
        (status = 201, description = "Aula criada", body = Event),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_class(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<ClassPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::CreateClass(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /api/classes/{id}
#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    tag = "Classes",
    request_body = ClassPayload,
    responses(
        (status = 200, description = "Aula atualizada", body = Event),
        (status = 404, description = "Aula não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da aula")),
    security(("api_jwt" = []))
)]
pub async fn update_class(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClassPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::UpdateClass { id, payload })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

// DELETE /api/classes/{id}
#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    tag = "Classes",
    responses(
        (status = 200, description = "Aula removida", body = Event)
    ),
    params(("id" = Uuid, Path, description = "ID da aula")),
    security(("api_jwt" = []))
)]
pub async fn delete_class(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::DeleteClass { id })
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}

// GET /api/classes/calendar.ics
#[utoipa::path(
    get,
    path = "/api/classes/calendar.ics",
    tag = "Classes",
    responses(
        (status = 200, description = "Grade em iCalendar", content_type = "text/calendar", body = String)
    ),
    security(("api_jwt" = []))
)]
pub async fn export_calendar(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Response {
    let ics = app_state.store.calendar_ics().await;

    // Força o download do arquivo .ics
    let headers = [
        (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"aulas.ics\""),
    ];

    (headers, ics).into_response()
}

// GET /api/classes/{id}/calendar-link
#[utoipa::path(
    get,
    path = "/api/classes/{id}/calendar-link",
    tag = "Classes",
    responses(
        (status = 200, description = "Link do Google Agenda", body = CalendarLink),
        (status = 404, description = "Aula não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da aula")),
    security(("api_jwt" = []))
)]
pub async fn calendar_link(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let url = app_state
        .store
        .calendar_link(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(CalendarLink { url })))
}
