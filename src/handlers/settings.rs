// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::settings::{SettingsResponse, UpdateSettingsRequest},
    store::{Command, Event},
};

// GET /api/settings
// Público: a tela de login usa o nome, o logo e a imagem de fundo.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configurações da academia", body = SettingsResponse)
    )
)]
pub async fn get_settings(State(app_state): State<AppState>) -> impl IntoResponse {
    let settings = app_state.store.settings().await;

    (
        StatusCode::OK,
        Json(SettingsResponse {
            settings,
            ai_assistant_enabled: app_state.ai_assistant_enabled,
        }),
    )
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Configurações atualizadas", body = Event),
        (status = 403, description = "Somente administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = app_state
        .store
        .execute(&user.actor(), Command::UpdateSettings(payload))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(event)))
}
