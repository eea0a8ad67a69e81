// src/handlers/state.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    store::StateView,
};

// GET /api/state
#[utoipa::path(
    get,
    path = "/api/state",
    tag = "State",
    responses(
        (status = 200, description = "Estado completo visível ao usuário", body = StateView)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_state(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .store
        .view_for(&user.actor())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(view)))
}
