// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::DashboardSummary,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo do painel (blocos da equipe conforme permissão)", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    let summary = app_state.store.dashboard(&user.actor()).await;
    (StatusCode::OK, Json(summary))
}
