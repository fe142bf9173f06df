// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{dashboard::DashboardSummary, inventory::StockMovement},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores agregados da fábrica", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/recent-movements
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-movements",
    tag = "Dashboard",
    responses(
        (status = 200, description = "As 10 movimentações mais recentes", body = Vec<StockMovement>)
    ),
    security(("api_jwt" = []))
)]
pub async fn recent_movements(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state.dashboard_service.recent_movements().await?;
    Ok((StatusCode::OK, Json(movements)))
}
