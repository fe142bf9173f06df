// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::reports::{ProductionLogRow, StockMovementRow},
    services::report_service::CsvExport,
};

// O mesmo recorte da tela (50 últimos) vale para a exportação.
const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuery {
    pub limit: Option<i64>,
}

impl ReportQuery {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 500)
    }
}

// Monta a resposta de download: text/csv com o nome carimbado com a data.
fn csv_response(export: CsvExport) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    )
}

// GET /api/reports/stock-movements
#[utoipa::path(
    get,
    path = "/api/reports/stock-movements",
    tag = "Reports",
    params(("limit" = Option<i64>, Query, description = "Máximo de linhas (padrão 50)")),
    responses(
        (status = 200, description = "Movimentações mais recentes primeiro", body = Vec<StockMovementRow>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_stock_movements(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.report_service.stock_movements(query.limit()).await?;
    Ok((StatusCode::OK, Json(rows)))
}

// DELETE /api/reports/stock-movements/{id}
#[utoipa::path(
    delete,
    path = "/api/reports/stock-movements/{id}",
    tag = "Reports",
    params(("id" = Uuid, Path, description = "ID da movimentação")),
    responses(
        (status = 204, description = "Linha do log removida; o saldo não é revertido"),
        (status = 404, description = "Movimentação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_stock_movement(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.report_service.delete_movement(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/reports/stock-movements/export
#[utoipa::path(
    get,
    path = "/api/reports/stock-movements/export",
    tag = "Reports",
    params(("limit" = Option<i64>, Query, description = "Máximo de linhas (padrão 50)")),
    responses(
        (status = 200, description = "CSV das movimentações carregadas", content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_stock_movements(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let export = app_state
        .report_service
        .export_stock_movements(query.limit())
        .await?;
    Ok(csv_response(export))
}

// GET /api/reports/production
#[utoipa::path(
    get,
    path = "/api/reports/production",
    tag = "Reports",
    params(("limit" = Option<i64>, Query, description = "Máximo de linhas (padrão 50)")),
    responses(
        (status = 200, description = "Registros de etapa mais recentes primeiro", body = Vec<ProductionLogRow>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_production_logs(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.report_service.production_logs(query.limit()).await?;
    Ok((StatusCode::OK, Json(rows)))
}

// DELETE /api/reports/production/{id}
#[utoipa::path(
    delete,
    path = "/api/reports/production/{id}",
    tag = "Reports",
    params(("id" = Uuid, Path, description = "ID do registro de etapa")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_production_log(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.report_service.delete_stage_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/reports/production/export
#[utoipa::path(
    get,
    path = "/api/reports/production/export",
    tag = "Reports",
    params(("limit" = Option<i64>, Query, description = "Máximo de linhas (padrão 50)")),
    responses(
        (status = 200, description = "CSV dos registros de etapa carregados", content_type = "text/csv")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_production_logs(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let export = app_state
        .report_service
        .export_production_logs(query.limit())
        .await?;
    Ok(csv_response(export))
}
