// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// Resumo operacional exibido na tela inicial.
// `low_stock_items` é sempre recalculado na leitura, nunca armazenado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_fabrics: i64,
    pub low_stock_items: i64,
    pub active_jobs: i64,
    pub completed_jobs: i64,
}
