// src/models/reports.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{inventory::MovementType, jobs::StageName};

// Linha do relatório de movimentações, já com os nomes resolvidos
// (tecido e autor) para exibição e exportação.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementRow {
    pub id: Uuid,
    pub fabric_id: Uuid,
    pub fabric_name: String,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub job_card_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Linha do relatório de etapas de produção.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLogRow {
    pub id: Uuid,
    pub job_card_id: Uuid,
    pub job_number: String,
    pub customer_name: String,
    pub stage: StageName,
    pub stage_number: i32,
    pub responsible_name: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
