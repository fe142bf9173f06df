// src/models/jobs.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Etapas de Produção ---

// As cinco etapas fixas da linha de produção de cortinas, na ordem em que
// todo cartão as percorre. Não existe volta, pulo nem etapa paralela.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "production_stage_name", rename_all = "snake_case")] // Banco
#[serde(rename_all = "snake_case")] // JSON
pub enum StageName {
    Cutting,
    Stitching,
    Finishing,
    QualityCheck,
    PackingDispatch,
}

impl StageName {
    // A ordem fixa do funil. `stage_number` é o índice aqui + 1.
    pub const ORDER: [StageName; 5] = [
        StageName::Cutting,
        StageName::Stitching,
        StageName::Finishing,
        StageName::QualityCheck,
        StageName::PackingDispatch,
    ];

    pub const FIRST: StageName = StageName::Cutting;

    /// Número da etapa (1 a 5), como gravado em `production_stages.stage_number`.
    pub fn stage_number(self) -> i32 {
        match self {
            StageName::Cutting => 1,
            StageName::Stitching => 2,
            StageName::Finishing => 3,
            StageName::QualityCheck => 4,
            StageName::PackingDispatch => 5,
        }
    }

    /// A próxima etapa da sequência, ou `None` se esta for a última
    /// (nesse caso o cartão inteiro é concluído).
    pub fn next(self) -> Option<StageName> {
        match self {
            StageName::Cutting => Some(StageName::Stitching),
            StageName::Stitching => Some(StageName::Finishing),
            StageName::Finishing => Some(StageName::QualityCheck),
            StageName::QualityCheck => Some(StageName::PackingDispatch),
            StageName::PackingDispatch => None,
        }
    }

    /// Nome de exibição (relatórios, CSV).
    pub fn label(self) -> &'static str {
        match self {
            StageName::Cutting => "Corte",
            StageName::Stitching => "Costura",
            StageName::Finishing => "Acabamento",
            StageName::QualityCheck => "Controle de Qualidade",
            StageName::PackingDispatch => "Embalagem/Expedição",
        }
    }
}

// --- 2. Status do Cartão ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    InProgress,
    Completed,
}

// --- 3. Cartão de Produção (Job Card) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: Uuid,
    pub job_number: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub curtain_type: Option<String>,
    pub quantity: i32,
    pub description: Option<String>,
    pub current_stage: StageName,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem de cartões, já com o nome de quem criou.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCardRow {
    pub id: Uuid,
    pub job_number: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub curtain_type: Option<String>,
    pub quantity: i32,
    pub current_stage: StageName,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 4. Registro de Etapa ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionStage {
    pub id: Uuid,
    pub job_card_id: Uuid,
    pub stage: StageName,
    pub stage_number: i32,
    pub responsible_user: Uuid,
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// --- 5. Requisito de Tecido do Cartão ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCardFabric {
    pub id: Uuid,
    pub job_card_id: Uuid,
    pub fabric_id: Uuid,
    pub required_quantity: Decimal,
    pub issued_quantity: Decimal,
    pub created_at: DateTime<Utc>,
}

// Linha do detalhe do cartão: requisito + dados do tecido.
#[derive(Debug, Clone, FromRow)]
pub struct JobFabricRow {
    pub id: Uuid,
    pub fabric_id: Uuid,
    pub fabric_name: String,
    pub unit: String,
    pub fabric_current_quantity: Decimal,
    pub required_quantity: Decimal,
    pub issued_quantity: Decimal,
}

// Resposta do detalhe, com a flag derivada de conclusão do requisito.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobFabricResponse {
    pub id: Uuid,
    pub fabric_id: Uuid,
    pub fabric_name: String,
    pub unit: String,
    pub fabric_current_quantity: Decimal,
    pub required_quantity: Decimal,
    pub issued_quantity: Decimal,
    pub complete: bool,
}

impl From<JobFabricRow> for JobFabricResponse {
    fn from(row: JobFabricRow) -> Self {
        let complete = requirement_complete(row.required_quantity, row.issued_quantity);
        Self {
            id: row.id,
            fabric_id: row.fabric_id,
            fabric_name: row.fabric_name,
            unit: row.unit,
            fabric_current_quantity: row.fabric_current_quantity,
            required_quantity: row.required_quantity,
            issued_quantity: row.issued_quantity,
            complete,
        }
    }
}

/// "Requisito completo" é sempre derivado (emitido >= necessário),
/// nunca um status persistido.
pub fn requirement_complete(required: Decimal, issued: Decimal) -> bool {
    issued >= required
}

// Detalhe completo de um cartão (cartão + etapas + tecidos).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCardDetail {
    pub job: JobCard,
    pub stages: Vec<ProductionStage>,
    pub fabrics: Vec<JobFabricResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordem_das_etapas_e_fixa() {
        assert_eq!(StageName::ORDER.len(), 5);
        assert_eq!(StageName::ORDER[0], StageName::FIRST);
        assert_eq!(StageName::ORDER[4], StageName::PackingDispatch);
    }

    #[test]
    fn stage_number_cresce_de_um_em_um() {
        for (i, stage) in StageName::ORDER.iter().enumerate() {
            assert_eq!(stage.stage_number(), i as i32 + 1);
        }
    }

    #[test]
    fn next_percorre_a_sequencia_inteira() {
        let mut atual = StageName::FIRST;
        let mut visitadas = vec![atual];
        while let Some(prox) = atual.next() {
            // Sempre avança exatamente um número
            assert_eq!(prox.stage_number(), atual.stage_number() + 1);
            visitadas.push(prox);
            atual = prox;
        }
        assert_eq!(visitadas, StageName::ORDER.to_vec());
        assert_eq!(atual, StageName::PackingDispatch);
        assert!(atual.next().is_none());
    }

    #[test]
    fn nomes_serializados_batem_com_o_banco() {
        let json = serde_json::to_string(&StageName::QualityCheck).unwrap();
        assert_eq!(json, "\"quality_check\"");
        let json = serde_json::to_string(&StageName::PackingDispatch).unwrap();
        assert_eq!(json, "\"packing_dispatch\"");
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn requisito_completo_e_derivado() {
        let dez = Decimal::from(10);
        let cinco = Decimal::from(5);
        assert!(requirement_complete(dez, dez));
        assert!(requirement_complete(cinco, dez));
        assert!(!requirement_complete(dez, cinco));
        assert!(requirement_complete(Decimal::ZERO, Decimal::ZERO));
    }
}
