// src/services/report_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::reports::{ProductionLogRow, StockMovementRow},
};

// Um arquivo CSV pronto para download: bytes + nome carimbado com a data.
pub struct CsvExport {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
}

impl ReportService {
    pub fn new(report_repo: ReportRepository) -> Self {
        Self { report_repo }
    }

    pub async fn stock_movements(&self, limit: i64) -> Result<Vec<StockMovementRow>, AppError> {
        self.report_repo.list_movements(limit).await
    }

    pub async fn delete_movement(&self, id: Uuid) -> Result<(), AppError> {
        self.report_repo.delete_movement(id).await
    }

    pub async fn production_logs(&self, limit: i64) -> Result<Vec<ProductionLogRow>, AppError> {
        self.report_repo.list_stage_logs(limit).await
    }

    pub async fn delete_stage_log(&self, id: Uuid) -> Result<(), AppError> {
        self.report_repo.delete_stage_log(id).await
    }

    // --- EXPORTAÇÃO ---
    // Geração síncrona a partir das linhas já carregadas do relatório.
    // O writer cuida do escape RFC 4180 (aspas embutidas viram aspas duplas).

    pub async fn export_stock_movements(&self, limit: i64) -> Result<CsvExport, AppError> {
        let rows = self.report_repo.list_movements(limit).await?;
        let content = write_movements_csv(&rows)?;
        Ok(CsvExport {
            filename: stamped_filename("movimentacoes_estoque"),
            content,
        })
    }

    pub async fn export_production_logs(&self, limit: i64) -> Result<CsvExport, AppError> {
        let rows = self.report_repo.list_stage_logs(limit).await?;
        let content = write_production_csv(&rows)?;
        Ok(CsvExport {
            filename: stamped_filename("etapas_producao"),
            content,
        })
    }
}

fn stamped_filename(prefix: &str) -> String {
    format!("{}_{}.csv", prefix, Utc::now().format("%Y-%m-%d"))
}

fn write_movements_csv(rows: &[StockMovementRow]) -> Result<Vec<u8>, AppError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Data", "Tecido", "Tipo", "Quantidade", "Usuário", "Observações"])?;
    for row in rows {
        wtr.write_record([
            row.created_at.to_rfc3339(),
            row.fabric_name.clone(),
            row.movement_type.as_str().to_string(),
            row.quantity.to_string(),
            row.created_by_name.clone().unwrap_or_default(),
            row.notes.clone().unwrap_or_default(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("CSV: {e}")))
}

fn write_production_csv(rows: &[ProductionLogRow]) -> Result<Vec<u8>, AppError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "Cartão",
        "Cliente",
        "Etapa",
        "Número",
        "Responsável",
        "Início",
        "Conclusão",
    ])?;
    for row in rows {
        wtr.write_record([
            row.job_number.clone(),
            row.customer_name.clone(),
            row.stage.label().to_string(),
            row.stage_number.to_string(),
            row.responsible_name.clone().unwrap_or_default(),
            row.started_at.to_rfc3339(),
            row.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{inventory::MovementType, jobs::StageName};
    use rust_decimal::Decimal;

    fn movimento(fabric_name: &str, notes: Option<&str>) -> StockMovementRow {
        StockMovementRow {
            id: Uuid::new_v4(),
            fabric_id: Uuid::new_v4(),
            fabric_name: fabric_name.to_string(),
            movement_type: MovementType::Out,
            quantity: Decimal::from(5),
            job_card_id: None,
            notes: notes.map(String::from),
            created_by_name: Some("Maria".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn csv_tem_uma_linha_por_registro_mais_cabecalho() {
        let rows = vec![movimento("Linho", None), movimento("Veludo", None)];
        let bytes = write_movements_csv(&rows).unwrap();
        let texto = String::from_utf8(bytes).unwrap();
        assert_eq!(texto.trim_end().lines().count(), rows.len() + 1);
    }

    #[test]
    fn aspas_embutidas_sao_duplicadas() {
        let rows = vec![movimento("Tecido \"Premium\"", Some("corte \"urgente\""))];
        let bytes = write_movements_csv(&rows).unwrap();
        let texto = String::from_utf8(bytes).unwrap();
        assert!(texto.contains("\"Tecido \"\"Premium\"\"\""));
        assert!(texto.contains("\"corte \"\"urgente\"\"\""));
    }

    #[test]
    fn nome_do_arquivo_carimba_a_data() {
        let nome = stamped_filename("movimentacoes_estoque");
        let hoje = Utc::now().format("%Y-%m-%d").to_string();
        assert_eq!(nome, format!("movimentacoes_estoque_{hoje}.csv"));
    }

    #[test]
    fn relatorio_de_producao_usa_rotulos_das_etapas() {
        let rows = vec![ProductionLogRow {
            id: Uuid::new_v4(),
            job_card_id: Uuid::new_v4(),
            job_number: "JOB-001".to_string(),
            customer_name: "Cliente".to_string(),
            stage: StageName::QualityCheck,
            stage_number: 4,
            responsible_name: None,
            started_at: Utc::now(),
            completed_at: None,
            created_at: Utc::now(),
        }];
        let texto = String::from_utf8(write_production_csv(&rows).unwrap()).unwrap();
        assert!(texto.contains("Controle de Qualidade"));
        assert!(texto.contains("JOB-001"));
    }
}
