// src/db/report_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reports::{ProductionLogRow, StockMovementRow},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_movements(&self, limit: i64) -> Result<Vec<StockMovementRow>, AppError> {
        let rows = sqlx::query_as::<_, StockMovementRow>(
            r#"
            SELECT m.id, m.fabric_id, f.name AS fabric_name, m.movement_type,
                   m.quantity, m.job_card_id, m.notes,
                   p.full_name AS created_by_name, m.created_at
            FROM stock_movements m
            JOIN fabrics f ON f.id = m.fabric_id
            LEFT JOIN profiles p ON p.id = m.created_by
            ORDER BY m.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Apaga só a linha do log. Não reverte nenhum efeito de saldo: o
    /// livro-razão é append-only e a exclusão aqui é limpeza de registro.
    pub async fn delete_movement(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM stock_movements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Movimentação"));
        }
        Ok(())
    }

    pub async fn list_stage_logs(&self, limit: i64) -> Result<Vec<ProductionLogRow>, AppError> {
        let rows = sqlx::query_as::<_, ProductionLogRow>(
            r#"
            SELECT s.id, s.job_card_id, j.job_number, j.customer_name,
                   s.stage, s.stage_number, p.full_name AS responsible_name,
                   s.started_at, s.completed_at, s.created_at
            FROM production_stages s
            JOIN job_cards j ON j.id = s.job_card_id
            LEFT JOIN profiles p ON p.id = s.responsible_user
            ORDER BY s.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn delete_stage_log(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM production_stages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registro de etapa"));
        }
        Ok(())
    }
}
