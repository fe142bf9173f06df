// src/db/dashboard_repo.rs

use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{dashboard::DashboardSummary, inventory::StockMovement},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Contadores do painel. Roda dentro de uma transação para um snapshot
    /// consistente dos dados.
    pub async fn get_summary<'e, E>(&self, executor: E) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let total_fabrics = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fabrics")
            .fetch_one(&mut *tx)
            .await?;

        // "Estoque baixo" é derivado na leitura, nunca uma flag gravada.
        let low_stock_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM fabrics WHERE current_quantity <= reorder_level",
        )
        .fetch_one(&mut *tx)
        .await?;

        let active_jobs = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM job_cards WHERE status = 'in_progress'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let completed_jobs = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM job_cards WHERE status = 'completed'",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_fabrics,
            low_stock_items,
            active_jobs,
            completed_jobs,
        })
    }

    pub async fn recent_movements(&self, limit: i64) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM stock_movements ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }
}
