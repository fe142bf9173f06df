// src/db/job_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::jobs::{JobCard, JobCardFabric, JobCardRow, JobFabricRow, ProductionStage, StageName},
};

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn list_jobs(&self) -> Result<Vec<JobCardRow>, AppError> {
        let jobs = sqlx::query_as::<_, JobCardRow>(
            r#"
            SELECT j.id, j.job_number, j.customer_name, j.customer_contact,
                   j.curtain_type, j.quantity, j.current_stage, j.status,
                   j.started_at, j.completed_at, p.full_name AS created_by_name,
                   j.created_at
            FROM job_cards j
            LEFT JOIN profiles p ON p.id = j.created_by
            ORDER BY j.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn find_job(&self, id: Uuid) -> Result<Option<JobCard>, AppError> {
        let job = sqlx::query_as::<_, JobCard>("SELECT * FROM job_cards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn list_stages(&self, job_card_id: Uuid) -> Result<Vec<ProductionStage>, AppError> {
        let stages = sqlx::query_as::<_, ProductionStage>(
            "SELECT * FROM production_stages WHERE job_card_id = $1 ORDER BY stage_number ASC",
        )
        .bind(job_card_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stages)
    }

    pub async fn list_job_fabrics(&self, job_card_id: Uuid) -> Result<Vec<JobFabricRow>, AppError> {
        let rows = sqlx::query_as::<_, JobFabricRow>(
            r#"
            SELECT jf.id, jf.fabric_id, f.name AS fabric_name, f.unit,
                   f.current_quantity AS fabric_current_quantity,
                   jf.required_quantity, jf.issued_quantity
            FROM job_card_fabrics jf
            JOIN fabrics f ON f.id = jf.fabric_id
            WHERE jf.job_card_id = $1
            ORDER BY f.name ASC
            "#,
        )
        .bind(job_card_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Escritas (transacionais)
    // ---

    /// Busca o cartão travando a linha (FOR UPDATE). Dois avanços simultâneos
    /// sobre o mesmo cartão serializam aqui em vez de correr.
    pub async fn find_job_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<JobCard>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let job = sqlx::query_as::<_, JobCard>("SELECT * FROM job_cards WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(job)
    }

    pub async fn insert_job<'e, E>(
        &self,
        executor: E,
        job_number: &str,
        customer_name: &str,
        customer_contact: Option<&str>,
        curtain_type: Option<&str>,
        quantity: i32,
        description: Option<&str>,
        created_by: Uuid,
    ) -> Result<JobCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, JobCard>(
            r#"
            INSERT INTO job_cards
                (job_number, customer_name, customer_contact, curtain_type, quantity, description, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(job_number)
        .bind(customer_name)
        .bind(customer_contact)
        .bind(curtain_type)
        .bind(quantity)
        .bind(description)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::JobNumberAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update_job<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        customer_name: &str,
        customer_contact: Option<&str>,
        curtain_type: Option<&str>,
        quantity: i32,
        description: Option<&str>,
    ) -> Result<JobCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let job = sqlx::query_as::<_, JobCard>(
            r#"
            UPDATE job_cards
            SET customer_name = $2, customer_contact = $3, curtain_type = $4,
                quantity = $5, description = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_name)
        .bind(customer_contact)
        .bind(curtain_type)
        .bind(quantity)
        .bind(description)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Cartão de produção"))?;
        Ok(job)
    }

    pub async fn set_current_stage<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        stage: StageName,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE job_cards SET current_stage = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(stage)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn complete_job<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE job_cards
            SET status = 'completed', completed_at = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(completed_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_stage<'e, E>(
        &self,
        executor: E,
        job_card_id: Uuid,
        stage: StageName,
    ) -> Result<Option<ProductionStage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ProductionStage>(
            "SELECT * FROM production_stages WHERE job_card_id = $1 AND stage = $2",
        )
        .bind(job_card_id)
        .bind(stage)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    /// Garante o registro da etapa: cria com `started_at` agora, ou recarimba
    /// `started_at` se a linha já existir (UNIQUE em (job_card_id, stage)).
    pub async fn upsert_stage<'e, E>(
        &self,
        executor: E,
        job_card_id: Uuid,
        stage: StageName,
        responsible_user: Uuid,
        started_at: DateTime<Utc>,
    ) -> Result<ProductionStage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ProductionStage>(
            r#"
            INSERT INTO production_stages (job_card_id, stage, stage_number, responsible_user, started_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (job_card_id, stage)
            DO UPDATE SET started_at = EXCLUDED.started_at
            RETURNING *
            "#,
        )
        .bind(job_card_id)
        .bind(stage)
        .bind(stage.stage_number())
        .bind(responsible_user)
        .bind(started_at)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    pub async fn complete_stage<'e, E>(
        &self,
        executor: E,
        stage_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE production_stages SET completed_at = $2 WHERE id = $1")
            .bind(stage_id)
            .bind(completed_at)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn insert_job_fabric(
        &self,
        job_card_id: Uuid,
        fabric_id: Uuid,
        required_quantity: Decimal,
    ) -> Result<JobCardFabric, AppError> {
        let link = sqlx::query_as::<_, JobCardFabric>(
            r#"
            INSERT INTO job_card_fabrics (job_card_id, fabric_id, required_quantity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(job_card_id)
        .bind(fabric_id)
        .bind(required_quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    /// Remove o cartão; etapas e vínculos de tecido caem em cascata.
    pub async fn delete_job(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM job_cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cartão de produção"));
        }
        Ok(())
    }
}
