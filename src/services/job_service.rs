// src/services/job_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::JobRepository,
    models::jobs::{
        JobCard, JobCardDetail, JobCardFabric, JobCardRow, JobFabricResponse, JobStatus, StageName,
    },
};

#[derive(Clone)]
pub struct JobService {
    job_repo: JobRepository,
    pool: PgPool,
}

impl JobService {
    pub fn new(job_repo: JobRepository, pool: PgPool) -> Self {
        Self { job_repo, pool }
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobCardRow>, AppError> {
        self.job_repo.list_jobs().await
    }

    pub async fn get_job_detail(&self, id: Uuid) -> Result<JobCardDetail, AppError> {
        let job = self
            .job_repo
            .find_job(id)
            .await?
            .ok_or(AppError::NotFound("Cartão de produção"))?;
        let stages = self.job_repo.list_stages(id).await?;
        let fabrics = self
            .job_repo
            .list_job_fabrics(id)
            .await?
            .into_iter()
            .map(JobFabricResponse::from)
            .collect();
        Ok(JobCardDetail { job, stages, fabrics })
    }

    // --- CRIAÇÃO ---
    // Cartão e registro da primeira etapa (corte) nascem juntos.
    pub async fn create_job(
        &self,
        job_number: &str,
        customer_name: &str,
        customer_contact: Option<&str>,
        curtain_type: Option<&str>,
        quantity: i32,
        description: Option<&str>,
        created_by: Uuid,
    ) -> Result<JobCard, AppError> {
        let mut tx = self.pool.begin().await?;

        let job = self
            .job_repo
            .insert_job(
                &mut *tx,
                job_number,
                customer_name,
                customer_contact,
                curtain_type,
                quantity,
                description,
                created_by,
            )
            .await?;

        self.job_repo
            .upsert_stage(&mut *tx, job.id, StageName::FIRST, created_by, Utc::now())
            .await?;

        tx.commit().await?;

        tracing::info!("Cartão {} criado para '{}'", job.job_number, job.customer_name);
        Ok(job)
    }

    pub async fn update_job(
        &self,
        id: Uuid,
        customer_name: &str,
        customer_contact: Option<&str>,
        curtain_type: Option<&str>,
        quantity: i32,
        description: Option<&str>,
    ) -> Result<JobCard, AppError> {
        self.job_repo
            .update_job(
                &self.pool,
                id,
                customer_name,
                customer_contact,
                curtain_type,
                quantity,
                description,
            )
            .await
    }

    // --- AVANÇO DE ETAPA ---
    // A única função de transição. Em UMA transação, com o cartão travado:
    // fecha a etapa ativa (criando a linha se ela nunca foi registrada),
    // e então ou conclui o cartão (última etapa) ou move o ponteiro adiante
    // garantindo o registro da próxima etapa. Qualquer falha desfaz tudo.
    pub async fn advance_stage(&self, id: Uuid, user_id: Uuid) -> Result<JobCard, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let job = self
            .job_repo
            .find_job_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Cartão de produção"))?;

        if job.status == JobStatus::Completed {
            return Err(AppError::JobAlreadyCompleted);
        }

        // Fecha a etapa ativa. Se a linha não existe (criação lazy), o upsert
        // a materializa antes do carimbo de conclusão.
        let current = match self.job_repo.find_stage(&mut *tx, id, job.current_stage).await? {
            Some(stage) => stage,
            None => {
                self.job_repo
                    .upsert_stage(&mut *tx, id, job.current_stage, user_id, now)
                    .await?
            }
        };
        self.job_repo.complete_stage(&mut *tx, current.id, now).await?;

        match job.current_stage.next() {
            None => {
                // Última etapa: conclui o cartão inteiro.
                self.job_repo.complete_job(&mut *tx, id, now).await?;
                tracing::info!("Cartão {} concluído", job.job_number);
            }
            Some(next) => {
                self.job_repo.set_current_stage(&mut *tx, id, next).await?;
                self.job_repo
                    .upsert_stage(&mut *tx, id, next, user_id, now)
                    .await?;
            }
        }

        tx.commit().await?;

        // Relê fora da transação para devolver o estado final.
        self.job_repo
            .find_job(id)
            .await?
            .ok_or(AppError::NotFound("Cartão de produção"))
    }

    pub async fn add_fabric_requirement(
        &self,
        job_card_id: Uuid,
        fabric_id: Uuid,
        required_quantity: Decimal,
    ) -> Result<JobCardFabric, AppError> {
        self.job_repo
            .insert_job_fabric(job_card_id, fabric_id, required_quantity)
            .await
    }

    pub async fn list_fabric_requirements(
        &self,
        job_card_id: Uuid,
    ) -> Result<Vec<JobFabricResponse>, AppError> {
        Ok(self
            .job_repo
            .list_job_fabrics(job_card_id)
            .await?
            .into_iter()
            .map(JobFabricResponse::from)
            .collect())
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<(), AppError> {
        self.job_repo.delete_job(id).await
    }
}
