// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{DashboardRepository, FabricRepository, JobRepository, ReportRepository, UserRepository},
    services::{AuthService, DashboardService, InventoryService, JobService, ReportService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub job_service: JobService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let fabric_repo = FabricRepository::new(db_pool.clone());
        let job_repo = JobRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let inventory_service = InventoryService::new(fabric_repo, db_pool.clone());
        let job_service = JobService::new(job_repo, db_pool.clone());
        let report_service = ReportService::new(report_repo);
        let dashboard_service = DashboardService::new(dashboard_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            inventory_service,
            job_service,
            report_service,
            dashboard_service,
        })
    }
}
