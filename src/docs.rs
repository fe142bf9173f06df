// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_roles,

        // --- INVENTORY ---
        handlers::inventory::create_fabric,
        handlers::inventory::list_fabrics,
        handlers::inventory::delete_fabric,
        handlers::inventory::issue_fabric,
        handlers::inventory::return_fabric,
        handlers::inventory::add_stock,

        // --- JOBS ---
        handlers::jobs::create_job,
        handlers::jobs::list_jobs,
        handlers::jobs::get_job,
        handlers::jobs::update_job,
        handlers::jobs::advance_stage,
        handlers::jobs::delete_job,
        handlers::jobs::add_job_fabric,
        handlers::jobs::list_job_fabrics,

        // --- Reports ---
        handlers::reports::list_stock_movements,
        handlers::reports::delete_stock_movement,
        handlers::reports::export_stock_movements,
        handlers::reports::list_production_logs,
        handlers::reports::delete_production_log,
        handlers::reports::export_production_logs,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::recent_movements,
    ),
    components(
        schemas(

            // --- DASHBOARD ---
            models::dashboard::DashboardSummary,

            // --- Auth ---
            models::auth::Profile,
            models::auth::AppRole,
            models::auth::UserRole,

            // --- Inventory ---
            models::inventory::Fabric,
            models::inventory::FabricResponse,
            models::inventory::FabricBatch,
            models::inventory::MovementType,
            models::inventory::StockMovement,

            // --- Jobs ---
            models::jobs::StageName,
            models::jobs::JobStatus,
            models::jobs::JobCard,
            models::jobs::JobCardRow,
            models::jobs::JobCardDetail,
            models::jobs::ProductionStage,
            models::jobs::JobCardFabric,
            models::jobs::JobFabricResponse,

            // --- Reports ---
            models::reports::StockMovementRow,
            models::reports::ProductionLogRow,

            // --- Payloads ---
            handlers::inventory::CreateFabricPayload,
            handlers::inventory::IssueReturnPayload,
            handlers::inventory::AddStockPayload,
            handlers::jobs::CreateJobPayload,
            handlers::jobs::UpdateJobPayload,
            handlers::jobs::AddJobFabricPayload,
        )
    ),
    tags(
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Inventory", description = "Gestão de Tecidos e Estoque"),
        (name = "Jobs", description = "Cartões de Produção e Etapas"),
        (name = "Reports", description = "Relatórios e Exportação CSV"),
        (name = "Dashboard", description = "Indicadores Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
