// src/handlers/jobs.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::jobs::{JobCard, JobCardDetail, JobCardFabric, JobCardRow, JobFabricResponse},
};

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("A quantidade deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateJob
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "O número do cartão é obrigatório."))]
    #[schema(example = "JOB-0042")]
    pub job_number: String,

    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub customer_name: String,

    pub customer_contact: Option<String>,
    pub curtain_type: Option<String>,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub description: Option<String>,
}

// POST /api/jobs
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Cartão criado já na etapa de corte", body = JobCard),
        (status = 409, description = "Número de cartão já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_job(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let job = app_state
        .job_service
        .create_job(
            &payload.job_number,
            &payload.customer_name,
            payload.customer_contact.as_deref(),
            payload.curtain_type.as_deref(),
            payload.quantity,
            payload.description.as_deref(),
            user.0.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

// GET /api/jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Cartões mais recentes primeiro", body = Vec<JobCardRow>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_jobs(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let jobs = app_state.job_service.list_jobs().await?;
    Ok((StatusCode::OK, Json(jobs)))
}

// GET /api/jobs/{id}
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 200, description = "Cartão com etapas e requisitos de tecido", body = JobCardDetail),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_job(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.job_service.get_job_detail(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// ---
// Payload: UpdateJob
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub customer_name: String,

    pub customer_contact: Option<String>,
    pub curtain_type: Option<String>,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub description: Option<String>,
}

// PUT /api/jobs/{id}
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Cartão atualizado", body = JobCard),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_job(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let job = app_state
        .job_service
        .update_job(
            id,
            &payload.customer_name,
            payload.customer_contact.as_deref(),
            payload.curtain_type.as_deref(),
            payload.quantity,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(job)))
}

// POST /api/jobs/{id}/advance
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/advance",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 200, description = "Etapa concluída; cartão avançado ou finalizado", body = JobCard),
        (status = 409, description = "Cartão já concluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn advance_stage(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let job = app_state.job_service.advance_stage(id, user.0.id).await?;
    Ok((StatusCode::OK, Json(job)))
}

// DELETE /api/jobs/{id}
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 204, description = "Cartão removido (etapas e vínculos em cascata)"),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_job(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.job_service.delete_job(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: AddJobFabric
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddJobFabricPayload {
    pub fabric_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub required_quantity: Decimal,
}

// POST /api/jobs/{id}/fabrics
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/fabrics",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    request_body = AddJobFabricPayload,
    responses(
        (status = 201, description = "Requisito de tecido adicionado", body = JobCardFabric)
    ),
    security(("api_jwt" = []))
)]
pub async fn add_job_fabric(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddJobFabricPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let link = app_state
        .job_service
        .add_fabric_requirement(id, payload.fabric_id, payload.required_quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

// GET /api/jobs/{id}/fabrics
#[utoipa::path(
    get,
    path = "/api/jobs/{id}/fabrics",
    tag = "Jobs",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 200, description = "Requisitos com a flag derivada de conclusão", body = Vec<JobFabricResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_job_fabrics(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let fabrics = app_state.job_service.list_fabric_requirements(id).await?;
    Ok((StatusCode::OK, Json(fabrics)))
}
