// src/handlers/inventory.rs

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
    models::inventory::{Fabric, FabricResponse, StockMovement},
};

// ---
// Validações customizadas
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("A quantidade deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

fn default_unit() -> String {
    "meters".to_string()
}

// ---
// Payload: CreateFabric
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFabricPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O tipo de tecido é obrigatório."))]
    pub fabric_type: String,

    pub color: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub initial_quantity: Decimal,

    #[serde(default = "default_unit")]
    #[schema(example = "meters")]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub reorder_level: Decimal,

    #[validate(length(min = 1, message = "O número do lote é obrigatório."))]
    pub batch_number: String,

    pub supplier_name: Option<String>,
    pub supplier_contact: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_cost: Option<Decimal>,
}

// POST /api/inventory/fabrics
#[utoipa::path(
    post,
    path = "/api/inventory/fabrics",
    tag = "Inventory",
    request_body = CreateFabricPayload,
    responses(
        (status = 201, description = "Tecido criado com lote e movimentação inicial", body = Fabric),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_fabric(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateFabricPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fabric = app_state
        .inventory_service
        .create_fabric(
            &payload.name,
            &payload.fabric_type,
            payload.color.as_deref(),
            payload.initial_quantity,
            &payload.unit,
            payload.reorder_level,
            &payload.batch_number,
            payload.supplier_name.as_deref(),
            payload.supplier_contact.as_deref(),
            payload.unit_cost,
            user.0.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(fabric)))
}

// GET /api/inventory/fabrics
#[utoipa::path(
    get,
    path = "/api/inventory/fabrics",
    tag = "Inventory",
    responses(
        (status = 200, description = "Tecidos ordenados por nome, com a flag derivada de estoque baixo", body = Vec<FabricResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_fabrics(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let fabrics: Vec<FabricResponse> = app_state
        .inventory_service
        .list_fabrics()
        .await?
        .into_iter()
        .map(FabricResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(fabrics)))
}

// DELETE /api/inventory/fabrics/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/fabrics/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do tecido")),
    responses(
        (status = 204, description = "Tecido removido (lotes e movimentações em cascata)"),
        (status = 404, description = "Tecido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_fabric(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_fabric(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: Emissão / Devolução
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueReturnPayload {
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    // Se vier, a movimentação acumula no requisito do cartão.
    pub job_card_id: Option<Uuid>,

    pub notes: Option<String>,
}

// POST /api/inventory/fabrics/{id}/issue
#[utoipa::path(
    post,
    path = "/api/inventory/fabrics/{id}/issue",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do tecido")),
    request_body = IssueReturnPayload,
    responses(
        (status = 201, description = "Saída registrada e saldo debitado", body = StockMovement),
        (status = 409, description = "Estoque insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn issue_fabric(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<IssueReturnPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .issue_fabric(
            id,
            payload.quantity,
            payload.job_card_id,
            payload.notes.as_deref(),
            user.0.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// POST /api/inventory/fabrics/{id}/return
#[utoipa::path(
    post,
    path = "/api/inventory/fabrics/{id}/return",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do tecido")),
    request_body = IssueReturnPayload,
    responses(
        (status = 201, description = "Devolução registrada e saldo creditado", body = StockMovement)
    ),
    security(("api_jwt" = []))
)]
pub async fn return_fabric(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<IssueReturnPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .return_fabric(
            id,
            payload.quantity,
            payload.job_card_id,
            payload.notes.as_deref(),
            user.0.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// ---
// Payload: Entrada de Estoque (novo lote)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStockPayload {
    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "O número do lote é obrigatório."))]
    pub batch_number: String,

    pub supplier_name: Option<String>,
    pub supplier_contact: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_cost: Option<Decimal>,

    pub notes: Option<String>,
}

// POST /api/inventory/fabrics/{id}/stock-entry
#[utoipa::path(
    post,
    path = "/api/inventory/fabrics/{id}/stock-entry",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do tecido")),
    request_body = AddStockPayload,
    responses(
        (status = 200, description = "Novo lote criado e saldo atualizado", body = Fabric),
        (status = 404, description = "Tecido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fabric = app_state
        .inventory_service
        .add_stock(
            id,
            payload.quantity,
            &payload.batch_number,
            payload.supplier_name.as_deref(),
            payload.supplier_contact.as_deref(),
            payload.unit_cost,
            payload.notes.as_deref(),
            user.0.id,
        )
        .await?;

    Ok((StatusCode::OK, Json(fabric)))
}
