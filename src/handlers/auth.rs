// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{Profile, UserRole},
};

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Perfil local do usuário autenticado", body = Profile),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(profile): AuthenticatedUser) -> impl IntoResponse {
    (StatusCode::OK, Json(profile))
}

// GET /api/users/me/roles
#[utoipa::path(
    get,
    path = "/api/users/me/roles",
    tag = "Users",
    responses(
        (status = 200, description = "Papéis atribuídos ao usuário", body = Vec<UserRole>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_roles(
    State(app_state): State<AppState>,
    AuthenticatedUser(profile): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.auth_service.roles_of(profile.id).await?;
    Ok((StatusCode::OK, Json(roles)))
}
