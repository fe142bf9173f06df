// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Espelho local de uma identidade do provedor externo de autenticação.
// O `id` é o `sub` do JWT emitido pelo provedor.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Papel de um usuário. Usado apenas para exibição e atribuição;
// nenhuma operação do núcleo é bloqueada por papel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "app_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Admin,
    StoreManager,
    ProductionManager,
    Staff,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: AppRole,
    pub created_at: DateTime<Utc>,
}

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,            // Subject (ID do usuário no provedor)
    pub exp: usize,           // Expiration time
    pub iat: usize,           // Issued At
    pub name: Option<String>, // Nome de exibição, se o provedor incluir
}
