// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Profile, UserRole},
};

// Repositório dos espelhos de identidade ('profiles') e papéis.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria (ou atualiza o nome de) um perfil a partir do token. O provedor
    /// externo é a fonte da identidade; aqui só espelhamos para atribuição.
    pub async fn upsert_profile(&self, id: Uuid, full_name: &str) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, full_name)
            VALUES ($1, $2)
            ON CONFLICT (id)
            DO UPDATE SET full_name = EXCLUDED.full_name, updated_at = now()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRole>, AppError> {
        let roles = sqlx::query_as::<_, UserRole>(
            "SELECT * FROM user_roles WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}
