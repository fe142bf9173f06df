// src/services/auth.rs

use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Profile, UserRole},
};

// A autenticação em si é delegada ao provedor externo de identidade: este
// serviço apenas valida os tokens que ele emite (segredo compartilhado) e
// espelha o perfil localmente para atribuição de created_by/responsible_user.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    /// Decodifica e valida o token (assinatura + expiração).
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }

    /// Valida o token e devolve o perfil local, criando/atualizando o espelho
    /// na primeira vez que essa identidade aparece (o provedor é a fonte).
    pub async fn validate_token(&self, token: &str) -> Result<Profile, AppError> {
        let claims = self.decode_token(token)?;
        let full_name = claims.name.as_deref().unwrap_or("Usuário");
        self.user_repo.upsert_profile(claims.sub, full_name).await
    }

    pub async fn roles_of(&self, user_id: uuid::Uuid) -> Result<Vec<UserRole>, AppError> {
        self.user_repo.list_roles(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn token_para(claims: &Claims, segredo: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(segredo.as_ref()),
        )
        .unwrap()
    }

    fn claims_validos() -> Claims {
        let agora = Utc::now();
        Claims {
            sub: Uuid::new_v4(),
            exp: (agora + chrono::Duration::hours(1)).timestamp() as usize,
            iat: agora.timestamp() as usize,
            name: Some("Maria".to_string()),
        }
    }

    fn service(segredo: &str) -> AuthService {
        // O repositório nunca é tocado por decode_token.
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/ignorado").unwrap();
        AuthService::new(UserRepository::new(pool), segredo.to_string())
    }

    #[tokio::test]
    async fn token_valido_devolve_as_claims() {
        let claims = claims_validos();
        let token = token_para(&claims, "segredo-compartilhado");
        let decodificadas = service("segredo-compartilhado").decode_token(&token).unwrap();
        assert_eq!(decodificadas.sub, claims.sub);
        assert_eq!(decodificadas.name.as_deref(), Some("Maria"));
    }

    #[tokio::test]
    async fn token_com_segredo_errado_e_rejeitado() {
        let token = token_para(&claims_validos(), "outro-segredo");
        let erro = service("segredo-compartilhado").decode_token(&token);
        assert!(matches!(erro, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_expirado_e_rejeitado() {
        let agora = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (agora - chrono::Duration::hours(2)).timestamp() as usize,
            iat: (agora - chrono::Duration::hours(3)).timestamp() as usize,
            name: None,
        };
        let token = token_para(&claims, "segredo-compartilhado");
        let erro = service("segredo-compartilhado").decode_token(&token);
        assert!(matches!(erro, Err(AppError::InvalidToken)));
    }
}
