use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Todos os erros abortam apenas a requisição que os gerou; as transações
// sofrem rollback no drop, então nenhuma escrita parcial sobrevive.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Estoque insuficiente")]
    InsufficientStock,

    #[error("Cartão de produção já concluído")]
    JobAlreadyCompleted,

    #[error("Número de cartão já existe")]
    JobNumberAlreadyExists,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro ao gerar CSV: {0}")]
    CsvError(#[from] csv::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                format!("{entity} não encontrado(a)."),
            ),
            AppError::InsufficientStock => (
                StatusCode::CONFLICT,
                "Estoque insuficiente para a quantidade solicitada.".to_string(),
            ),
            AppError::JobAlreadyCompleted => (
                StatusCode::CONFLICT,
                "Este cartão de produção já foi concluído.".to_string(),
            ),
            AppError::JobNumberAlreadyExists => (
                StatusCode::CONFLICT,
                "Já existe um cartão com este número.".to_string(),
            ),

            // Todos os outros (DatabaseError, InternalServerError, ...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
