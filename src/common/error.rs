use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante sabe virar uma resposta HTTP em IntoResponse.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Contato não encontrado")]
    ContactNotFound,

    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Etapa não encontrada")]
    StageNotFound,

    #[error("Funil não encontrado")]
    PipelineNotFound,

    #[error("Mensagem não encontrada")]
    MessageNotFound,

    #[error("Documento não encontrado")]
    DocumentNotFound,

    #[error("Fatura não encontrada")]
    InvoiceNotFound,

    #[error("Item da fatura não encontrado")]
    InvoiceItemNotFound,

    #[error("Transição de status inválida: {0}")]
    InvalidStatusTransition(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Estourou o orçamento de retry do wrapper de resiliência.
    #[error("Tempo de conexão esgotado")]
    ConnectionTimeout,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
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
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.".to_string()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string()),
            AppError::ContactNotFound => (StatusCode::NOT_FOUND, "Contato não encontrado.".to_string()),
            AppError::LeadNotFound => (StatusCode::NOT_FOUND, "Lead não encontrado.".to_string()),
            AppError::StageNotFound => (StatusCode::NOT_FOUND, "Etapa não encontrada.".to_string()),
            AppError::PipelineNotFound => (StatusCode::NOT_FOUND, "Funil não encontrado.".to_string()),
            AppError::MessageNotFound => (StatusCode::NOT_FOUND, "Mensagem não encontrada.".to_string()),
            AppError::DocumentNotFound => (StatusCode::NOT_FOUND, "Documento não encontrado.".to_string()),
            AppError::InvoiceNotFound => (StatusCode::NOT_FOUND, "Fatura não encontrada.".to_string()),
            AppError::InvoiceItemNotFound => (StatusCode::NOT_FOUND, "Item da fatura não encontrado.".to_string()),
            AppError::InvalidStatusTransition(msg) => (StatusCode::CONFLICT, msg),
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::ConnectionTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Tempo de conexão esgotado. Verifique sua conexão e tente novamente.".to_string(),
            ),

            // Todos os outros erros viram 500. O `tracing` loga a mensagem
            // detalhada que `thiserror` nos deu; o cliente recebe o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
