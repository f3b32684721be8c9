// src/handlers/inbox.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inbox::{InboxStats, Message, MessageChannel, MessagePriority, ThreadSummary},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComposeMessagePayload {
    pub channel: Option<MessageChannel>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub contact_name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@acme.com")]
    pub contact_email: Option<String>,

    #[schema(example = "Proposta comercial")]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub body: String,

    // Sem threadId o servidor deriva a conversa do contato
    pub thread_id: Option<String>,

    #[serde(default)]
    pub is_outbound: bool,

    pub priority: Option<MessagePriority>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessagePayload {
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub body: String,

    pub priority: Option<MessagePriority>,
}

// GET /api/inbox/messages
#[utoipa::path(
    get,
    path = "/api/inbox/messages",
    tag = "Inbox",
    responses((status = 200, description = "Mensagens, mais recentes primeiro", body = Vec<Message>)),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.inbox_service.list().await?;

    Ok((StatusCode::OK, Json(messages)))
}

// GET /api/inbox/messages/{id}
#[utoipa::path(
    get,
    path = "/api/inbox/messages/{id}",
    tag = "Inbox",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem", body = Message),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_message(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.inbox_service.get(id).await?;

    Ok((StatusCode::OK, Json(message)))
}

// POST /api/inbox/messages
#[utoipa::path(
    post,
    path = "/api/inbox/messages",
    tag = "Inbox",
    request_body = ComposeMessagePayload,
    responses(
        (status = 201, description = "Mensagem criada (não lida, com timestamp de agora)", body = Message),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn compose_message(
    State(app_state): State<AppState>,
    Json(payload): Json<ComposeMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let message = app_state
        .inbox_service
        .compose(
            payload.channel.unwrap_or(MessageChannel::Email),
            &payload.contact_name,
            payload.contact_email.as_deref(),
            payload.subject.as_deref(),
            &payload.body,
            payload.thread_id.as_deref(),
            payload.is_outbound,
            payload.priority.unwrap_or(MessagePriority::Normal),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

// PUT /api/inbox/messages/{id}
#[utoipa::path(
    put,
    path = "/api/inbox/messages/{id}",
    tag = "Inbox",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    request_body = UpdateMessagePayload,
    responses(
        (status = 200, description = "Mensagem atualizada", body = Message),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_message(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let message = app_state
        .inbox_service
        .update(
            id,
            payload.subject.as_deref(),
            &payload.body,
            payload.priority.unwrap_or(MessagePriority::Normal),
        )
        .await?;

    Ok((StatusCode::OK, Json(message)))
}

// DELETE /api/inbox/messages/{id}
#[utoipa::path(
    delete,
    path = "/api/inbox/messages/{id}",
    tag = "Inbox",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 204, description = "Mensagem removida"),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_message(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inbox_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/inbox/messages/{id}/read
#[utoipa::path(
    post,
    path = "/api/inbox/messages/{id}/read",
    tag = "Inbox",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem marcada como lida", body = Message),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_message_read(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.inbox_service.mark_as_read(id).await?;

    Ok((StatusCode::OK, Json(message)))
}

// GET /api/inbox/threads
#[utoipa::path(
    get,
    path = "/api/inbox/threads",
    tag = "Inbox",
    responses((status = 200, description = "Conversas agrupadas por thread", body = Vec<ThreadSummary>)),
    security(("api_jwt" = []))
)]
pub async fn list_threads(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let threads = app_state.inbox_service.threads().await?;

    Ok((StatusCode::OK, Json(threads)))
}

// GET /api/inbox/stats
#[utoipa::path(
    get,
    path = "/api/inbox/stats",
    tag = "Inbox",
    responses((status = 200, description = "Cards da caixa de entrada", body = InboxStats)),
    security(("api_jwt" = []))
)]
pub async fn inbox_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.inbox_service.stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}
