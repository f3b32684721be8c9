// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::documents::{Document, DocumentKind, DocumentStats, DocumentStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentListQuery {
    // Os chips de filtro da tela: por tipo e/ou por status
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentKind>,
    pub status: Option<DocumentStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentPayload {
    pub doc_type: Option<DocumentKind>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Proposta Comercial - Acme")]
    pub title: String,

    pub contact_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: Option<String>,

    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentPayload {
    pub doc_type: DocumentKind,

    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    pub contact_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: Option<String>,

    pub description: Option<String>,
    pub content: Option<String>,
}

// GET /api/documents
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    params(DocumentListQuery),
    responses((status = 200, description = "Lista de documentos", body = Vec<Document>)),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let documents = app_state
        .documents_service
        .list(query.doc_type, query.status)
        .await?;

    Ok((StatusCode::OK, Json(documents)))
}

// GET /api/documents/stats
#[utoipa::path(
    get,
    path = "/api/documents/stats",
    tag = "Documents",
    responses((status = 200, description = "Contagem por status", body = DocumentStats)),
    security(("api_jwt" = []))
)]
pub async fn document_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.documents_service.stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/documents/{id}
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "Documento", body = Document),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state.documents_service.get(id).await?;

    Ok((StatusCode::OK, Json(document)))
}

// POST /api/documents
#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = CreateDocumentPayload,
    responses(
        (status = 201, description = "Documento criado como rascunho", body = Document),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_document(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let document = app_state
        .documents_service
        .create(
            payload.doc_type.unwrap_or(DocumentKind::Other),
            &payload.title,
            payload.contact_name.as_deref(),
            payload.contact_email.as_deref(),
            payload.description.as_deref(),
            payload.content.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

// PUT /api/documents/{id}
#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    request_body = UpdateDocumentPayload,
    responses(
        (status = 200, description = "Documento atualizado", body = Document),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let document = app_state
        .documents_service
        .update(
            id,
            payload.doc_type,
            &payload.title,
            payload.contact_name.as_deref(),
            payload.contact_email.as_deref(),
            payload.description.as_deref(),
            payload.content.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(document)))
}

// DELETE /api/documents/{id}
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 204, description = "Documento removido"),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.documents_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// As quatro transições do ciclo de vida. O service valida a ordem.

// POST /api/documents/{id}/send
#[utoipa::path(
    post,
    path = "/api/documents/{id}/send",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "Documento enviado (carimba sentAt)", body = Document),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state
        .documents_service
        .transition(id, DocumentStatus::Sent)
        .await?;

    Ok((StatusCode::OK, Json(document)))
}

// POST /api/documents/{id}/view
#[utoipa::path(
    post,
    path = "/api/documents/{id}/view",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "Documento visualizado (carimba viewedAt)", body = Document),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn view_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state
        .documents_service
        .transition(id, DocumentStatus::Viewed)
        .await?;

    Ok((StatusCode::OK, Json(document)))
}

// POST /api/documents/{id}/sign
#[utoipa::path(
    post,
    path = "/api/documents/{id}/sign",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "Documento assinado", body = Document),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn sign_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state
        .documents_service
        .transition(id, DocumentStatus::Signed)
        .await?;

    Ok((StatusCode::OK, Json(document)))
}

// POST /api/documents/{id}/expire
#[utoipa::path(
    post,
    path = "/api/documents/{id}/expire",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "Documento expirado", body = Document),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn expire_document(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state
        .documents_service
        .transition(id, DocumentStatus::Expired)
        .await?;

    Ok((StatusCode::OK, Json(document)))
}
