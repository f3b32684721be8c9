// src/handlers/contacts.rs

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
    models::contacts::{Contact, ContactStats, ContactStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    // Busca por substring em nome, empresa ou e-mail (case-insensitive)
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[schema(example = "Acme Corp")]
    pub company: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@acme.com")]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub status: Option<ContactStatus>,

    #[schema(example = "referral")]
    pub source: Option<String>,

    // Tags separadas por vírgula, como o formulário envia
    #[schema(example = "vip, enterprise")]
    pub tags: Option<String>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub company: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ContactStatus,
    pub source: Option<String>,
    pub tags: Option<String>,
    pub notes: Option<String>,
}

// GET /api/contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    params(ContactListQuery),
    responses((status = 200, description = "Lista de contatos", body = Vec<Contact>)),
    security(("api_jwt" = []))
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let contacts = app_state
        .contacts_service
        .list(query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(contacts)))
}

// GET /api/contacts/stats
#[utoipa::path(
    get,
    path = "/api/contacts/stats",
    tag = "Contacts",
    responses((status = 200, description = "Cards da tela de contatos", body = ContactStats)),
    security(("api_jwt" = []))
)]
pub async fn contact_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.contacts_service.stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/contacts/{id}
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID do contato")),
    responses(
        (status = 200, description = "Contato", body = Contact),
        (status = 404, description = "Contato não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_contact(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let contact = app_state.contacts_service.get(id).await?;

    Ok((StatusCode::OK, Json(contact)))
}

// POST /api/contacts
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    request_body = CreateContactPayload,
    responses(
        (status = 201, description = "Contato criado", body = Contact),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contact = app_state
        .contacts_service
        .create(
            &payload.name,
            payload.company.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.status.unwrap_or(ContactStatus::Pending),
            payload.source.as_deref(),
            payload.tags.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

// PUT /api/contacts/{id}
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID do contato")),
    request_body = UpdateContactPayload,
    responses(
        (status = 200, description = "Contato atualizado", body = Contact),
        (status = 404, description = "Contato não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let contact = app_state
        .contacts_service
        .update(
            id,
            &payload.name,
            payload.company.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.status,
            payload.source.as_deref(),
            payload.tags.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(contact)))
}

// DELETE /api/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path, description = "ID do contato")),
    responses(
        (status = 204, description = "Contato removido"),
        (status = 404, description = "Contato não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.contacts_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
