// src/models/documents.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Proposal,
    Contract,
    Invoice,
    Report,
    Other,
}

// Ciclo de vida: draft -> sent -> viewed -> signed; expired encerra o fluxo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "camelCase")]
pub enum DocumentStatus {
    Draft,
    Sent,
    Viewed,
    Signed,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub doc_type: DocumentKind,
    #[schema(example = "Proposta Comercial - Acme")]
    pub title: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub viewed_at: Option<DateTime<Utc>>,
}

// Contagem por status (os chips de filtro da tela de documentos)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub draft: i64,
    pub sent: i64,
    pub viewed: i64,
    pub signed: i64,
    pub expired: i64,
}
