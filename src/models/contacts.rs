// src/models/contacts.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE contact_status do banco.
// No JSON os valores ficam como o frontend espera ("Active", "Inactive", "Pending").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contact_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: ContactStatus,
    pub source: Option<String>,

    // Tags simples (Array de Strings).
    // No Postgres é TEXT[], no Rust é Vec<String>
    pub tags: Option<Vec<String>>,

    pub notes: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Os três StatCards da tela de contatos
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactStats {
    pub total: i64,
    pub active: i64,
    // Contatos com atividade nos últimos 30 dias
    pub recent: i64,
}
