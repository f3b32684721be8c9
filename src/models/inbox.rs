// src/models/inbox.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_channel", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "camelCase")]
pub enum MessageChannel {
    Email,
    Linkedin,
    Whatsapp,
    Facebook,
    Instagram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_priority", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "camelCase")]
pub enum MessagePriority {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub channel: MessageChannel,
    pub contact_name: String,
    pub contact_email: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    // Chave de agrupamento das conversas com um contato
    pub thread_id: String,
    pub is_outbound: bool,
    pub priority: MessagePriority,
}

// Uma conversa agrupada: a última mensagem mais os contadores.
// Montada em memória pelo service, do mesmo jeito que a SPA agrupava.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub thread_id: String,
    pub contact_name: String,
    pub channel: MessageChannel,
    pub message_count: usize,
    pub unread_count: usize,
    pub last_message: Message,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxStats {
    pub total: i64,
    pub unread: i64,
    // Mensagens recebidas desde a meia-noite de hoje
    pub today: i64,
}
