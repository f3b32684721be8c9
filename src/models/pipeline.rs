// src/models/pipeline.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// Generaliza o "stage === closedWon" que o frontend fazia na mão:
// cada etapa carrega uma categoria e os relatórios perguntam pela categoria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stage_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "camelCase")]
pub enum StageCategory {
    Open,
    Won,
    Lost,
}

// --- Structs de Configuração ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Sales Pipeline")]
    pub name: String,
    #[schema(example = "#6366F1")]
    pub color: Option<String>,
    pub is_default: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    pub id: Uuid,
    pub pipeline_id: Uuid,
    // Slug estável usado pelos filtros do board ("new", "qualified", ...)
    #[schema(example = "qualified")]
    pub key: String,
    #[schema(example = "Qualified")]
    pub name: String,
    #[schema(example = "#8B5CF6")]
    pub color: Option<String>,
    #[schema(example = 2)]
    pub position: i32,
    pub category: StageCategory,
}

// --- Structs de Operação ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    #[schema(example = "Website Redesign")]
    pub name: String,
    #[schema(example = "Acme Corp")]
    pub company: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[schema(example = "12500.00")]
    pub value: Decimal,
    pub stage_id: Uuid,
    #[schema(example = "referral")]
    pub source: Option<String>,
    pub owner: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Uma coluna do board: a etapa mais a contagem e a soma de valor dos leads
// (o badge de contagem e o subtítulo em moeda do cabeçalho de cada coluna).
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageBoardEntry {
    pub stage_id: Uuid,
    pub key: String,
    pub name: String,
    pub color: Option<String>,
    pub position: i32,
    pub lead_count: i64,
    pub total_value: Decimal,
}
