// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "camelCase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    // Numeração sequencial amigável; `number` é derivado dela
    #[schema(example = 1024)]
    pub display_id: i32,
    #[schema(example = "INV-001024")]
    pub number: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_address: Option<String>,
    pub status: InvoiceStatus,
    #[schema(example = "1500.00")]
    pub subtotal: Decimal,
    #[schema(example = "0.00")]
    pub tax: Decimal,
    #[schema(example = "1500.00")]
    pub total: Decimal,
    #[schema(value_type = String, format = Date, example = "2026-09-30")]
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    #[schema(example = "Payment is due within 30 days")]
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    #[schema(example = "Consultoria (10h)")]
    pub description: String,
    #[schema(example = "10.0")]
    pub quantity: Decimal,
    #[schema(example = "150.00")]
    pub rate: Decimal,
    // Sempre quantity * rate; o servidor recalcula a cada escrita
    #[schema(example = "1500.00")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub header: Invoice,
    pub items: Vec<InvoiceItem>,
}

// Os quatro StatCards da tela de faturamento
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillingStats {
    pub total_revenue: Decimal,
    pub pending_amount: Decimal,
    pub overdue_amount: Decimal,
    pub invoice_count: i64,
}
