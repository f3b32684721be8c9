// src/handlers/billing.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::billing::{BillingStats, Invoice, InvoiceDetail, InvoiceItem, InvoiceStatus},
    services::billing_service::InvoiceItemInput,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceListQuery {
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Consultoria (10h)")]
    pub description: String,

    #[schema(example = "10.0")]
    pub quantity: Decimal,

    #[schema(example = "150.00")]
    pub rate: Decimal,
}

impl InvoiceItemPayload {
    fn into_input(self) -> InvoiceItemInput {
        InvoiceItemInput {
            description: self.description,
            quantity: self.quantity,
            rate: self.rate,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub contact_name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@acme.com")]
    pub contact_email: String,

    pub contact_address: Option<String>,

    #[schema(value_type = String, format = Date, example = "2026-09-30")]
    pub due_date: NaiveDate,

    #[schema(example = "0.00")]
    pub tax: Option<Decimal>,

    pub notes: Option<String>,

    #[schema(example = "Payment is due within 30 days")]
    pub terms: Option<String>,

    pub items: Vec<InvoiceItemPayload>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoicePayload {
    #[validate(length(min = 1, message = "required"))]
    pub contact_name: String,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: String,

    pub contact_address: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,

    pub notes: Option<String>,
    pub terms: Option<String>,
}

// GET /api/billing/invoices
#[utoipa::path(
    get,
    path = "/api/billing/invoices",
    tag = "Billing",
    params(InvoiceListQuery),
    responses((status = 200, description = "Lista de faturas (vencidas já varridas para OVERDUE)", body = Vec<Invoice>)),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.billing_service.list(query.status).await?;

    Ok((StatusCode::OK, Json(invoices)))
}

// GET /api/billing/stats
#[utoipa::path(
    get,
    path = "/api/billing/stats",
    tag = "Billing",
    responses((status = 200, description = "Cards da tela de faturamento", body = BillingStats)),
    security(("api_jwt" = []))
)]
pub async fn billing_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.billing_service.stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/billing/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/billing/invoices/{id}",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura com itens", body = InvoiceDetail),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.billing_service.get_detail(id).await?;

    Ok((StatusCode::OK, Json(detail)))
}

// POST /api/billing/invoices
#[utoipa::path(
    post,
    path = "/api/billing/invoices",
    tag = "Billing",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura criada como rascunho, totais calculados no servidor", body = InvoiceDetail),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let items: Vec<InvoiceItemInput> = payload
        .items
        .into_iter()
        .map(InvoiceItemPayload::into_input)
        .collect();

    let detail = app_state
        .billing_service
        .create(
            &payload.contact_name,
            &payload.contact_email,
            payload.contact_address.as_deref(),
            payload.due_date,
            payload.tax.unwrap_or(Decimal::ZERO),
            payload.notes.as_deref(),
            payload.terms.as_deref(),
            items,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// PUT /api/billing/invoices/{id}
#[utoipa::path(
    put,
    path = "/api/billing/invoices/{id}",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = UpdateInvoicePayload,
    responses(
        (status = 200, description = "Cabeçalho atualizado", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let invoice = app_state
        .billing_service
        .update_header(
            id,
            &payload.contact_name,
            &payload.contact_email,
            payload.contact_address.as_deref(),
            payload.due_date,
            payload.notes.as_deref(),
            payload.terms.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(invoice)))
}

// DELETE /api/billing/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/billing/invoices/{id}",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 204, description = "Fatura removida"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ITENS (toda escrita recalcula amount e totais no servidor)
// =============================================================================

// POST /api/billing/invoices/{id}/items
#[utoipa::path(
    post,
    path = "/api/billing/invoices/{id}/items",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = InvoiceItemPayload,
    responses(
        (status = 201, description = "Item adicionado; fatura com totais recalculados", body = InvoiceDetailWithItem),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_invoice_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoiceItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (invoice, item) = app_state
        .billing_service
        .add_item(id, payload.into_input())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InvoiceDetailWithItem { invoice, item }),
    ))
}

// PUT /api/billing/invoices/{id}/items/{item_id}
#[utoipa::path(
    put,
    path = "/api/billing/invoices/{id}/items/{item_id}",
    tag = "Billing",
    params(
        ("id" = Uuid, Path, description = "ID da fatura"),
        ("item_id" = Uuid, Path, description = "ID do item")
    ),
    request_body = InvoiceItemPayload,
    responses(
        (status = 200, description = "Item editado; fatura com totais recalculados", body = InvoiceDetailWithItem),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_invoice_item(
    State(app_state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<InvoiceItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (invoice, item) = app_state
        .billing_service
        .update_item(id, item_id, payload.into_input())
        .await?;

    Ok((StatusCode::OK, Json(InvoiceDetailWithItem { invoice, item })))
}

// DELETE /api/billing/invoices/{id}/items/{item_id}
#[utoipa::path(
    delete,
    path = "/api/billing/invoices/{id}/items/{item_id}",
    tag = "Billing",
    params(
        ("id" = Uuid, Path, description = "ID da fatura"),
        ("item_id" = Uuid, Path, description = "ID do item")
    ),
    responses(
        (status = 200, description = "Item removido; fatura com totais recalculados", body = Invoice),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice_item(
    State(app_state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.delete_item(id, item_id).await?;

    Ok((StatusCode::OK, Json(invoice)))
}

// Resposta das escritas de item: o cabeçalho recalculado mais o item salvo
#[derive(Debug, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetailWithItem {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub item: InvoiceItem,
}

// =============================================================================
//  STATUS
// =============================================================================

// POST /api/billing/invoices/{id}/send
#[utoipa::path(
    post,
    path = "/api/billing/invoices/{id}/send",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura enviada (draft -> pending)", body = Invoice),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.send(id).await?;

    Ok((StatusCode::OK, Json(invoice)))
}

// POST /api/billing/invoices/{id}/pay
#[utoipa::path(
    post,
    path = "/api/billing/invoices/{id}/pay",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura quitada (carimba paidAt)", body = Invoice),
        (status = 409, description = "Transição inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.pay(id).await?;

    Ok((StatusCode::OK, Json(invoice)))
}

// GET /api/billing/invoices/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/billing/invoices/{id}/pdf",
    tag = "Billing",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "PDF da fatura", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Fatura não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn invoice_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state.invoice_pdf_service.generate_invoice_pdf(id).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        pdf,
    ))
}
