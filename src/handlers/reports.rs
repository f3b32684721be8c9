// src/handlers/reports.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::reports::{ReportSummary, RevenueByMonth, StageFunnelEntry},
};

// GET /api/reports/summary
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses((status = 200, description = "Métricas-chave: leads, ganhos, receita, ticket médio, conversão", body = ReportSummary)),
    security(("api_jwt" = []))
)]
pub async fn report_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.reports_service.summary().await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/reports/pipeline
#[utoipa::path(
    get,
    path = "/api/reports/pipeline",
    tag = "Reports",
    responses((status = 200, description = "Funil de conversão: leads por etapa", body = Vec<StageFunnelEntry>)),
    security(("api_jwt" = []))
)]
pub async fn pipeline_funnel(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.reports_service.stage_funnel().await?;

    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/reports/revenue
#[utoipa::path(
    get,
    path = "/api/reports/revenue",
    tag = "Reports",
    responses((status = 200, description = "Receita paga por mês (últimos 6 meses)", body = Vec<RevenueByMonth>)),
    security(("api_jwt" = []))
)]
pub async fn revenue_trend(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.reports_service.revenue_by_month().await?;

    Ok((StatusCode::OK, Json(entries)))
}
