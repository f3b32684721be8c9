// src/handlers/pipeline.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::pipeline::{Lead, Pipeline, PipelineStage, StageBoardEntry, StageCategory},
};

// =============================================================================
//  ÁREA 1: FUNIS E ETAPAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipelinePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Sales Pipeline")]
    pub name: String,

    #[schema(example = "#6366F1")]
    pub color: Option<String>,

    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStagePayload {
    pub pipeline_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "qualified")]
    pub key: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Qualified")]
    pub name: String,

    #[schema(example = "#8B5CF6")]
    pub color: Option<String>,

    #[schema(example = 2)]
    pub position: i32,

    pub category: Option<StageCategory>,
}

// GET /api/pipeline/pipelines
#[utoipa::path(
    get,
    path = "/api/pipeline/pipelines",
    tag = "Pipeline",
    responses((status = 200, description = "Lista de funis", body = Vec<Pipeline>)),
    security(("api_jwt" = []))
)]
pub async fn list_pipelines(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pipelines = app_state.pipeline_service.list_pipelines().await?;

    Ok((StatusCode::OK, Json(pipelines)))
}

// POST /api/pipeline/pipelines
#[utoipa::path(
    post,
    path = "/api/pipeline/pipelines",
    tag = "Pipeline",
    request_body = CreatePipelinePayload,
    responses((status = 201, description = "Funil criado", body = Pipeline)),
    security(("api_jwt" = []))
)]
pub async fn create_pipeline(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePipelinePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pipeline = app_state
        .pipeline_service
        .create_pipeline(&payload.name, payload.color.as_deref(), payload.is_default)
        .await?;

    Ok((StatusCode::CREATED, Json(pipeline)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct StageListQuery {
    pub pipeline_id: Option<Uuid>,
}

// GET /api/pipeline/stages
#[utoipa::path(
    get,
    path = "/api/pipeline/stages",
    tag = "Pipeline",
    params(StageListQuery),
    responses((status = 200, description = "Etapas na ordem do funil", body = Vec<PipelineStage>)),
    security(("api_jwt" = []))
)]
pub async fn list_stages(
    State(app_state): State<AppState>,
    Query(query): Query<StageListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let stages = app_state
        .pipeline_service
        .list_stages(query.pipeline_id)
        .await?;

    Ok((StatusCode::OK, Json(stages)))
}

// POST /api/pipeline/stages
#[utoipa::path(
    post,
    path = "/api/pipeline/stages",
    tag = "Pipeline",
    request_body = CreateStagePayload,
    responses(
        (status = 201, description = "Etapa criada", body = PipelineStage),
        (status = 409, description = "Chave de etapa duplicada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_stage(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateStagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let stage = app_state
        .pipeline_service
        .create_stage(
            payload.pipeline_id,
            &payload.key,
            &payload.name,
            payload.color.as_deref(),
            payload.position,
            payload.category.unwrap_or(StageCategory::Open),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(stage)))
}

// =============================================================================
//  ÁREA 2: LEADS
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadListQuery {
    // Filtra pela chave da etapa ("new", "qualified", ...)
    pub stage: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Website Redesign")]
    pub name: String,

    #[schema(example = "Acme Corp")]
    pub company: Option<String>,

    pub contact_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub contact_email: Option<String>,

    pub contact_phone: Option<String>,

    #[serde(default)]
    #[schema(example = "12500.00")]
    pub value: Decimal,

    // Chave da etapa inicial; sem ela o lead cai na primeira etapa do funil padrão
    #[schema(example = "new")]
    pub stage: Option<String>,

    pub source: Option<String>,
    pub owner: Option<String>,

    #[schema(example = "hot, enterprise")]
    pub tags: Option<String>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub company: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub value: Decimal,
    pub source: Option<String>,
    pub owner: Option<String>,
    pub tags: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveLeadStagePayload {
    // Chave da etapa de destino do drop
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "negotiation")]
    pub stage: String,
}

// GET /api/pipeline/leads
#[utoipa::path(
    get,
    path = "/api/pipeline/leads",
    tag = "Pipeline",
    params(LeadListQuery),
    responses((status = 200, description = "Lista de leads", body = Vec<Lead>)),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state
        .pipeline_service
        .list_leads(query.stage.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(leads)))
}

// GET /api/pipeline/leads/{id}
#[utoipa::path(
    get,
    path = "/api/pipeline/leads/{id}",
    tag = "Pipeline",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.pipeline_service.get_lead(id).await?;

    Ok((StatusCode::OK, Json(lead)))
}

// POST /api/pipeline/leads
#[utoipa::path(
    post,
    path = "/api/pipeline/leads",
    tag = "Pipeline",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead criado", body = Lead),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state
        .pipeline_service
        .create_lead(
            &payload.name,
            payload.company.as_deref(),
            payload.contact_name.as_deref(),
            payload.contact_email.as_deref(),
            payload.contact_phone.as_deref(),
            payload.value,
            payload.stage.as_deref(),
            payload.source.as_deref(),
            payload.owner.as_deref(),
            payload.tags.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// PUT /api/pipeline/leads/{id}
#[utoipa::path(
    put,
    path = "/api/pipeline/leads/{id}",
    tag = "Pipeline",
    params(("id" = Uuid, Path, description = "ID do lead")),
    request_body = UpdateLeadPayload,
    responses(
        (status = 200, description = "Lead atualizado", body = Lead),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state
        .pipeline_service
        .update_lead(
            id,
            &payload.name,
            payload.company.as_deref(),
            payload.contact_name.as_deref(),
            payload.contact_email.as_deref(),
            payload.contact_phone.as_deref(),
            payload.value,
            payload.source.as_deref(),
            payload.owner.as_deref(),
            payload.tags.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/pipeline/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/pipeline/leads/{id}",
    tag = "Pipeline",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 204, description = "Lead removido"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.pipeline_service.delete_lead(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/pipeline/leads/{id}/stage
// O persist do drag-and-drop do board. Soltar na mesma etapa é no-op.
#[utoipa::path(
    patch,
    path = "/api/pipeline/leads/{id}/stage",
    tag = "Pipeline",
    params(("id" = Uuid, Path, description = "ID do lead")),
    request_body = MoveLeadStagePayload,
    responses(
        (status = 200, description = "Lead na nova etapa", body = Lead),
        (status = 404, description = "Lead ou etapa não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn move_lead_stage(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveLeadStagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state
        .pipeline_service
        .move_lead_stage(id, &payload.stage)
        .await?;

    Ok((StatusCode::OK, Json(lead)))
}

// GET /api/pipeline/board
#[utoipa::path(
    get,
    path = "/api/pipeline/board",
    tag = "Pipeline",
    responses((status = 200, description = "Colunas do board com contagem e soma", body = Vec<StageBoardEntry>)),
    security(("api_jwt" = []))
)]
pub async fn board(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.pipeline_service.board().await?;

    Ok((StatusCode::OK, Json(entries)))
}
