// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::settings::{CrmSettings, UpdateSettingsRequest},
};

// GET /api/settings
// Sem linha salva ainda, devolve o padrão com o idioma do Accept-Language.
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses((status = 200, description = "Configurações do workspace", body = CrmSettings)),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state
        .settings_repo
        .get()
        .await?
        .unwrap_or_else(|| CrmSettings::defaults(&locale.0));

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsRequest,
    responses((status = 200, description = "Configurações salvas", body = CrmSettings)),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.settings_repo.upsert(payload).await?;

    Ok((StatusCode::OK, Json(updated)))
}
