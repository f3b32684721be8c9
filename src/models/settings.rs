// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Linha única de configurações do workspace
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrmSettings {
    #[schema(example = "FlowCRM Inc.")]
    pub company_name: Option<String>,

    #[schema(example = "https://flowcrm.com")]
    pub website: Option<String>,

    #[schema(example = "+1 (555) 123-4567")]
    pub phone: Option<String>,

    #[schema(example = "info@flowcrm.com")]
    pub email: Option<String>,

    #[schema(example = "en")]
    pub language: String,

    #[schema(example = "UTC")]
    pub timezone: String,

    pub updated_at: Option<DateTime<Utc>>,
}

impl CrmSettings {
    // Padrão usado quando a linha ainda não existe; o idioma vem do
    // Accept-Language da requisição.
    pub fn defaults(language: &str) -> Self {
        Self {
            company_name: None,
            website: None,
            phone: None,
            email: None,
            language: language.to_string(),
            timezone: "UTC".to_string(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[schema(example = "FlowCRM Inc.")]
    pub company_name: Option<String>,

    #[schema(example = "https://flowcrm.com")]
    pub website: Option<String>,

    pub phone: Option<String>,

    pub email: Option<String>,

    #[schema(example = "es")]
    pub language: Option<String>,

    #[schema(example = "America/New_York")]
    pub timezone: Option<String>,
}
