// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::settings::{CrmSettings, UpdateSettingsRequest},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Busca a linha única; `None` quando o workspace ainda não salvou nada.
    pub async fn get(&self) -> Result<Option<CrmSettings>, AppError> {
        let settings = sqlx::query_as::<_, CrmSettings>(
            r#"
            SELECT company_name, website, phone, email, language, timezone, updated_at
            FROM crm_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    /// UPSERT (Insert or Update). Campos ausentes no payload preservam o valor atual.
    pub async fn upsert(&self, input: UpdateSettingsRequest) -> Result<CrmSettings, AppError> {
        let settings = sqlx::query_as::<_, CrmSettings>(
            r#"
            INSERT INTO crm_settings (id, company_name, website, phone, email, language, timezone, updated_at)
            VALUES (1, $1, $2, $3, $4, COALESCE($5, 'en'), COALESCE($6, 'UTC'), NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                company_name = COALESCE(EXCLUDED.company_name, crm_settings.company_name),
                website = COALESCE(EXCLUDED.website, crm_settings.website),
                phone = COALESCE(EXCLUDED.phone, crm_settings.phone),
                email = COALESCE(EXCLUDED.email, crm_settings.email),
                language = COALESCE($5, crm_settings.language),
                timezone = COALESCE($6, crm_settings.timezone),
                updated_at = NOW()
            RETURNING company_name, website, phone, email, language, timezone, updated_at
            "#,
        )
        .bind(input.company_name)
        .bind(input.website)
        .bind(input.phone)
        .bind(input.email)
        .bind(input.language)
        .bind(input.timezone)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
