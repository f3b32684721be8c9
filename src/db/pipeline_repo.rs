// src/db/pipeline_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::pipeline::{Lead, Pipeline, PipelineStage, StageBoardEntry, StageCategory},
};

#[derive(Clone)]
pub struct PipelineRepository {
    pool: PgPool,
}

impl PipelineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FUNIS E ETAPAS
    // =========================================================================

    pub async fn list_pipelines(&self) -> Result<Vec<Pipeline>, AppError> {
        let pipelines =
            sqlx::query_as::<_, Pipeline>("SELECT * FROM pipelines ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(pipelines)
    }

    pub async fn create_pipeline(
        &self,
        name: &str,
        color: Option<&str>,
        is_default: bool,
    ) -> Result<Pipeline, AppError> {
        let pipeline = sqlx::query_as::<_, Pipeline>(
            r#"
            INSERT INTO pipelines (name, color, is_default)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(color)
        .bind(is_default)
        .fetch_one(&self.pool)
        .await?;

        Ok(pipeline)
    }

    pub async fn list_stages(&self, pipeline_id: Option<Uuid>) -> Result<Vec<PipelineStage>, AppError> {
        let stages = match pipeline_id {
            Some(pid) => {
                sqlx::query_as::<_, PipelineStage>(
                    "SELECT * FROM pipeline_stages WHERE pipeline_id = $1 ORDER BY position ASC",
                )
                .bind(pid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PipelineStage>(
                    "SELECT * FROM pipeline_stages ORDER BY position ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(stages)
    }

    pub async fn create_stage(
        &self,
        pipeline_id: Uuid,
        key: &str,
        name: &str,
        color: Option<&str>,
        position: i32,
        category: StageCategory,
    ) -> Result<PipelineStage, AppError> {
        let stage = sqlx::query_as::<_, PipelineStage>(
            r#"
            INSERT INTO pipeline_stages (pipeline_id, key, name, color, position, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(pipeline_id)
        .bind(key)
        .bind(name)
        .bind(color)
        .bind(position)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "A etapa '{}' já existe.",
                        key
                    ));
                }
            }
            e.into()
        })?;

        Ok(stage)
    }

    pub async fn find_stage_by_key(&self, key: &str) -> Result<Option<PipelineStage>, AppError> {
        let stage =
            sqlx::query_as::<_, PipelineStage>("SELECT * FROM pipeline_stages WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(stage)
    }

    /// Primeira etapa do funil padrão; destino dos leads criados sem etapa.
    pub async fn default_first_stage(&self) -> Result<Option<PipelineStage>, AppError> {
        let stage = sqlx::query_as::<_, PipelineStage>(
            r#"
            SELECT s.* FROM pipeline_stages s
            JOIN pipelines p ON s.pipeline_id = p.id
            WHERE p.is_default = TRUE
            ORDER BY s.position ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(stage)
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn list_leads(&self, stage_key: Option<&str>) -> Result<Vec<Lead>, AppError> {
        let leads = match stage_key {
            Some(key) => {
                sqlx::query_as::<_, Lead>(
                    r#"
                    SELECT l.* FROM leads l
                    JOIN pipeline_stages s ON l.stage_id = s.id
                    WHERE s.key = $1
                    ORDER BY l.last_activity DESC
                    "#,
                )
                .bind(key)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY last_activity DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(leads)
    }

    pub async fn find_lead_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lead)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_lead(
        &self,
        name: &str,
        company: Option<&str>,
        contact_name: Option<&str>,
        contact_email: Option<&str>,
        contact_phone: Option<&str>,
        value: Decimal,
        stage_id: Uuid,
        source: Option<&str>,
        owner: Option<&str>,
        tags: Option<&[String]>,
        notes: Option<&str>,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                name, company, contact_name, contact_email, contact_phone,
                value, stage_id, source, owner, tags, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(company)
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(value)
        .bind(stage_id)
        .bind(source)
        .bind(owner)
        .bind(tags)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_lead(
        &self,
        id: Uuid,
        name: &str,
        company: Option<&str>,
        contact_name: Option<&str>,
        contact_email: Option<&str>,
        contact_phone: Option<&str>,
        value: Decimal,
        source: Option<&str>,
        owner: Option<&str>,
        tags: Option<&[String]>,
        notes: Option<&str>,
    ) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET name = $2, company = $3, contact_name = $4, contact_email = $5,
                contact_phone = $6, value = $7, source = $8, owner = $9,
                tags = $10, notes = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(company)
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(value)
        .bind(source)
        .bind(owner)
        .bind(tags)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }

    pub async fn delete_lead(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Persiste o drop do board: nova etapa + carimbo de atividade.
    pub async fn update_lead_stage(
        &self,
        id: Uuid,
        stage_id: Uuid,
        last_activity: DateTime<Utc>,
    ) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET stage_id = $2, last_activity = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(stage_id)
        .bind(last_activity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }

    // Cabeçalho de cada coluna do board: contagem + soma de valor por etapa
    pub async fn board_summary(&self) -> Result<Vec<StageBoardEntry>, AppError> {
        let entries = sqlx::query_as::<_, StageBoardEntry>(
            r#"
            SELECT
                s.id AS stage_id, s.key, s.name, s.color, s.position,
                COUNT(l.id) AS lead_count,
                COALESCE(SUM(l.value), 0) AS total_value
            FROM pipeline_stages s
            LEFT JOIN leads l ON l.stage_id = s.id
            GROUP BY s.id, s.key, s.name, s.color, s.position
            ORDER BY s.position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
