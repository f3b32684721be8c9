// src/services/pipeline_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        retry::{self, RetryPolicy},
    },
    db::PipelineRepository,
    models::pipeline::{Lead, Pipeline, PipelineStage, StageBoardEntry, StageCategory},
    services::contacts_service::parse_tags,
};

/// Regra do drop no board: soltar o lead na etapa em que ele já está
/// é um no-op (nada é persistido, nem o carimbo de atividade).
pub fn needs_stage_move(lead: &Lead, target_stage_id: Uuid) -> bool {
    lead.stage_id != target_stage_id
}

#[derive(Clone)]
pub struct PipelineService {
    repo: PipelineRepository,
    retry: RetryPolicy,
}

impl PipelineService {
    pub fn new(repo: PipelineRepository) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    // =========================================================================
    //  FUNIS E ETAPAS
    // =========================================================================

    pub async fn list_pipelines(&self) -> Result<Vec<Pipeline>, AppError> {
        retry::with_backoff(self.retry, || self.repo.list_pipelines()).await
    }

    pub async fn create_pipeline(
        &self,
        name: &str,
        color: Option<&str>,
        is_default: bool,
    ) -> Result<Pipeline, AppError> {
        self.repo.create_pipeline(name, color, is_default).await
    }

    pub async fn list_stages(&self, pipeline_id: Option<Uuid>) -> Result<Vec<PipelineStage>, AppError> {
        retry::with_backoff(self.retry, || self.repo.list_stages(pipeline_id)).await
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
        self.repo
            .create_stage(pipeline_id, key, name, color, position, category)
            .await
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn list_leads(&self, stage_key: Option<&str>) -> Result<Vec<Lead>, AppError> {
        retry::with_backoff(self.retry, || self.repo.list_leads(stage_key)).await
    }

    pub async fn get_lead(&self, id: Uuid) -> Result<Lead, AppError> {
        retry::with_backoff(self.retry, || self.repo.find_lead_by_id(id))
            .await?
            .ok_or(AppError::LeadNotFound)
    }

    /// Cria o lead já com `last_activity = agora`. Sem etapa informada,
    /// o lead entra na primeira etapa do funil padrão.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_lead(
        &self,
        name: &str,
        company: Option<&str>,
        contact_name: Option<&str>,
        contact_email: Option<&str>,
        contact_phone: Option<&str>,
        value: Decimal,
        stage_key: Option<&str>,
        source: Option<&str>,
        owner: Option<&str>,
        tags: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Lead, AppError> {
        let stage = match stage_key {
            Some(key) => self
                .repo
                .find_stage_by_key(key)
                .await?
                .ok_or(AppError::StageNotFound)?,
            None => self
                .repo
                .default_first_stage()
                .await?
                .ok_or(AppError::PipelineNotFound)?,
        };

        let parsed_tags = tags.map(parse_tags);

        self.repo
            .create_lead(
                name,
                company,
                contact_name,
                contact_email,
                contact_phone,
                value,
                stage.id,
                source,
                owner,
                parsed_tags.as_deref(),
                notes,
            )
            .await
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
        tags: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Lead, AppError> {
        let parsed_tags = tags.map(parse_tags);

        self.repo
            .update_lead(
                id,
                name,
                company,
                contact_name,
                contact_email,
                contact_phone,
                value,
                source,
                owner,
                parsed_tags.as_deref(),
                notes,
            )
            .await?
            .ok_or(AppError::LeadNotFound)
    }

    pub async fn delete_lead(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_lead(id).await?;
        if deleted == 0 {
            return Err(AppError::LeadNotFound);
        }
        Ok(())
    }

    /// O persist do drag-and-drop. Devolve o lead atualizado para o
    /// update otimista do cliente; no-op quando a etapa não muda.
    pub async fn move_lead_stage(&self, lead_id: Uuid, stage_key: &str) -> Result<Lead, AppError> {
        let stage = self
            .repo
            .find_stage_by_key(stage_key)
            .await?
            .ok_or(AppError::StageNotFound)?;

        let lead = self
            .repo
            .find_lead_by_id(lead_id)
            .await?
            .ok_or(AppError::LeadNotFound)?;

        if !needs_stage_move(&lead, stage.id) {
            return Ok(lead);
        }

        self.repo
            .update_lead_stage(lead_id, stage.id, Utc::now())
            .await?
            .ok_or(AppError::LeadNotFound)
    }

    pub async fn board(&self) -> Result<Vec<StageBoardEntry>, AppError> {
        retry::with_backoff(self.retry, || self.repo.board_summary()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn lead_in_stage(stage_id: Uuid) -> Lead {
        let now = Utc::now();
        Lead {
            id: Uuid::new_v4(),
            name: "Website Redesign".to_string(),
            company: Some("Acme Corp".to_string()),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            value: Decimal::new(12_500_00, 2),
            stage_id,
            source: None,
            owner: None,
            tags: None,
            notes: None,
            last_activity: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn dropping_on_same_stage_is_noop() {
        let stage = Uuid::new_v4();
        let lead = lead_in_stage(stage);
        assert!(!needs_stage_move(&lead, stage));
    }

    #[test]
    fn dropping_on_other_stage_moves() {
        let lead = lead_in_stage(Uuid::new_v4());
        assert!(needs_stage_move(&lead, Uuid::new_v4()));
    }
}
