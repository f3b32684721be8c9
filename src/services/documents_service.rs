// src/services/documents_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        retry::{self, RetryPolicy},
    },
    db::DocumentRepository,
    models::documents::{Document, DocumentKind, DocumentStats, DocumentStatus},
};

/// Ciclo de vida só anda para frente: draft -> sent -> viewed -> signed.
/// Qualquer documento não assinado pode expirar; assinado e expirado são finais.
pub fn transition_allowed(current: DocumentStatus, next: DocumentStatus) -> bool {
    use DocumentStatus::*;

    matches!(
        (current, next),
        (Draft, Sent)
            | (Sent, Viewed)
            | (Sent, Signed)
            | (Viewed, Signed)
            | (Draft, Expired)
            | (Sent, Expired)
            | (Viewed, Expired)
    )
}

#[derive(Clone)]
pub struct DocumentsService {
    repo: DocumentRepository,
    retry: RetryPolicy,
}

impl DocumentsService {
    pub fn new(repo: DocumentRepository) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    pub async fn list(
        &self,
        doc_type: Option<DocumentKind>,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<Document>, AppError> {
        retry::with_backoff(self.retry, || self.repo.list(doc_type, status)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Document, AppError> {
        retry::with_backoff(self.retry, || self.repo.find_by_id(id))
            .await?
            .ok_or(AppError::DocumentNotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        doc_type: DocumentKind,
        title: &str,
        contact_name: Option<&str>,
        contact_email: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
    ) -> Result<Document, AppError> {
        self.repo
            .create(doc_type, title, contact_name, contact_email, description, content)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        doc_type: DocumentKind,
        title: &str,
        contact_name: Option<&str>,
        contact_email: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
    ) -> Result<Document, AppError> {
        self.repo
            .update(id, doc_type, title, contact_name, contact_email, description, content)
            .await?
            .ok_or(AppError::DocumentNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::DocumentNotFound);
        }
        Ok(())
    }

    /// send / view / sign / expire passam todos por aqui.
    pub async fn transition(&self, id: Uuid, next: DocumentStatus) -> Result<Document, AppError> {
        let document = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::DocumentNotFound)?;

        if !transition_allowed(document.status, next) {
            return Err(AppError::InvalidStatusTransition(format!(
                "Documento não pode ir de {:?} para {:?}.",
                document.status, next
            )));
        }

        self.repo
            .transition(id, next)
            .await?
            .ok_or(AppError::DocumentNotFound)
    }

    pub async fn stats(&self) -> Result<DocumentStats, AppError> {
        retry::with_backoff(self.retry, || self.repo.stats()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DocumentStatus::*;

    #[test]
    fn lifecycle_moves_forward_only() {
        assert!(transition_allowed(Draft, Sent));
        assert!(transition_allowed(Sent, Viewed));
        assert!(transition_allowed(Viewed, Signed));
        assert!(transition_allowed(Sent, Signed));

        assert!(!transition_allowed(Sent, Draft));
        assert!(!transition_allowed(Signed, Sent));
        assert!(!transition_allowed(Viewed, Sent));
    }

    #[test]
    fn signed_documents_cannot_expire() {
        assert!(transition_allowed(Draft, Expired));
        assert!(transition_allowed(Viewed, Expired));
        assert!(!transition_allowed(Signed, Expired));
        assert!(!transition_allowed(Expired, Sent));
    }
}
