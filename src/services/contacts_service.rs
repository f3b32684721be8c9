// src/services/contacts_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        retry::{self, RetryPolicy},
    },
    db::ContactRepository,
    models::contacts::{Contact, ContactStats, ContactStatus},
};

/// Quebra a string de tags do formulário ("vip, 2026, enterprise")
/// em uma lista limpa: separa por vírgula, apara espaços, descarta vazios.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone)]
pub struct ContactsService {
    repo: ContactRepository,
    retry: RetryPolicy,
}

impl ContactsService {
    pub fn new(repo: ContactRepository) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    /// Busca por substring (case-insensitive) em nome, empresa ou e-mail.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Contact>, AppError> {
        retry::with_backoff(self.retry, || self.repo.list(query)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Contact, AppError> {
        retry::with_backoff(self.retry, || self.repo.find_by_id(id))
            .await?
            .ok_or(AppError::ContactNotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        company: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        status: ContactStatus,
        source: Option<&str>,
        tags: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Contact, AppError> {
        let parsed_tags = tags.map(parse_tags);

        self.repo
            .create(
                name,
                company,
                email,
                phone,
                status,
                source,
                parsed_tags.as_deref(),
                notes,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        company: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        status: ContactStatus,
        source: Option<&str>,
        tags: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Contact, AppError> {
        let parsed_tags = tags.map(parse_tags);

        self.repo
            .update(
                id,
                name,
                company,
                email,
                phone,
                status,
                source,
                parsed_tags.as_deref(),
                notes,
            )
            .await?
            .ok_or(AppError::ContactNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::ContactNotFound);
        }
        Ok(())
    }

    pub async fn stats(&self) -> Result<ContactStats, AppError> {
        retry::with_backoff(self.retry, || self.repo.stats()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(
            parse_tags("vip, enterprise ,  2026"),
            vec!["vip", "enterprise", "2026"]
        );
    }

    #[test]
    fn parse_tags_drops_empty_entries() {
        assert_eq!(parse_tags("vip,,  ,hot"), vec!["vip", "hot"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }
}
