// src/db/document_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::documents::{Document, DocumentKind, DocumentStats, DocumentStatus},
};

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        doc_type: Option<DocumentKind>,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<Document>, AppError> {
        // Filtros opcionais dos chips da tela; NULL desliga o filtro.
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT * FROM documents
            WHERE ($1::document_kind IS NULL OR doc_type = $1)
              AND ($2::document_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(doc_type)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
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
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (doc_type, title, contact_name, contact_email, description, content)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(doc_type)
        .bind(title)
        .bind(contact_name)
        .bind(contact_email)
        .bind(description)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
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
    ) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET doc_type = $2, title = $3, contact_name = $4,
                contact_email = $5, description = $6, content = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(doc_type)
        .bind(title)
        .bind(contact_name)
        .bind(contact_email)
        .bind(description)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Aplica o novo status carimbando sent_at/viewed_at quando for o caso.
    /// A validação da transição acontece no service.
    pub async fn transition(
        &self,
        id: Uuid,
        status: DocumentStatus,
    ) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents
            SET status = $2,
                sent_at = CASE WHEN $2 = 'SENT'::document_status THEN NOW() ELSE sent_at END,
                viewed_at = CASE WHEN $2 = 'VIEWED'::document_status THEN NOW() ELSE viewed_at END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    pub async fn stats(&self) -> Result<DocumentStats, AppError> {
        let stats = sqlx::query_as::<_, DocumentStats>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'DRAFT') AS draft,
                COUNT(*) FILTER (WHERE status = 'SENT') AS sent,
                COUNT(*) FILTER (WHERE status = 'VIEWED') AS viewed,
                COUNT(*) FILTER (WHERE status = 'SIGNED') AS signed,
                COUNT(*) FILTER (WHERE status = 'EXPIRED') AS expired
            FROM documents
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
