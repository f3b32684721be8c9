// src/db/contact_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contacts::{Contact, ContactStats, ContactStatus},
};

#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lista os contatos; `query` filtra por substring (case-insensitive)
    /// em nome, empresa ou e-mail.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Contact>, AppError> {
        let contacts = match query {
            Some(term) if !term.is_empty() => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Contact>(
                    r#"
                    SELECT * FROM contacts
                    WHERE name ILIKE $1
                       OR company ILIKE $1
                       OR email ILIKE $1
                    ORDER BY name ASC
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY name ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(contacts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
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
        tags: Option<&[String]>,
        notes: Option<&str>,
    ) -> Result<Contact, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, company, email, phone, status, source, tags, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(company)
        .bind(email)
        .bind(phone)
        .bind(status)
        .bind(source)
        .bind(tags)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
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
        tags: Option<&[String]>,
        notes: Option<&str>,
    ) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET name = $2, company = $3, email = $4, phone = $5,
                status = $6, source = $7, tags = $8, notes = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(company)
        .bind(email)
        .bind(phone)
        .bind(status)
        .bind(source)
        .bind(tags)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // Os três cards da tela: total, ativos e com atividade nos últimos 30 dias
    pub async fn stats(&self) -> Result<ContactStats, AppError> {
        let stats = sqlx::query_as::<_, ContactStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'ACTIVE') AS active,
                COUNT(*) FILTER (WHERE last_activity >= NOW() - INTERVAL '30 days') AS recent
            FROM contacts
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
