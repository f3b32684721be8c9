// src/db/message_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inbox::{InboxStats, Message, MessageChannel, MessagePriority},
};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mais recentes primeiro, como a caixa de entrada exibe.
    pub async fn list(&self) -> Result<Vec<Message>, AppError> {
        let messages =
            sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY timestamp DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(messages)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        channel: MessageChannel,
        contact_name: &str,
        contact_email: Option<&str>,
        subject: Option<&str>,
        body: &str,
        thread_id: &str,
        is_outbound: bool,
        priority: MessagePriority,
    ) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                channel, contact_name, contact_email, subject, body,
                thread_id, is_outbound, priority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(channel)
        .bind(contact_name)
        .bind(contact_email)
        .bind(subject)
        .bind(body)
        .bind(thread_id)
        .bind(is_outbound)
        .bind(priority)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn update(
        &self,
        id: Uuid,
        subject: Option<&str>,
        body: &str,
        priority: MessagePriority,
    ) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages
            SET subject = $2, body = $3, priority = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(subject)
        .bind(body)
        .bind(priority)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Idempotente: marcar lida uma mensagem já lida não muda nada.
    pub async fn mark_as_read(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let message = sqlx::query_as::<_, Message>(
            "UPDATE messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn stats(&self) -> Result<InboxStats, AppError> {
        let stats = sqlx::query_as::<_, InboxStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE NOT is_read) AS unread,
                COUNT(*) FILTER (WHERE timestamp >= date_trunc('day', NOW())) AS today
            FROM messages
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
