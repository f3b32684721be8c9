// src/services/inbox_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        retry::{self, RetryPolicy},
    },
    db::MessageRepository,
    models::inbox::{InboxStats, Message, MessageChannel, MessagePriority, ThreadSummary},
};

/// Chave de conversa quando o compose não informa uma: o e-mail do contato
/// (ou o nome, na falta dele), normalizado.
pub fn derive_thread_id(contact_email: Option<&str>, contact_name: &str) -> String {
    contact_email
        .filter(|email| !email.trim().is_empty())
        .unwrap_or(contact_name)
        .trim()
        .to_lowercase()
}

/// Agrupa a lista (já ordenada do mais novo para o mais antigo) por thread,
/// do mesmo jeito que a SPA agrupava em memória: a primeira mensagem vista
/// de cada thread é a mais recente e vira o cabeçalho da conversa.
pub fn group_threads(messages: &[Message]) -> Vec<ThreadSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut by_thread: HashMap<String, ThreadSummary> = HashMap::new();

    for message in messages {
        match by_thread.get_mut(&message.thread_id) {
            Some(summary) => {
                summary.message_count += 1;
                if !message.is_read {
                    summary.unread_count += 1;
                }
            }
            None => {
                order.push(message.thread_id.clone());
                by_thread.insert(
                    message.thread_id.clone(),
                    ThreadSummary {
                        thread_id: message.thread_id.clone(),
                        contact_name: message.contact_name.clone(),
                        channel: message.channel,
                        message_count: 1,
                        unread_count: if message.is_read { 0 } else { 1 },
                        last_message: message.clone(),
                    },
                );
            }
        }
    }

    order
        .into_iter()
        .filter_map(|thread_id| by_thread.remove(&thread_id))
        .collect()
}

#[derive(Clone)]
pub struct InboxService {
    repo: MessageRepository,
    retry: RetryPolicy,
}

impl InboxService {
    pub fn new(repo: MessageRepository) -> Self {
        Self {
            repo,
            retry: RetryPolicy::default(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Message>, AppError> {
        retry::with_backoff(self.retry, || self.repo.list()).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Message, AppError> {
        retry::with_backoff(self.retry, || self.repo.find_by_id(id))
            .await?
            .ok_or(AppError::MessageNotFound)
    }

    /// Compose: a mensagem nasce agora, não lida.
    #[allow(clippy::too_many_arguments)]
    pub async fn compose(
        &self,
        channel: MessageChannel,
        contact_name: &str,
        contact_email: Option<&str>,
        subject: Option<&str>,
        body: &str,
        thread_id: Option<&str>,
        is_outbound: bool,
        priority: MessagePriority,
    ) -> Result<Message, AppError> {
        let thread = match thread_id {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => derive_thread_id(contact_email, contact_name),
        };

        self.repo
            .create(
                channel,
                contact_name,
                contact_email,
                subject,
                body,
                &thread,
                is_outbound,
                priority,
            )
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        subject: Option<&str>,
        body: &str,
        priority: MessagePriority,
    ) -> Result<Message, AppError> {
        self.repo
            .update(id, subject, body, priority)
            .await?
            .ok_or(AppError::MessageNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::MessageNotFound);
        }
        Ok(())
    }

    pub async fn mark_as_read(&self, id: Uuid) -> Result<Message, AppError> {
        self.repo
            .mark_as_read(id)
            .await?
            .ok_or(AppError::MessageNotFound)
    }

    pub async fn threads(&self) -> Result<Vec<ThreadSummary>, AppError> {
        let messages = self.list().await?;
        Ok(group_threads(&messages))
    }

    pub async fn stats(&self) -> Result<InboxStats, AppError> {
        retry::with_backoff(self.retry, || self.repo.stats()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn message(thread: &str, minutes_ago: i64, is_read: bool) -> Message {
        Message {
            id: Uuid::new_v4(),
            channel: MessageChannel::Email,
            contact_name: format!("Contato {}", thread),
            contact_email: None,
            subject: Some("Re: proposta".to_string()),
            body: "corpo".to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            is_read,
            thread_id: thread.to_string(),
            is_outbound: false,
            priority: MessagePriority::Normal,
        }
    }

    #[test]
    fn groups_by_thread_with_counts() {
        // Ordenado do mais novo para o mais antigo, como o repo devolve
        let messages = vec![
            message("a", 1, false),
            message("b", 2, true),
            message("a", 3, false),
            message("a", 4, true),
        ];

        let threads = group_threads(&messages);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].thread_id, "a");
        assert_eq!(threads[0].message_count, 3);
        assert_eq!(threads[0].unread_count, 2);
        assert_eq!(threads[1].thread_id, "b");
        assert_eq!(threads[1].unread_count, 0);
    }

    #[test]
    fn newest_message_heads_the_thread() {
        let newest = message("a", 1, false);
        let older = message("a", 60, true);
        let threads = group_threads(&[newest.clone(), older]);

        assert_eq!(threads[0].last_message.id, newest.id);
    }

    #[test]
    fn thread_id_prefers_email_over_name() {
        assert_eq!(
            derive_thread_id(Some("Maria@Email.com"), "Maria da Silva"),
            "maria@email.com"
        );
        assert_eq!(derive_thread_id(None, " Maria da Silva "), "maria da silva");
        assert_eq!(derive_thread_id(Some("  "), "Maria"), "maria");
    }
}
