// src/common/retry.rs
//
// Wrapper genérico de resiliência: até 3 tentativas com backoff exponencial
// mais jitter e timeout fixo por tentativa. Os services aplicam isso em volta
// das chamadas ao repositório; quando o orçamento estoura, o chamador recebe
// o erro genérico de timeout de conexão.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, timeout};

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    // Delay da tentativa N (0-indexada): base * 2^N + jitter.
    pub fn backoff_delay(&self, attempt: u32, jitter: Duration) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt) + jitter
    }
}

// Apenas falhas de transporte voltam para o loop; erros de domínio
// (não encontrado, validação, unicidade) sobem direto.
fn is_transient(err: &AppError) -> bool {
    match err {
        AppError::ConnectionTimeout => true,
        AppError::DatabaseError(e) => matches!(
            e,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed
        ),
        _ => false,
    }
}

pub async fn with_backoff<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt: u32 = 0;

    loop {
        let result = match timeout(policy.attempt_timeout, op()).await {
            Ok(inner) => inner,
            Err(_) => Err(AppError::ConnectionTimeout),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(err) if is_transient(&err) && attempt + 1 < policy.max_attempts => {
                let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..1000));
                let delay = policy.backoff_delay(attempt, jitter);
                tracing::warn!(
                    "Tentativa {}/{} falhou ({}). Aguardando {:?} antes de repetir.",
                    attempt + 1,
                    policy.max_attempts,
                    err,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
            // Transiente na última tentativa vira o erro genérico de timeout.
            Err(err) if is_transient(&err) => return Err(AppError::ConnectionTimeout),
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            attempt_timeout: Duration::from_millis(50),
        }
    }

    #[test]
    fn backoff_delay_doubles_per_attempt() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(5),
        };
        let none = Duration::ZERO;
        assert_eq!(policy.backoff_delay(0, none), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(1, none), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2, none), Duration::from_secs(4));
        assert_eq!(
            policy.backoff_delay(1, Duration::from_millis(300)),
            Duration::from_millis(2300)
        );
    }

    #[tokio::test]
    async fn succeeds_without_retry() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(fast_policy(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, AppError>(42)
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_until_attempts_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, AppError> = with_backoff(fast_policy(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::ConnectionTimeout)
        })
        .await;

        assert!(matches!(result, Err(AppError::ConnectionTimeout)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn domain_errors_do_not_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, AppError> = with_backoff(fast_policy(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::ContactNotFound)
        })
        .await;

        assert!(matches!(result, Err(AppError::ContactNotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(fast_policy(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(AppError::ConnectionTimeout)
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
