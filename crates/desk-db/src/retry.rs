//! Retry for transient remote errors.
//!
//! Hosted libSQL occasionally answers with lock or recycling errors while a
//! node is being moved. Those clear within seconds. Local databases never
//! retry.

use std::time::Duration;

use libsql::Value;

use crate::TicketDb;
use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based), doubling up to the cap.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Errors a hosted database raises while a node is recycled.
#[must_use]
pub fn is_transient_remote_error(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("unable to acquire shared lock") || msg.contains("deletion must be in progress")
}

impl TicketDb {
    /// Run a query with positional parameters, retrying transient remote
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` once retries are exhausted or on any
    /// non-transient error.
    pub async fn query(&self, sql: &str, params: Vec<Value>) -> Result<libsql::Rows, DatabaseError> {
        let retry = RetryConfig::default();
        let mut attempt = 1;
        loop {
            match self
                .conn
                .query(sql, libsql::params_from_iter(params.clone()))
                .await
            {
                Ok(rows) => return Ok(rows),
                Err(e) if self.remote && attempt < retry.max_attempts && is_transient_remote_error(&e) => {
                    let delay = retry.delay_for(attempt);
                    tracing::warn!(attempt, ?delay, error = %e, "transient database error, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let retry = RetryConfig::default();
        assert_eq!(retry.delay_for(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for(3), Duration::from_millis(400));
        assert_eq!(retry.delay_for(10), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn local_errors_are_not_retried() {
        let db = TicketDb::open_local(":memory:", "service_orders").await.unwrap();
        let err = db.query("SELECT * FROM missing_table", Vec::new()).await.err().unwrap();
        assert!(matches!(err, DatabaseError::LibSql(_)));
    }
}
