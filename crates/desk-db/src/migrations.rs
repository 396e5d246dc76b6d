//! Migration runner.
//!
//! The SQL is embedded at compile time with the table name as a placeholder.
//! Statements use `IF NOT EXISTS`, so re-running is harmless.

use crate::TicketDb;
use crate::error::DatabaseError;

const MIGRATION_001: &str = include_str!("../migrations/001_service_orders.sql");

impl TicketDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let sql = MIGRATION_001.replace("{{table}}", &self.table);
        self.conn
            .execute_batch(&sql)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_service_orders: {e}")))?;
        Ok(())
    }
}
