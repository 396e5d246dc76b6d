//! # desk-db
//!
//! libSQL access to the ticket table and the service that shapes its rows
//! for display and export.
//!
//! The table is owned by whoever captures tickets; deskboard only reads it.
//! [`TicketDb::open_local`] creates it for local and development databases.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;

use desk_config::{BoardConfig, DatabaseConfig};
use error::DatabaseError;
use libsql::Builder;

pub use repos::tickets::{Page, Preset, SlaFilter, TicketFilter, TicketRecord};
pub use service::DeskService;

/// Handle to the ticket table.
pub struct TicketDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    table: String,
    board: BoardConfig,
    remote: bool,
}

impl TicketDb {
    /// Open a local database file (or `:memory:`) and create the table.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the table name is invalid, the database
    /// cannot be opened, or the migration fails.
    pub async fn open_local(path: &str, table: &str) -> Result<Self, DatabaseError> {
        let table = validated_table(table)?;
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let ticket_db = Self {
            db,
            conn,
            table,
            board: BoardConfig::default(),
            remote: false,
        };
        ticket_db.run_migrations().await?;
        Ok(ticket_db)
    }

    /// Connect to a remote libSQL database. The table must already exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the table name is invalid or the
    /// connection cannot be built.
    pub async fn open_remote(url: &str, auth_token: &str, table: &str) -> Result<Self, DatabaseError> {
        let table = validated_table(table)?;
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        tracing::debug!(url, table, "connected to remote ticket database");
        Ok(Self {
            db,
            conn,
            table,
            board: BoardConfig::default(),
            remote: true,
        })
    }

    /// Open whichever database the config points at.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_remote`] / [`Self::open_local`].
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token, &config.table).await
        } else {
            Self::open_local(&config.local_path, &config.table).await
        }
    }

    /// Use these status values and SLA label in filters.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn board(&self) -> &BoardConfig {
        &self.board
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }
}

fn validated_table(table: &str) -> Result<String, DatabaseError> {
    if helpers::is_identifier(table) {
        Ok(table.to_string())
    } else {
        Err(DatabaseError::InvalidTable(table.to_string()))
    }
}
