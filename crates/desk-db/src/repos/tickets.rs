//! Ticket repository: filters, presets, and row loading.
//!
//! Filters compile to a parameterized `WHERE` clause. Only the table name is
//! interpolated, and it is validated when the database is opened.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use desk_config::BoardConfig;
use libsql::Value;
use serde::Serialize;

use crate::TicketDb;
use crate::error::DatabaseError;
use crate::helpers::{get_text, get_timestamp};

const COLUMNS: &str = "id, ticket_type, status, responsible, requester, captured_by, channel_id, \
     thread_ts, opened_at, closed_at, captured_at, sla_status, edit_log, reopen_history, \
     last_edited_at, last_editor";

/// SQL for "has an edit log or a reopening history". Mirrors [`TicketRecord::has_changes`].
const CHANGED_SQL: &str = "(COALESCE(TRIM(edit_log), '') NOT IN ('', '{}', '[]', 'null') \
     OR COALESCE(TRIM(reopen_history), '') <> '')";

/// SLA status filter on the stored `sla_status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaFilter {
    /// Stored status equals the board's `outside_sla_value`.
    Outside,
}

/// Filter criteria for ticket queries. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Stored status, compared case-insensitively.
    pub status: Option<String>,
    /// Raw responsible identifier.
    pub responsible: Option<String>,
    /// Inclusive lower bound on the opening date.
    pub opened_from: Option<NaiveDate>,
    /// Inclusive upper bound on the opening date.
    pub opened_to: Option<NaiveDate>,
    /// Raw capturer identifier.
    pub captured_by: Option<String>,
    pub sla: Option<SlaFilter>,
    /// `true` keeps tickets with changes, `false` those without.
    pub changed: Option<bool>,
}

impl TicketFilter {
    /// Same filter without the status, SLA, and changed criteria.
    #[must_use]
    pub fn scope_only(&self) -> Self {
        Self {
            status: None,
            sla: None,
            changed: None,
            ..self.clone()
        }
    }
}

/// Named filter shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    InProgress,
    Finished,
    OutsideSla,
    Changed,
}

impl Preset {
    pub const ALL: [Self; 4] = [Self::InProgress, Self::Finished, Self::OutsideSla, Self::Changed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Finished => "finished",
            Self::OutsideSla => "outside-sla",
            Self::Changed => "changed",
        }
    }

    /// Apply the preset on top of `filter`, clearing the criteria it replaces.
    #[must_use]
    pub fn apply(self, filter: TicketFilter, board: &BoardConfig) -> TicketFilter {
        match self {
            Self::InProgress => TicketFilter {
                status: Some(board.in_progress_status.clone()),
                sla: None,
                changed: None,
                ..filter
            },
            Self::Finished => TicketFilter {
                status: Some(board.finished_status.clone()),
                sla: None,
                changed: None,
                ..filter
            },
            Self::OutsideSla => TicketFilter {
                status: None,
                sla: Some(SlaFilter::Outside),
                ..filter
            },
            Self::Changed => TicketFilter {
                status: None,
                changed: Some(true),
                ..filter
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based page of `per_page` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub per_page: u32,
}

impl Page {
    const fn offset(self) -> u64 {
        (self.number.saturating_sub(1) as u64) * self.per_page as u64
    }
}

/// One raw row of the ticket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRecord {
    pub id: i64,
    pub ticket_type: Option<String>,
    pub status: Option<String>,
    pub responsible: Option<String>,
    pub requester: Option<String>,
    pub captured_by: Option<String>,
    pub channel_id: Option<String>,
    pub thread_ts: Option<String>,
    pub opened_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub captured_at: Option<DateTime<Utc>>,
    pub sla_status: Option<String>,
    pub edit_log: Option<String>,
    pub reopen_history: Option<String>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub last_editor: Option<String>,
}

impl TicketRecord {
    /// True when the edit log or the reopening history has content.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        let edit_log = self.edit_log.as_deref().map_or("", str::trim);
        let has_edits = !matches!(edit_log, "" | "{}" | "[]" | "null");
        let has_reopenings = self
            .reopen_history
            .as_deref()
            .is_some_and(|h| !h.trim().is_empty());
        has_edits || has_reopenings
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        let id = row.get::<i64>(0)?;
        Ok(Self {
            id,
            ticket_type: get_text(row, 1)?,
            status: get_text(row, 2)?,
            responsible: get_text(row, 3)?,
            requester: get_text(row, 4)?,
            captured_by: get_text(row, 5)?,
            channel_id: get_text(row, 6)?,
            thread_ts: get_text(row, 7)?,
            opened_at: get_timestamp(row, 8, id)?,
            closed_at: get_timestamp(row, 9, id)?,
            captured_at: get_timestamp(row, 10, id)?,
            sla_status: get_text(row, 11)?,
            edit_log: get_text(row, 12)?,
            reopen_history: get_text(row, 13)?,
            last_edited_at: get_timestamp(row, 14, id)?,
            last_editor: get_text(row, 15)?,
        })
    }
}

/// Conditions and their positional parameters.
#[derive(Debug, Default)]
struct WhereClause {
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl WhereClause {
    fn for_filter(filter: &TicketFilter, board: &BoardConfig) -> Self {
        let mut clause = Self::default();
        if let Some(ref status) = filter.status {
            clause.bind("lower(status) = lower(?{})", Value::Text(status.clone()));
        }
        if let Some(ref responsible) = filter.responsible {
            clause.bind("responsible = ?{}", Value::Text(responsible.clone()));
        }
        if let Some(from) = filter.opened_from {
            clause.bind("date(opened_at) >= ?{}", Value::Text(from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = filter.opened_to {
            clause.bind("date(opened_at) <= ?{}", Value::Text(to.format("%Y-%m-%d").to_string()));
        }
        if let Some(ref captured_by) = filter.captured_by {
            clause.bind("captured_by = ?{}", Value::Text(captured_by.clone()));
        }
        if let Some(SlaFilter::Outside) = filter.sla {
            clause.bind(
                "lower(sla_status) = lower(?{})",
                Value::Text(board.outside_sla_value.clone()),
            );
        }
        match filter.changed {
            Some(true) => clause.raw(CHANGED_SQL),
            Some(false) => clause.raw(&format!("NOT {CHANGED_SQL}")),
            None => {}
        }
        clause
    }

    /// Add a condition whose `?{}` placeholder becomes the next `?N`.
    fn bind(&mut self, template: &str, value: Value) {
        self.params.push(value);
        self.conditions
            .push(template.replace("?{}", &format!("?{}", self.params.len())));
    }

    fn raw(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    fn sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }
}

impl TicketDb {
    /// Number of tickets matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_tickets(&self, filter: &TicketFilter) -> Result<u64, DatabaseError> {
        let clause = WhereClause::for_filter(filter, self.board());
        let sql = format!("SELECT COUNT(*) FROM {} {}", self.table(), clause.sql());
        let mut rows = self.query(&sql, clause.params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Tickets matching `filter`, newest id first, optionally one page.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_tickets(
        &self,
        filter: &TicketFilter,
        page: Option<Page>,
    ) -> Result<Vec<TicketRecord>, DatabaseError> {
        let clause = WhereClause::for_filter(filter, self.board());
        let mut sql = format!(
            "SELECT {COLUMNS} FROM {} {} ORDER BY id DESC",
            self.table(),
            clause.sql()
        );
        if let Some(page) = page {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", page.per_page, page.offset()));
        }

        let mut rows = self.query(&sql, clause.params).await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(TicketRecord::from_row(&row)?);
        }
        Ok(records)
    }

    /// One ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn load_ticket(&self, id: i64) -> Result<Option<TicketRecord>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = ?1", self.table());
        let mut rows = self.query(&sql, vec![Value::Integer(id)]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(TicketRecord::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Distinct raw responsible identifiers among matching tickets.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn distinct_responsibles(&self, filter: &TicketFilter) -> Result<Vec<String>, DatabaseError> {
        self.distinct_column("responsible", filter).await
    }

    /// Distinct raw capturer identifiers among matching tickets.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn distinct_capturers(&self, filter: &TicketFilter) -> Result<Vec<String>, DatabaseError> {
        self.distinct_column("captured_by", filter).await
    }

    async fn distinct_column(&self, column: &'static str, filter: &TicketFilter) -> Result<Vec<String>, DatabaseError> {
        let mut clause = WhereClause::for_filter(filter, self.board());
        clause.raw(&format!("{column} IS NOT NULL"));
        let sql = format!(
            "SELECT DISTINCT {column} FROM {} {} ORDER BY {column}",
            self.table(),
            clause.sql()
        );
        let mut rows = self.query(&sql, clause.params).await?;
        let mut values = Vec::new();
        while let Some(row) = rows.next().await? {
            if let Some(value) = get_text(&row, 0)? {
                values.push(value);
            }
        }
        Ok(values)
    }
}
