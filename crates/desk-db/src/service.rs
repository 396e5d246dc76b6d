//! Display and export shaping over the ticket table.
//!
//! `DeskService` joins raw rows with the identity resolver, SLA math, and the
//! audit-field parsers. Name lookups never fail; database errors propagate.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::FixedOffset;
use desk_config::BoardConfig;
use desk_core::display::{EMPTY_CELL, UNRESOLVED_NAME, display_offset, format_timestamp};
use desk_core::entities::{ChangeEvent, DashboardMetrics, TicketContext, TicketPage, TicketView};
use desk_core::enums::SlaStatus;
use desk_core::sla;
use desk_directory::{Directory, IdentityKind, IdentityResolver};
use desk_history::{fold_changes, parse_edit_log, parse_reopenings, sort_latest_first};

use crate::TicketDb;
use crate::error::DatabaseError;
use crate::repos::tickets::{Page, Preset, TicketFilter, TicketRecord};

/// Read-side service for the dashboard.
pub struct DeskService<D: Directory> {
    db: TicketDb,
    resolver: Arc<IdentityResolver<D>>,
    offset: FixedOffset,
}

impl<D: Directory> DeskService<D> {
    /// Wrap a database and resolver.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Other` if the board's display offset is out of
    /// range.
    pub fn new(db: TicketDb, resolver: Arc<IdentityResolver<D>>) -> Result<Self, DatabaseError> {
        let offset = display_offset(db.board().utc_offset_minutes).map_err(anyhow::Error::from)?;
        Ok(Self { db, resolver, offset })
    }

    #[must_use]
    pub const fn db(&self) -> &TicketDb {
        &self.db
    }

    #[must_use]
    pub fn resolver(&self) -> &IdentityResolver<D> {
        &self.resolver
    }

    #[must_use]
    pub const fn board(&self) -> &BoardConfig {
        self.db.board()
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// One page of display rows. `page` is clamped into `1..=total_pages`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn ticket_page(
        &self,
        filter: &TicketFilter,
        page: u32,
        per_page: u32,
    ) -> Result<TicketPage, DatabaseError> {
        let per_page = per_page.max(1);
        let total = self.db.count_tickets(filter).await?;
        let total_pages = u32::try_from(total.div_ceil(u64::from(per_page)))
            .unwrap_or(u32::MAX)
            .max(1);
        let page = page.clamp(1, total_pages);

        let records = self
            .db
            .load_tickets(filter, Some(Page { number: page, per_page }))
            .await?;
        let mut tickets = Vec::with_capacity(records.len());
        for record in &records {
            tickets.push(self.view(record).await);
        }
        Ok(TicketPage {
            tickets,
            page,
            total_pages,
            total,
        })
    }

    /// Every matching ticket as a display row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn ticket_views(&self, filter: &TicketFilter) -> Result<Vec<TicketView>, DatabaseError> {
        let records = self.db.load_tickets(filter, None).await?;
        let mut views = Vec::with_capacity(records.len());
        for record in &records {
            views.push(self.view(record).await);
        }
        Ok(views)
    }

    /// One ticket as a display row, `None` if the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn ticket(&self, id: i64) -> Result<Option<(TicketView, Vec<ChangeEvent>)>, DatabaseError> {
        let Some(record) = self.db.load_ticket(id).await? else {
            return Ok(None);
        };
        let view = self.view(&record).await;
        let mut changes = self.record_changes(&record, view.responsible.clone()).await;
        sort_latest_first(&mut changes);
        Ok(Some((view, changes)))
    }

    /// Headline counters.
    ///
    /// `total` and the day-count figures honor the whole filter. The status,
    /// SLA, and changed counters keep only its date and people criteria.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn metrics(&self, filter: &TicketFilter) -> Result<DashboardMetrics, DatabaseError> {
        let board = self.board();
        let scope = filter.scope_only();

        let total = self.db.count_tickets(filter).await?;
        let in_progress = self.db.count_tickets(&Preset::InProgress.apply(scope.clone(), board)).await?;
        let finished = self.db.count_tickets(&Preset::Finished.apply(scope.clone(), board)).await?;
        let outside_sla = self.db.count_tickets(&Preset::OutsideSla.apply(scope.clone(), board)).await?;
        let changed = self.db.count_tickets(&Preset::Changed.apply(scope, board)).await?;

        let days: Vec<i64> = self
            .db
            .load_tickets(filter, None)
            .await?
            .iter()
            .filter_map(|r| sla::days_to_close(r.opened_at, r.closed_at))
            .collect();
        let (within, outside): (Vec<i64>, Vec<i64>) =
            days.iter().partition(|d| sla::classify(Some(**d), board.sla_days) == SlaStatus::Within);

        Ok(DashboardMetrics {
            total,
            in_progress,
            finished,
            outside_sla,
            changed,
            within_sla_by_days: within.len() as u64,
            outside_sla_by_days: outside.len() as u64,
            mean_days_to_close: sla::mean_days(days),
        })
    }

    /// Sorted unique responsible names among matching tickets.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn responsibles(&self, filter: &TicketFilter) -> Result<Vec<String>, DatabaseError> {
        let ids = self.db.distinct_responsibles(filter).await?;
        Ok(self.resolve_names(&ids, true).await)
    }

    /// Sorted unique capturer names, without the placeholder.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn capturers(&self, filter: &TicketFilter) -> Result<Vec<String>, DatabaseError> {
        let ids = self.db.distinct_capturers(filter).await?;
        Ok(self.resolve_names(&ids, false).await)
    }

    /// Edits and reopenings of all matching tickets, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn changes(&self, filter: &TicketFilter) -> Result<Vec<ChangeEvent>, DatabaseError> {
        let records = self.db.load_tickets(filter, None).await?;
        let mut changes = Vec::new();
        for record in records.iter().filter(|r| r.has_changes()) {
            let responsible = self.resolver.resolve_opt(record.responsible.as_deref()).await;
            changes.extend(self.record_changes(record, responsible).await);
        }
        sort_latest_first(&mut changes);
        tracing::debug!(count = changes.len(), "change events built");
        Ok(changes)
    }

    async fn record_changes(&self, record: &TicketRecord, responsible_name: String) -> Vec<ChangeEvent> {
        let context = TicketContext {
            ticket_id: record.id,
            responsible_name,
            opened_at: record.opened_at,
        };
        let editor = self.editor_name(record.last_editor.as_deref()).await;
        let edits = parse_edit_log(record.edit_log.as_deref(), &context, &editor, record.last_edited_at);
        let reopenings = parse_reopenings(record.reopen_history.as_deref(), &context);
        fold_changes(edits, reopenings)
    }

    /// Slack ids are resolved; a stored plain name is shown as is.
    async fn editor_name(&self, editor: Option<&str>) -> String {
        let Some(editor) = editor.map(str::trim).filter(|e| !e.is_empty()) else {
            return EMPTY_CELL.to_string();
        };
        if IdentityKind::classify(editor) == IdentityKind::Unknown {
            return editor.to_string();
        }
        self.resolver.resolve(editor).await
    }

    async fn resolve_names(&self, ids: &[String], keep_placeholder: bool) -> Vec<String> {
        let mut names = BTreeSet::new();
        for id in ids {
            let name = self.resolver.resolve(id).await;
            if keep_placeholder || name != UNRESOLVED_NAME {
                names.insert(name);
            }
        }
        names.into_iter().collect()
    }

    async fn view(&self, record: &TicketRecord) -> TicketView {
        let days = sla::days_to_close(record.opened_at, record.closed_at);
        TicketView {
            id: record.id,
            ticket_type: record.ticket_type.clone(),
            status: record
                .status
                .as_deref()
                .map_or_else(|| EMPTY_CELL.to_string(), str::to_lowercase),
            responsible: self.resolver.resolve_opt(record.responsible.as_deref()).await,
            requester: self.resolver.resolve_opt(record.requester.as_deref()).await,
            captured_by: self.resolver.resolve_opt(record.captured_by.as_deref()).await,
            channel_id: record.channel_id.clone(),
            thread_ts: record.thread_ts.clone(),
            opened: format_timestamp(record.opened_at, self.offset),
            closed: format_timestamp(record.closed_at, self.offset),
            sla: record
                .sla_status
                .as_deref()
                .map_or_else(|| EMPTY_CELL.to_string(), str::to_lowercase),
            days_to_close: days,
            sla_by_days: sla::classify(days, self.board().sla_days),
            changed: record.has_changes(),
        }
    }
}
