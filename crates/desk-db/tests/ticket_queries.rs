//! Ticket queries and service shaping against an in-memory table.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use desk_config::BoardConfig;
use desk_core::enums::{ChangeKind, SlaStatus};
use desk_db::{DeskService, Preset, SlaFilter, TicketDb, TicketFilter};
use desk_directory::{Directory, DirectoryError, IdentityResolver};

struct People(HashMap<&'static str, &'static str>);

impl Directory for People {
    async fn user_name(&self, id: &str) -> Result<String, DirectoryError> {
        self.0
            .get(id)
            .map(|name| (*name).to_string())
            .ok_or_else(|| DirectoryError::Slack("user_not_found".into()))
    }

    async fn group_names(&self) -> Result<Vec<(String, String)>, DirectoryError> {
        Ok(Vec::new())
    }

    async fn bot_name(&self, id: &str) -> Result<String, DirectoryError> {
        Err(DirectoryError::NotFound(id.into()))
    }
}

const SEED: &str = r#"
INSERT INTO service_orders
    (id, ticket_type, status, responsible, requester, captured_by, channel_id, thread_ts,
     opened_at, closed_at, sla_status, edit_log, reopen_history, last_edited_at, last_editor)
VALUES
    (1, 'billing', 'Done', 'U1', 'U3', 'U2', 'C01', '1719400000.000100',
     '2025-06-02 12:00:00', '2025-06-03 11:00:00', 'within', NULL, NULL, NULL, NULL),
    (2, 'access', 'In Progress', 'U1', 'U3', 'U9', 'C01', '1719400100.000100',
     '2025-06-05T09:00:00+00:00', NULL, NULL,
     '{"status": {"from": "Open", "to": "In Progress"}}', NULL, '2025-06-06 10:00:00', 'U2'),
    (3, 'billing', 'Done', 'U2', 'U3', 'U2', NULL, NULL,
     '2025-06-10 08:00:00', '2025-06-15 08:00:00', 'Outside', NULL,
     '[2025-06-12] Jane Doe reopened for billing dispute
this line is legacy noise
[2025-06-14] Bruno asked for refund', NULL, NULL),
    (4, 'other', 'Open', 'U404', 'U3', 'U2', NULL, NULL,
     'not a date', NULL, NULL, '{}', '   ', NULL, NULL);
"#;

async fn seeded_db() -> TicketDb {
    let db = TicketDb::open_local(":memory:", "service_orders").await.unwrap();
    db.conn().execute_batch(SEED).await.unwrap();
    db.conn()
        .execute("UPDATE service_orders SET responsible = 42 WHERE id = 4", ())
        .await
        .unwrap();
    db.with_board(BoardConfig::default())
}

async fn service() -> DeskService<People> {
    service_over(seeded_db().await)
}

fn service_over(db: TicketDb) -> DeskService<People> {
    let people = People(HashMap::from([
        ("U1", "Ana Souza"),
        ("U2", "Bruno Lima"),
        ("U3", "Carla Dias"),
    ]));
    let resolver = IdentityResolver::new(people).with_timeout(Duration::from_secs(1));
    DeskService::new(db, Arc::new(resolver)).unwrap()
}

#[tokio::test]
async fn count_with_filters() {
    let db = seeded_db().await;
    assert_eq!(db.count_tickets(&TicketFilter::default()).await.unwrap(), 4);

    let done = TicketFilter {
        status: Some("done".into()),
        ..Default::default()
    };
    assert_eq!(db.count_tickets(&done).await.unwrap(), 2);

    let june_early = TicketFilter {
        opened_from: NaiveDate::from_ymd_opt(2025, 6, 1),
        opened_to: NaiveDate::from_ymd_opt(2025, 6, 5),
        ..Default::default()
    };
    assert_eq!(db.count_tickets(&june_early).await.unwrap(), 2);

    let outside = TicketFilter {
        sla: Some(SlaFilter::Outside),
        ..Default::default()
    };
    assert_eq!(db.count_tickets(&outside).await.unwrap(), 1);
}

#[tokio::test]
async fn changed_filter_matches_record_flag() {
    let db = seeded_db().await;
    let changed = TicketFilter {
        changed: Some(true),
        ..Default::default()
    };
    let unchanged = TicketFilter {
        changed: Some(false),
        ..Default::default()
    };

    let changed_ids: Vec<i64> = db.load_tickets(&changed, None).await.unwrap().iter().map(|r| r.id).collect();
    let unchanged_ids: Vec<i64> = db.load_tickets(&unchanged, None).await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(changed_ids, vec![3, 2]);
    assert_eq!(unchanged_ids, vec![4, 1]);

    for record in db.load_tickets(&TicketFilter::default(), None).await.unwrap() {
        assert_eq!(record.has_changes(), changed_ids.contains(&record.id));
    }
}

#[tokio::test]
async fn lenient_row_reading() {
    let db = seeded_db().await;
    let record = db.load_ticket(4).await.unwrap().unwrap();
    assert_eq!(record.responsible, None);
    assert_eq!(record.opened_at, None);
    assert_eq!(record.status.as_deref(), Some("Open"));
    assert!(db.load_ticket(99).await.unwrap().is_none());
}

#[tokio::test]
async fn distinct_people_use_raw_ids() {
    let db = seeded_db().await;
    let filter = TicketFilter::default();
    assert_eq!(db.distinct_responsibles(&filter).await.unwrap(), vec!["U1", "U2"]);
    assert_eq!(db.distinct_capturers(&filter).await.unwrap(), vec!["U2", "U9"]);
}

#[tokio::test]
async fn ticket_page_clamps_and_shapes_rows() {
    let service = service().await;

    let page = service.ticket_page(&TicketFilter::default(), 9, 3).await.unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 2);
    assert_eq!(page.tickets.len(), 1);
    assert_eq!(page.tickets[0].id, 1);

    let first = service.ticket_page(&TicketFilter::default(), 0, 3).await.unwrap();
    assert_eq!(first.page, 1);
    let ids: Vec<i64> = first.tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 3, 2]);

    let ticket_3 = &first.tickets[1];
    assert_eq!(ticket_3.responsible, "Bruno Lima");
    assert_eq!(ticket_3.status, "done");
    assert_eq!(ticket_3.sla, "outside");
    assert_eq!(ticket_3.opened, "10/06/2025 05:00");
    assert_eq!(ticket_3.days_to_close, Some(5));
    assert_eq!(ticket_3.sla_by_days, SlaStatus::Outside);
    assert!(ticket_3.changed);

    let ticket_4 = &first.tickets[0];
    assert_eq!(ticket_4.responsible, "–");
    assert_eq!(ticket_4.opened, "-");
    assert_eq!(ticket_4.sla, "-");
    assert_eq!(ticket_4.sla_by_days, SlaStatus::Open);
    assert!(!ticket_4.changed);
}

#[tokio::test]
async fn empty_result_still_has_one_page() {
    let service = service().await;
    let filter = TicketFilter {
        responsible: Some("U777".into()),
        ..Default::default()
    };
    let page = service.ticket_page(&filter, 3, 20).await.unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert!(page.tickets.is_empty());
}

#[tokio::test]
async fn metrics_scope_counters_ignore_status_filter() {
    let service = service().await;
    let filter = Preset::Finished.apply(TicketFilter::default(), service.board());
    let metrics = service.metrics(&filter).await.unwrap();

    assert_eq!(metrics.total, 2);
    assert_eq!(metrics.in_progress, 1);
    assert_eq!(metrics.finished, 2);
    assert_eq!(metrics.outside_sla, 1);
    assert_eq!(metrics.changed, 2);
    assert_eq!(metrics.within_sla_by_days, 1);
    assert_eq!(metrics.outside_sla_by_days, 1);
    assert_eq!(metrics.mean_days_to_close, Some(2.5));
}

#[tokio::test]
async fn people_lists_are_resolved_and_sorted() {
    let service = service().await;
    let filter = TicketFilter::default();
    assert_eq!(
        service.responsibles(&filter).await.unwrap(),
        vec!["Ana Souza".to_string(), "Bruno Lima".to_string()]
    );
    assert_eq!(
        service.capturers(&filter).await.unwrap(),
        vec!["Bruno Lima".to_string()]
    );
}

#[tokio::test]
async fn changes_merge_edits_and_reopenings() {
    let service = service().await;
    let changes = service.changes(&TicketFilter::default()).await.unwrap();

    let summary: Vec<(i64, ChangeKind, &str)> = changes
        .iter()
        .map(|c| (c.ticket_id, c.kind, c.actor.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (3, ChangeKind::Reopening, "Bruno"),
            (3, ChangeKind::Reopening, "Jane"),
            (2, ChangeKind::Edit, "Bruno Lima"),
        ]
    );

    let edit = &changes[2];
    assert_eq!(edit.description, "status: Open → In Progress");
    assert_eq!(edit.responsible_name, "Ana Souza");
    assert_eq!(edit.when, Some(Utc.with_ymd_and_hms(2025, 6, 6, 10, 0, 0).unwrap()));
    assert_eq!(changes[1].description, "Doe reopened for billing dispute");
}

#[tokio::test]
async fn plain_text_editor_is_kept_as_actor() {
    let db = seeded_db().await;
    db.conn()
        .execute(
            r#"UPDATE service_orders
               SET edit_log = '{"status": {"de": "Open", "para": "Closed"}, "ticket_type": {"de": "other", "para": "access"}}',
                   last_editor = '  Maria Silva '
               WHERE id = 4"#,
            (),
        )
        .await
        .unwrap();
    db.conn()
        .execute("UPDATE service_orders SET last_editor = NULL WHERE id = 2", ())
        .await
        .unwrap();
    let service = service_over(db);

    let (_, changes) = service.ticket(4).await.unwrap().unwrap();
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| c.actor == "Maria Silva"));

    let (_, changes) = service.ticket(2).await.unwrap().unwrap();
    assert_eq!(changes[0].actor, "-");
}

#[tokio::test]
async fn single_ticket_with_changes() {
    let service = service().await;
    let (view, changes) = service.ticket(2).await.unwrap().unwrap();
    assert_eq!(view.captured_by, "–");
    assert_eq!(changes.len(), 1);
    assert!(service.ticket(99).await.unwrap().is_none());
}
