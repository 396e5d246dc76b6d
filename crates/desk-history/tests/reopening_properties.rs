//! Parser behavior on realistic reopening histories.

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

use desk_core::entities::{ReopeningEvent, TicketContext};
use desk_history::{format_reopenings, parse_reopenings};

fn context() -> TicketContext {
    TicketContext {
        ticket_id: 481,
        responsible_name: "Ana Souza".into(),
        opened_at: Some(Utc.with_ymd_and_hms(2025, 6, 20, 13, 30, 0).unwrap()),
    }
}

#[test]
fn empty_and_absent_input_yield_nothing() {
    assert!(parse_reopenings(Some(""), &context()).is_empty());
    assert!(parse_reopenings(None, &context()).is_empty());
    assert!(parse_reopenings(Some("\n \n\t\n"), &context()).is_empty());
}

#[test]
fn single_line_uses_shortest_actor() {
    let events = parse_reopenings(
        Some("[2025-06-26] Jane Doe reopened for billing dispute"),
        &context(),
    );

    assert_eq!(
        events,
        vec![ReopeningEvent {
            ticket_id: 481,
            occurred_on: NaiveDate::from_ymd_opt(2025, 6, 26),
            actor: "Jane".into(),
            description: "Doe reopened for billing dispute".into(),
            responsible_name: "Ana Souza".into(),
            opened_at: context().opened_at,
        }]
    );
    assert!(events[0].description.contains("reopened for billing dispute"));
}

#[test]
fn extra_whitespace_still_splits_in_two() {
    let events = parse_reopenings(Some("[2025-06-26]   Jane \t  reopened   again"), &context());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].actor, "Jane");
    assert_eq!(events[0].description, "reopened   again");
}

#[test]
fn malformed_middle_line_is_skipped_in_order() {
    let text = "[2025-06-01] Bruno first reopening\n\
                2025-06-02 Carla missing brackets\n\
                [2025-06-03] Dani third reopening";
    let events = parse_reopenings(Some(text), &context());

    let summary: Vec<(&str, Option<NaiveDate>)> =
        events.iter().map(|e| (e.actor.as_str(), e.occurred_on)).collect();
    assert_eq!(
        summary,
        vec![
            ("Bruno", NaiveDate::from_ymd_opt(2025, 6, 1)),
            ("Dani", NaiveDate::from_ymd_opt(2025, 6, 3)),
        ]
    );
}

#[test]
fn invalid_date_keeps_other_fields() {
    let events = parse_reopenings(Some("[2025-13-40] Jane reopened after audit"), &context());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].occurred_on, None);
    assert_eq!(events[0].actor, "Jane");
    assert_eq!(events[0].description, "reopened after audit");
    assert_eq!(events[0].ticket_id, 481);
}

#[test]
fn context_is_copied_onto_every_event() {
    let events = parse_reopenings(
        Some("[2025-06-01] A one\n[2025-06-02] B two\n[2025-06-03] C three"),
        &context(),
    );
    assert_eq!(events.len(), 3);
    for event in &events {
        assert_eq!(event.ticket_id, 481);
        assert_eq!(event.responsible_name, "Ana Souza");
        assert_eq!(event.opened_at, context().opened_at);
    }
}

#[test]
fn formatted_output_reparses_in_same_order() {
    let text = "[2025-06-03] Dani later\n[2025-13-40] Eva bad date\n[2025-06-01] Bruno earlier";
    let first = parse_reopenings(Some(text), &context());
    let second = parse_reopenings(Some(&format_reopenings(&first)), &context());

    assert_eq!(first, second);
    let actors: Vec<&str> = second.iter().map(|e| e.actor.as_str()).collect();
    assert_eq!(actors, vec!["Dani", "Eva", "Bruno"]);
}

#[test]
fn parsing_is_stateless() {
    let text = "[2025-06-01] Bruno again";
    assert_eq!(
        parse_reopenings(Some(text), &context()),
        parse_reopenings(Some(text), &context())
    );
}
