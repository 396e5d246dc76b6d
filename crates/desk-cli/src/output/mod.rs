use desk_core::display::EMPTY_CELL;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: Value) -> String {
    match value {
        Value::Array(items) => render_rows(&items),
        Value::Object(map) => render_object(map),
        scalar => value_to_cell(&scalar),
    }
}

/// An object holding one list of rows (a page, a ticket with its changes)
/// prints the list as a table followed by the remaining fields.
fn render_object(mut map: Map<String, Value>) -> String {
    let list_key = map
        .iter()
        .find(|(_, value)| value.as_array().is_some_and(|items| items.iter().all(Value::is_object)))
        .map(|(key, _)| key.clone());

    let Some(list_key) = list_key else {
        let rows = map
            .iter()
            .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
            .collect::<Vec<_>>();
        return table::render_table(&["field", "value"], &rows, options());
    };

    let items = match map.remove(&list_key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let mut sections = Vec::new();
    if !map.is_empty() {
        let rows = map
            .iter()
            .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
            .collect::<Vec<_>>();
        sections.push(table::render_table(&["field", "value"], &rows, options()));
    }
    sections.push(format!("{list_key}:\n{}", render_rows(&items)));
    sections.join("\n\n")
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| EMPTY_CELL.to_string(), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_CELL.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
