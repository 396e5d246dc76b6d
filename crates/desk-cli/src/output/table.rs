use desk_core::display::EMPTY_CELL;

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN_WIDTH: usize = 4;
const SEPARATOR: &str = " | ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table. Missing cells print as `-`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    shrink_to_fit(&mut widths, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or(EMPTY_CELL, String::as_str);
                let clipped = clip(cell, *width);
                let padded = pad(&clipped, *width, is_numeric(&clipped));
                if options.color {
                    colorize(&clipped, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Take one character at a time from the widest column until the table fits.
fn shrink_to_fit(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
        total -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed != EMPTY_CELL
        && trimmed.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}

/// SLA vocabulary in green, yellow, or red.
fn colorize(plain: &str, padded: String) -> String {
    let code = match plain.to_ascii_lowercase().as_str() {
        "within" | "true" => "32",
        "open" | "pending" => "33",
        "outside" | "false" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn aligns_columns() {
        let rows = vec![
            vec!["7".to_string(), "outside".to_string()],
            vec!["1024".to_string(), "open".to_string()],
        ];
        let out = render_table(&["id", "sla"], &rows, PLAIN);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id   | sla");
        assert_eq!(lines[1], "-----+--------");
        assert_eq!(lines[2], "   7 | outside");
        assert_eq!(lines[3], "1024 | open");
    }

    #[test]
    fn missing_cells_are_dashes() {
        let rows = vec![vec!["1".to_string()]];
        let out = render_table(&["id", "closed"], &rows, PLAIN);
        assert!(out.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }

    #[test]
    fn clips_to_terminal_width() {
        let rows = vec![vec!["x".repeat(80), "short".to_string()]];
        let out = render_table(
            &["description", "actor"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        let row = out.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 40, "row too wide: {row}");
        assert!(row.contains('…'));
    }

    #[test]
    fn colors_sla_words_only() {
        assert_eq!(colorize("Ana", "Ana ".into()), "Ana ");
        assert!(colorize("outside", "outside".into()).starts_with("\u{1b}[31m"));
    }
}
