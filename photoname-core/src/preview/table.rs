use crate::model::RenameRow;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render planned rows as a table of old name, new name and status
pub fn render_table(rows: &[RenameRow], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Old name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Old name", "New name", "Status"]);
    }

    for (idx, row) in rows.iter().enumerate() {
        let (status, color) = row_status(row);
        let position = (idx + 1).to_string();
        if use_color {
            table.add_row(vec![
                Cell::new(&position),
                Cell::new(&row.old_name),
                Cell::new(format!("→ {}", row.new_name)).fg(Color::Magenta),
                Cell::new(status).fg(color),
            ]);
        } else {
            table.add_row(vec![
                position.as_str(),
                row.old_name.as_str(),
                &format!("→ {}", row.new_name),
                status,
            ]);
        }
    }

    table.to_string()
}

fn row_status(row: &RenameRow) -> (&'static str, Color) {
    if !row.error_message.is_empty() {
        ("failed", Color::Red)
    } else if row.success {
        ("renamed", Color::Green)
    } else if row.is_noop() {
        ("unchanged", Color::DarkGrey)
    } else if row.collides() {
        ("collision", Color::Yellow)
    } else {
        ("ready", Color::Green)
    }
}
