use crate::model::RenameRow;
use std::fmt::Write;

/// Render planned rows as plain `old -> new` lines with a short header
pub fn render_summary(rows: &[RenameRow]) -> String {
    let mut output = String::new();

    let changes = rows.iter().filter(|row| !row.is_noop()).count();
    let collisions = rows.iter().filter(|row| row.collides()).count();

    writeln!(output, "[RENAME PLAN]").unwrap();
    writeln!(output, "Files: {}", rows.len()).unwrap();
    writeln!(output, "Changes: {}", changes).unwrap();
    if collisions > 0 {
        writeln!(output, "Collisions: {}", collisions).unwrap();
    }
    writeln!(output).unwrap();

    for row in rows {
        let marker = if row.collides() { " [exists]" } else { "" };
        writeln!(output, "{} -> {}{}", row.old_name, row.new_name, marker).unwrap();
    }

    output
}
