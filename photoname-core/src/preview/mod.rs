mod summary;
mod table;

pub use summary::render_summary;
pub use table::render_table;

use crate::model::{file_name_of, RenameRow, SelectionItem};
use crate::pathsafe::{self, MAX_NAME_LEN};
use crate::template::{expand, resolve_template};
use std::collections::HashSet;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

/// How a planned row set is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    use_color.unwrap_or_else(|| io::stdout().is_terminal())
}

/// Render planned rows in the requested format
pub fn render_rows(rows: &[RenameRow], format: Preview, use_color: bool) -> String {
    match format {
        Preview::Table => render_table(rows, use_color),
        Preview::Summary => render_summary(rows),
        Preview::None => String::new(),
    }
}

/// Plan renames for `items` without touching the filesystem.
///
/// Sequence numbers are 1-based positions in `items`. Items whose file is
/// gone are skipped. Every returned `new_path` is either the row's own
/// `old_path` or a path that is neither on disk nor claimed by an earlier
/// row of this call.
pub fn preview(items: &[SelectionItem], template: &str) -> Vec<RenameRow> {
    let template = resolve_template(template);
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut rows = Vec::with_capacity(items.len());

    for (idx, item) in items.iter().enumerate() {
        let Some(row) = plan_item(item, idx + 1, template, &claimed) else {
            continue;
        };
        claimed.insert(row.new_path.clone());
        rows.push(row);
    }

    tracing::debug!(planned = rows.len(), selected = items.len(), "preview built");
    rows
}

fn plan_item(
    item: &SelectionItem,
    seq: usize,
    template: &str,
    claimed: &HashSet<PathBuf>,
) -> Option<RenameRow> {
    let old_path = &item.path;
    if !old_path.is_file() {
        tracing::warn!(path = %old_path.display(), "skipping item: file does not exist");
        return None;
    }
    let Some(parent) = old_path.parent() else {
        tracing::warn!(path = %old_path.display(), "skipping item: no parent directory");
        return None;
    };

    let old_name = file_name_of(old_path);
    let (_, extension) = pathsafe::split_extension(&old_name);

    let mut new_name = expand(template, item.group, &item.label, seq, extension);
    if !pathsafe::validate(&new_name) {
        new_name = pathsafe::sanitize(&new_name);
    }
    if new_name.len() > MAX_NAME_LEN {
        new_name = pathsafe::truncate_name(&new_name, MAX_NAME_LEN);
    }

    let candidate = parent.join(&new_name);
    let new_path = pathsafe::unique_path_by(&candidate, |path: &Path| {
        path != old_path.as_path() && (claimed.contains(path) || path.exists())
    });
    if new_path != candidate {
        tracing::warn!(
            wanted = %candidate.display(),
            using = %new_path.display(),
            "name already taken, disambiguating"
        );
    }

    Some(RenameRow::planned(old_path.clone(), new_path))
}
