use anyhow::Result;
use photoname_core::{apply_items_operation, apply_operation, OutputFormatter, SelectionItem};
use std::path::Path;

use crate::OutputFormat;

/// Execute `items` directly when given, otherwise a saved plan.
/// Returns whether every row was renamed.
pub fn handle_apply(
    items: Option<&[SelectionItem]>,
    template: Option<&str>,
    plan: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) -> Result<bool> {
    let result = match items {
        Some(items) => apply_items_operation(items, template, None)?,
        None => apply_operation(plan, None)?,
    };

    match output {
        OutputFormat::Json => {
            print!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(result.result.is_clean())
}
