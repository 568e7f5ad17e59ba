use anyhow::Result;
use photoname_core::{undo_operation, OutputFormatter};

use crate::OutputFormat;

/// Returns whether every row was restored
pub fn handle_undo(output: OutputFormat) -> Result<bool> {
    let result = undo_operation(None)?;

    print!("{}", result.format(output.into()));

    Ok(result.result.is_clean())
}
