use anyhow::Result;
use photoname_core::{history_operation, OutputFormatter};

use crate::OutputFormat;

pub fn handle_history(limit: Option<usize>, output: OutputFormat) -> Result<()> {
    let result = history_operation(limit, None)?;

    print!("{}", result.format(output.into()));

    Ok(())
}
