use anyhow::Result;
use photoname_core::{preview_operation, render_rows, OutputFormatter, Preview, SelectionItem};

use crate::OutputFormat;

pub fn handle_preview(
    items: &[SelectionItem],
    template: Option<&str>,
    preview: Preview,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = preview_operation(items, template, None)?;

    match output {
        OutputFormat::Json => {
            print!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            let rendered = render_rows(&result.rows, preview, use_color);
            if !rendered.is_empty() {
                println!("{}", rendered.trim_end());
            }
            print!("{}", result.format_summary());
        },
    }

    Ok(())
}
