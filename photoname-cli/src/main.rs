use anyhow::{Context, Result};
use clap::Parser;
use photoname_core::{should_use_color, Config, Preview};
use std::io::{self, IsTerminal};
use std::process;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

mod apply;
mod cli;
mod history;
mod preview;
mod selection;
mod undo;

use cli::{Cli, Commands, OutputFormat};

/// Environment variable holding an EnvFilter directive, e.g. `photoname_core=debug`
const LOG_ENV: &str = "PHOTONAME_LOG";

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        if let Err(e) = std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
        {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }

    match run(cli) {
        // Partial failure is reported in the output; signal it through the exit code.
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(&std::env::current_dir()?)?;
    let use_color = !cli.no_color && should_use_color(config.defaults.use_color);
    let default_output = photoname_core::OutputFormat::from_str(&config.defaults.output_format)
        .map_or(OutputFormat::Summary, OutputFormat::from);

    match cli.command {
        Commands::Preview {
            selection,
            preview: preview_arg,
            output,
        } => {
            let items = selection::collect_items(&selection, &config)?;
            let format = preview_arg.map_or(Preview::Table, Preview::from);
            preview::handle_preview(
                &items,
                selection.template.as_deref(),
                format,
                output.unwrap_or(default_output),
                use_color,
            )?;
            Ok(true)
        },
        Commands::Apply {
            selection,
            plan,
            output,
            quiet,
        } => {
            let items = if selection::has_sources(&selection) {
                Some(selection::collect_items(&selection, &config)?)
            } else {
                None
            };
            apply::handle_apply(
                items.as_deref(),
                selection.template.as_deref(),
                plan.as_deref(),
                output.unwrap_or(default_output),
                quiet,
            )
        },
        Commands::Undo { output } => undo::handle_undo(output.unwrap_or(default_output)),
        Commands::History { limit, output } => {
            history::handle_history(limit, output.unwrap_or(default_output))?;
            Ok(true)
        },
    }
}
