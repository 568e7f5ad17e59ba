use anyhow::{bail, Context, Result};
use photoname_core::pathsafe::is_image_file;
use photoname_core::{Config, SelectionItem};
use serde::Deserialize;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::SelectionArgs;

/// One entry of an `--items` file; missing fields take the command-line or
/// configured defaults
#[derive(Debug, Deserialize)]
struct ItemEntry {
    path: PathBuf,
    label: Option<String>,
    group: Option<NonZeroU32>,
}

/// Whether the command line names any files to rename
pub fn has_sources(args: &SelectionArgs) -> bool {
    !args.paths.is_empty() || args.dir.is_some() || args.items.is_some()
}

/// Build the ordered item list from the command line
pub fn collect_items(args: &SelectionArgs, config: &Config) -> Result<Vec<SelectionItem>> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let label = args
        .label
        .clone()
        .unwrap_or_else(|| config.defaults.label.clone());
    let group = args.group.unwrap_or(config.defaults.group);

    let items: Vec<SelectionItem> = if let Some(ref items_file) = args.items {
        load_items_file(items_file)?
            .into_iter()
            .map(|entry| {
                SelectionItem::new(
                    absolute(&cwd, &entry.path),
                    entry.label.unwrap_or_else(|| label.clone()),
                    entry.group.map_or(group, NonZeroU32::get),
                )
            })
            .collect()
    } else {
        let paths = match args.dir {
            Some(ref dir) => images_in(&absolute(&cwd, dir))?,
            None => args.paths.iter().map(|p| absolute(&cwd, p)).collect(),
        };

        paths
            .into_iter()
            .map(|path| SelectionItem::new(path, label.clone(), group))
            .collect()
    };

    if items.is_empty() {
        bail!("No files selected. Pass file paths, --dir or --items");
    }

    tracing::debug!(count = items.len(), "collected selection");
    Ok(items)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn load_items_file(path: &Path) -> Result<Vec<ItemEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read items from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse items from {}", path.display()))
}

fn images_in(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            images.push(entry.into_path());
        } else {
            tracing::trace!(path = %entry.path().display(), "not an image, skipping");
        }
    }

    Ok(images)
}
