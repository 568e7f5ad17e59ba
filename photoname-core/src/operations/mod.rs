//! High-level operations that correspond to CLI commands
//!
//! These modules contain the business logic for each photoname command,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod apply;
pub mod history;
pub mod preview;
pub mod undo;

// Re-export the main operation functions for easy access
pub use apply::{apply_items_operation, apply_operation};
pub use history::history_operation;
pub use preview::preview_operation;
pub use undo::undo_operation;

use crate::config::{Config, STATE_DIR};
use crate::plan::PLAN_FILE_NAME;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Working directory, its state directory and the config loaded from it
pub(crate) struct Workspace {
    pub working_dir: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn load(working_dir: Option<&Path>) -> Result<Self> {
        let working_dir = working_dir.unwrap_or_else(|| Path::new(".")).to_path_buf();
        let config = Config::load(&working_dir)?;
        Ok(Self {
            working_dir,
            config,
        })
    }

    pub fn state_dir(&self) -> PathBuf {
        self.working_dir.join(STATE_DIR)
    }

    pub fn plan_path(&self) -> PathBuf {
        self.state_dir().join(PLAN_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.config.log_path(&self.working_dir)
    }

    /// The explicit template if one was given, else the configured default
    pub fn template(&self, template: Option<&str>) -> String {
        template
            .map_or_else(|| self.config.defaults.template.clone(), ToString::to_string)
    }
}
