use crate::history::LOG_FILE_NAME;
use crate::model::{DEFAULT_GROUP, DEFAULT_LABEL};
use crate::template::DEFAULT_TEMPLATE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding config, undo log and lock file
pub const STATE_DIR: &str = ".photoname";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Naming template used when none is given
    #[serde(default = "default_template")]
    pub template: String,

    /// Label for items that don't carry one
    #[serde(default = "default_label")]
    pub label: String,

    /// Group for items that don't carry one
    #[serde(default = "default_group")]
    pub group: u32,

    /// Default output format: "summary" or "json"
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            label: default_label(),
            group: default_group(),
            output_format: default_output_format(),
            use_color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Undo log location; relative paths resolve against the working directory
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
        }
    }
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

fn default_group() -> u32 {
    DEFAULT_GROUP
}

fn default_output_format() -> String {
    "summary".to_string()
}

fn default_log_path() -> PathBuf {
    Path::new(STATE_DIR).join(LOG_FILE_NAME)
}

impl Config {
    /// Load config from `<working_dir>/.photoname/config.toml` if it exists
    pub fn load(working_dir: &Path) -> Result<Self> {
        let config_path = working_dir.join(STATE_DIR).join("config.toml");
        if config_path.exists() {
            return Self::load_from_path(&config_path);
        }

        // Return default config if no config file exists
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Undo log location resolved against `working_dir`
    pub fn log_path(&self, working_dir: &Path) -> PathBuf {
        if self.log.path.is_absolute() {
            self.log.path.clone()
        } else {
            working_dir.join(&self.log.path)
        }
    }
}
