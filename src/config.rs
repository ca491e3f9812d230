//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.ticketlens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".ticketlens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Ticket CSV to analyze.
    #[serde(default = "default_csv")]
    pub csv: PathBuf,

    /// Report output path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            csv: default_csv(),
            output: default_output(),
        }
    }
}

fn default_csv() -> PathBuf {
    PathBuf::from("data/sample_tickets.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("output/ticket_report.json")
}

/// Output document format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,
    /// Markdown summary
    Markdown,
}

/// Report generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,

    /// Number of categories in the ranking.
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Number of recurring subjects listed.
    #[serde(default = "default_recurring_issues")]
    pub recurring_issues: usize,

    /// Number of high-risk tickets sampled.
    #[serde(default = "default_high_risk_samples")]
    pub high_risk_samples: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            top_categories: default_top_categories(),
            recurring_issues: default_recurring_issues(),
            high_risk_samples: default_high_risk_samples(),
        }
    }
}

fn default_top_categories() -> usize {
    6
}

fn default_recurring_issues() -> usize {
    8
}

fn default_high_risk_samples() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.ticketlens.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref csv) = args.csv {
            self.general.csv = csv.clone();
        }
        if let Some(ref out) = args.out {
            self.general.output = out.clone();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Check that the report limits are usable.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("top_categories", self.report.top_categories),
            ("recurring_issues", self.report.recurring_issues),
            ("high_risk_samples", self.report.high_risk_samples),
        ];

        for (name, value) in limits {
            if value == 0 {
                anyhow::bail!("report.{} must be at least 1", name);
            }
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
