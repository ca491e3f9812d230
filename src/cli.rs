//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and log level selection.

use crate::config::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

/// TicketLens - support ticket categorizer and report generator
///
/// Reads a CSV export of support tickets, assigns each ticket a category
/// from a fixed keyword table, and writes a report with category rankings,
/// priority/status distributions, recurring subjects and high-risk samples.
///
/// Examples:
///   ticketlens
///   ticketlens --csv exports/march.csv --out output/march.json
///   ticketlens --csv exports/march.csv --format markdown --out output/march.md
///   ticketlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the tickets CSV file
    ///
    /// Default: data/sample_tickets.csv, or `general.csv` from .ticketlens.toml
    #[arg(long, value_name = "FILE", env = "TICKETLENS_CSV")]
    pub csv: Option<PathBuf>,

    /// Output report path
    ///
    /// Default: output/ticket_report.json. The parent directory is created if missing.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Output format (json, markdown)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .ticketlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .ticketlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref out) = self.out {
            if out.as_os_str().is_empty() {
                return Err("Output path must not be empty".to_string());
            }
            if out.is_dir() {
                return Err(format!("Output path is a directory: {}", out.display()));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            csv: Some(PathBuf::from("tickets.csv")),
            out: Some(PathBuf::from("report.json")),
            format: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "ticketlens",
            "--csv",
            "in.csv",
            "-o",
            "out/report.md",
            "--format",
            "markdown",
            "-v",
        ]);
        assert_eq!(args.csv, Some(PathBuf::from("in.csv")));
        assert_eq!(args.out, Some(PathBuf::from("out/report.md")));
        assert_eq!(args.format, Some(ReportFormat::Markdown));
        assert!(args.verbose);
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_output_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = make_args();
        args.out = Some(dir.path().to_path_buf());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_config() {
        let mut args = make_args();
        args.config = Some(PathBuf::from("definitely/not/here.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
