//! CLI configuration management.
//!
//! Handles loading of `gi-recon.toml` with environment variable override
//! support. Every field has a default, so the file itself is optional.
//!
//! ```toml
//! pipeline = "go"
//! output = "out/recon.xlsx"
//! export = "xlsx"
//! log_level = "debug"
//!
//! [columns.gmi]
//! account = "ACCT_NO"
//! ```

use recon_core::config::{AtlantisColumns, GmiColumns, PipelineConfig, PipelineKind};
use serde::{Deserialize, Serialize};
use service_report::{ReportFormat, DEFAULT_WORKBOOK_NAME};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column-name overrides per source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOverrides {
    /// Atlantis column names
    pub atlantis: AtlantisColumns,
    /// GMI column names
    pub gmi: GmiColumns,
}

/// `gi-recon` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Default pipeline
    pub pipeline: PipelineKind,

    /// Export destination (workbook file or CSV directory)
    pub output: PathBuf,

    /// Export format
    pub export: ReportFormat,

    /// Rate comparison for pipelines that support it
    pub rate_comparison: bool,

    /// Log level
    pub log_level: String,

    /// Column-name overrides
    pub columns: ColumnOverrides,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineKind::default(),
            output: PathBuf::from(DEFAULT_WORKBOOK_NAME),
            export: ReportFormat::default(),
            rate_comparison: true,
            log_level: "info".to_string(),
            columns: ColumnOverrides::default(),
        }
    }
}

impl ReconConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable pipeline or export values leave the current setting.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(pipeline) = lookup("GIRECON_PIPELINE") {
            self.pipeline = pipeline.parse().unwrap_or(self.pipeline);
        }

        if let Some(output) = lookup("GIRECON_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        if let Some(export) = lookup("GIRECON_EXPORT") {
            self.export = export.parse().unwrap_or(self.export);
        }

        if let Some(rate) = lookup("GIRECON_RATE_COMPARISON") {
            self.rate_comparison = match rate.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => self.rate_comparison,
            };
        }

        if let Some(log_level) = lookup("GIRECON_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.output.as_os_str().is_empty() {
            errors.push("output cannot be empty".to_string());
        }

        // Column names are checked against the pipeline that would use them.
        if let Err(err) = self.pipeline_config(self.pipeline).validate() {
            errors.push(err.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (if present) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_optional(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Build the pipeline configuration for `kind` with this file's columns.
    pub fn pipeline_config(&self, kind: PipelineKind) -> PipelineConfig {
        PipelineConfig::preset(kind)
            .with_rate_comparison(kind.has_rate() && self.rate_comparison)
            .with_columns(self.columns.atlantis.clone(), self.columns.gmi.clone())
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {}: {message}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying message
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
