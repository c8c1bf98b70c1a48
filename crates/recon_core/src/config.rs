//! Pipeline configuration.
//!
//! The give-up ("TP") and give-up-only ("GO") reconciliations share one
//! pipeline and differ only in:
//! - the Atlantis `RecordType` filter value,
//! - an optional GMI flag-column filter,
//! - whether the rate comparison runs,
//! - a few literal column names.
//!
//! [`PipelineConfig`] captures exactly those differences. Column names can be
//! overridden from TOML; unspecified fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ReconError;

/// Pipeline variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    /// Give-up trades
    #[default]
    Tp,
    /// Give-up-only trades
    Go,
}

impl PipelineKind {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineKind::Tp => "TP",
            PipelineKind::Go => "GO",
        }
    }

    /// Atlantis `RecordType` value selected by this variant.
    pub fn record_type(&self) -> &'static str {
        match self {
            PipelineKind::Tp => "TP",
            PipelineKind::Go => "TR",
        }
    }

    /// GMI flag value selected by this variant, if any.
    pub fn gmi_flag(&self) -> Option<&'static str> {
        match self {
            PipelineKind::Tp => None,
            PipelineKind::Go => Some("GO"),
        }
    }

    /// Whether this variant carries a give-up rate.
    pub fn has_rate(&self) -> bool {
        matches!(self, PipelineKind::Tp)
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineKind {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tp" => Ok(PipelineKind::Tp),
            "go" => Ok(PipelineKind::Go),
            other => Err(ReconError::invalid_config(format!(
                "Unknown pipeline: {}. Supported: tp, go",
                other
            ))),
        }
    }
}

/// Atlantis source column names (matched case-sensitively).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlantisColumns {
    /// Row-type column used for the record filter
    pub record_type: String,
    /// Broker code column
    pub cb: String,
    /// Trade date column
    pub date: String,
    /// Quantity column
    pub qty: String,
    /// Fee column
    pub fee: String,
    /// Clearing account column
    pub account: String,
    /// Give-up rate column
    pub rate: String,
}

impl Default for AtlantisColumns {
    fn default() -> Self {
        Self {
            record_type: "RecordType".to_string(),
            cb: "ExchangeEBCode".to_string(),
            date: "TradeDate".to_string(),
            qty: "Quantity".to_string(),
            fee: "GiveUpAmt".to_string(),
            account: "ClearingAccount".to_string(),
            rate: "GiveUpRate".to_string(),
        }
    }
}

/// GMI source column names (matched case-insensitively).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmiColumns {
    /// Broker code column
    pub cb: String,
    /// Trade date column
    pub date: String,
    /// Quantity column
    pub qty: String,
    /// Fee column
    pub fee: String,
    /// Preferred account column
    pub account: String,
    /// Account column used when the preferred one is absent
    pub account_fallback: String,
    /// Flag column used by the give-up-only filter
    pub flag: String,
}

impl Default for GmiColumns {
    fn default() -> Self {
        Self {
            cb: "TGIVF#".to_string(),
            date: "TEDATE".to_string(),
            qty: "TQTY".to_string(),
            fee: "TFEE5".to_string(),
            account: "Acct".to_string(),
            account_fallback: "Account".to_string(),
            flag: "TGIVIO".to_string(),
        }
    }
}

/// Parameters of one reconciliation pipeline.
///
/// # Examples
///
/// ```
/// use recon_core::config::{PipelineConfig, PipelineKind};
///
/// let go = PipelineConfig::go();
/// assert_eq!(go.record_type, "TR");
/// assert_eq!(go.gmi_flag.as_deref(), Some("GO"));
/// assert!(!go.rate_comparison);
/// assert_eq!(PipelineConfig::preset(PipelineKind::Tp), PipelineConfig::tp());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Variant this configuration was derived from
    pub kind: PipelineKind,
    /// Atlantis rows are kept only when `RecordType` equals this value
    pub record_type: String,
    /// GMI rows are kept only when the flag column equals this value
    pub gmi_flag: Option<String>,
    /// Whether the rate comparison view is produced
    pub rate_comparison: bool,
    /// Atlantis column names
    pub atlantis: AtlantisColumns,
    /// GMI column names
    pub gmi: GmiColumns,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::tp()
    }
}

impl PipelineConfig {
    /// Give-up ("TP") preset.
    pub fn tp() -> Self {
        Self::preset(PipelineKind::Tp)
    }

    /// Give-up-only ("GO") preset.
    pub fn go() -> Self {
        Self::preset(PipelineKind::Go)
    }

    /// Preset for a pipeline variant.
    pub fn preset(kind: PipelineKind) -> Self {
        Self {
            kind,
            record_type: kind.record_type().to_string(),
            gmi_flag: kind.gmi_flag().map(str::to_string),
            rate_comparison: kind.has_rate(),
            atlantis: AtlantisColumns::default(),
            gmi: GmiColumns::default(),
        }
    }

    /// Toggle the rate comparison view.
    pub fn with_rate_comparison(mut self, enabled: bool) -> Self {
        self.rate_comparison = enabled;
        self
    }

    /// Replace the column maps.
    pub fn with_columns(mut self, atlantis: AtlantisColumns, gmi: GmiColumns) -> Self {
        self.atlantis = atlantis;
        self.gmi = gmi;
        self
    }

    /// Validate the configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ReconError> {
        let mut errors = Vec::new();

        if self.record_type.trim().is_empty() {
            errors.push("record_type cannot be empty".to_string());
        }
        if let Some(flag) = &self.gmi_flag {
            if flag.trim().is_empty() {
                errors.push("gmi_flag cannot be empty when set".to_string());
            }
        }

        let a = &self.atlantis;
        let mut atlantis_names = vec![
            ("record_type", &a.record_type),
            ("cb", &a.cb),
            ("date", &a.date),
            ("qty", &a.qty),
            ("fee", &a.fee),
            ("account", &a.account),
        ];
        if self.rate_comparison {
            atlantis_names.push(("rate", &a.rate));
        }
        for (field, name) in atlantis_names {
            if name.trim().is_empty() {
                errors.push(format!("atlantis column '{}' cannot be empty", field));
            }
        }

        let g = &self.gmi;
        let mut gmi_names = vec![
            ("cb", &g.cb),
            ("date", &g.date),
            ("qty", &g.qty),
            ("fee", &g.fee),
            ("account", &g.account),
            ("account_fallback", &g.account_fallback),
        ];
        if self.gmi_flag.is_some() {
            gmi_names.push(("flag", &g.flag));
        }
        for (field, name) in gmi_names {
            if name.trim().is_empty() {
                errors.push(format!("gmi column '{}' cannot be empty", field));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReconError::invalid_config(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_filters_and_rate() {
        let tp = PipelineConfig::tp();
        let go = PipelineConfig::go();
        assert_eq!(tp.record_type, "TP");
        assert_eq!(tp.gmi_flag, None);
        assert!(tp.rate_comparison);
        assert_eq!(go.record_type, "TR");
        assert_eq!(tp.atlantis, go.atlantis);
        assert_eq!(tp.gmi, go.gmi);
    }

    #[test]
    fn test_presets_validate() {
        assert!(PipelineConfig::tp().validate().is_ok());
        assert!(PipelineConfig::go().validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = PipelineConfig::tp();
        config.record_type = " ".to_string();
        config.atlantis.rate = String::new();
        config.gmi.cb = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("record_type"));
        assert!(err.contains("atlantis column 'rate'"));
        assert!(err.contains("gmi column 'cb'"));
    }

    #[test]
    fn test_rate_column_only_required_with_rate_comparison() {
        let mut config = PipelineConfig::go();
        config.atlantis.rate = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_kind_from_str() {
        assert_eq!("TP".parse::<PipelineKind>().unwrap(), PipelineKind::Tp);
        assert_eq!("go".parse::<PipelineKind>().unwrap(), PipelineKind::Go);
        assert!("xx".parse::<PipelineKind>().is_err());
    }
}
