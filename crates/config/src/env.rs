//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict (invalid values fail fast) and deterministic (CSV lists
//! normalize to sorted/deduped values). The library never reads the process
//! environment on its own; callers pass a map (for example
//! `std::env::vars().collect()`).

use crate::problems;
use crate::schema::{ReportConfig, ReportFormat, ValidatedReportConfig};
use safely_typed_shared::{AppError, redact_if_secret};
use std::collections::BTreeMap;

/// Env var: report output format (`text` or `json`).
pub const ENV_REPORT_FORMAT: &str = "SAFELY_TYPED_REPORT_FORMAT";
/// Env var: include correlation ids in reports.
pub const ENV_REPORT_INCLUDE_ERROR_ID: &str = "SAFELY_TYPED_REPORT_INCLUDE_ERROR_ID";
/// Env var: include logs-only extras in reports.
pub const ENV_REPORT_INCLUDE_LOGS_ONLY: &str = "SAFELY_TYPED_REPORT_INCLUDE_LOGS_ONLY";
/// Env var: comma-separated extra keys to redact.
pub const ENV_REPORT_REDACT_KEYS: &str = "SAFELY_TYPED_REPORT_REDACT_KEYS";

/// Typed env-derived overrides for [`ReportConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportEnv {
    /// Override for `format`.
    pub format: Option<ReportFormat>,
    /// Override for `includeErrorId`.
    pub include_error_id: Option<bool>,
    /// Override for `includeLogsOnly`.
    pub include_logs_only: Option<bool>,
    /// Override for `redactKeys`.
    pub redact_keys: Option<Vec<String>>,
}

impl ReportEnv {
    /// Parse env overrides from an explicit map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            format: parse_optional_format(map, ENV_REPORT_FORMAT)?,
            include_error_id: parse_optional_bool(map, ENV_REPORT_INCLUDE_ERROR_ID)?,
            include_logs_only: parse_optional_bool(map, ENV_REPORT_INCLUDE_LOGS_ONLY)?,
            redact_keys: parse_optional_csv(map, ENV_REPORT_REDACT_KEYS)?,
        })
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.format.is_none()
            && self.include_error_id.is_none()
            && self.include_logs_only.is_none()
            && self.redact_keys.is_none()
    }
}

/// Merge env overrides into `base` and validate the result.
pub fn apply_env_overrides(
    base: ReportConfig,
    env: &ReportEnv,
) -> Result<ValidatedReportConfig, AppError> {
    let mut config = base;
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(include) = env.include_error_id {
        config.include_error_id = include;
    }
    if let Some(include) = env.include_logs_only {
        config.include_logs_only = include;
    }
    if let Some(keys) = &env.redact_keys {
        config.redact_keys.clone_from(keys);
    }

    tracing::debug!(
        target: "safely_typed::config",
        overrides = !env.is_empty(),
        format = ?config.format,
        "applied report config env overrides"
    );

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse overrides from `map` and merge them into `base`.
pub fn load_report_config_from_env_map(
    base: ReportConfig,
    map: &BTreeMap<String, String>,
) -> Result<ValidatedReportConfig, AppError> {
    let env = ReportEnv::from_map(map)?;
    apply_env_overrides(base, &env)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    #[error("{var} must be a boolean")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl From<EnvParseError> for AppError {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::new(&problems::INVALID_ENV);
        match error {
            EnvParseError::EmptyValue { var } => envelope
                .with_public("envVar", var)
                .with_public("reason", "empty"),
            EnvParseError::InvalidBool { var, value } => envelope
                .with_public("envVar", var)
                .with_public("expected", "boolean")
                .with_logs_only("value", redact_if_secret(var, &value)),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_public("envVar", var)
                .with_public("expected", "text | json")
                .with_logs_only("value", redact_if_secret(var, &value)),
        }
    }
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_format(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<ReportFormat>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "text" => Ok(Some(ReportFormat::Text)),
        "json" => Ok(Some(ReportFormat::Json)),
        _ => Err(EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_csv(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<String>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let mut items = parse_csv(raw);
    if items.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    items.sort_unstable();
    items.dedup();
    Ok(Some(items))
}

fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
