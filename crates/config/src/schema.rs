//! Report configuration schema, validation, and parsing.

use crate::problems;
use safely_typed_shared::AppError;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

/// Current report config schema version.
pub const CURRENT_REPORT_CONFIG_VERSION: u32 = 1;

/// Output format for rendered problem reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Single-line human-readable text.
    #[default]
    Text,
    /// Compact JSON object.
    Json,
}

/// Controls how structured errors are rendered for callers and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ReportConfig {
    /// Schema version.
    pub version: u32,
    /// Output format.
    pub format: ReportFormat,
    /// Include the correlation id when the error carries one.
    pub include_error_id: bool,
    /// Include logs-only extras. Only enable for internal sinks.
    pub include_logs_only: bool,
    /// Extra keys to redact in addition to secret-looking ones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redact_keys: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_REPORT_CONFIG_VERSION,
            format: ReportFormat::Text,
            include_error_id: true,
            include_logs_only: false,
            redact_keys: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Validate the config and normalize redact keys (trimmed, sorted, deduped).
    pub fn validate_and_normalize(mut self) -> Result<ValidatedReportConfig, ConfigSchemaError> {
        if self.version != CURRENT_REPORT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_REPORT_CONFIG_VERSION,
            });
        }

        let mut keys = Vec::with_capacity(self.redact_keys.len());
        for (index, key) in self.redact_keys.iter().enumerate() {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyRedactKey { index });
            }
            keys.push(trimmed.to_owned());
        }
        keys.sort_unstable();
        keys.dedup();
        self.redact_keys = keys;

        Ok(ValidatedReportConfig { raw: self })
    }

    /// Returns true when `key` is listed in `redact_keys`.
    #[must_use]
    pub fn is_redacted_key(&self, key: &str) -> bool {
        self.redact_keys.iter().any(|candidate| candidate == key)
    }
}

/// Report config that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReportConfig {
    raw: ReportConfig,
}

impl ValidatedReportConfig {
    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &ReportConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> ReportConfig {
        self.raw
    }
}

impl std::ops::Deref for ValidatedReportConfig {
    type Target = ReportConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Typed validation errors for the report config schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this crate.
    #[error("report config version {found} is not supported (expected {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A redact key was empty after trimming.
    #[error("redactKeys[{index}] must be non-empty")]
    EmptyRedactKey {
        /// Position of the offending entry.
        index: usize,
    },
}

impl From<ConfigSchemaError> for AppError {
    fn from(error: ConfigSchemaError) -> Self {
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => {
                Self::new(&problems::UNSUPPORTED_VERSION)
                    .with_public("found", found)
                    .with_public("supported", supported)
            },
            ConfigSchemaError::EmptyRedactKey { index } => Self::new(&problems::INVALID_REDACT_KEY)
                .with_public("dataPath", format!("redactKeys[{index}]")),
        }
    }
}

/// Parse a report config from a JSON string, applying validation and normalization.
pub fn parse_report_config_json(input: &str) -> Result<ValidatedReportConfig, AppError> {
    let config: ReportConfig = serde_json::from_str(input).map_err(|error| {
        AppError::new(&problems::INVALID_JSON)
            .with_public("line", error.line())
            .with_public("column", error.column())
            .with_logs_only("detail", error.to_string())
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a report config from a TOML string, applying validation and normalization.
pub fn parse_report_config_toml(input: &str) -> Result<ValidatedReportConfig, AppError> {
    let config: ReportConfig = toml::from_str(input).map_err(|error| {
        AppError::new(&problems::INVALID_TOML).with_logs_only("detail", error.to_string())
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// JSON Schema for [`ReportConfig`].
#[must_use]
pub fn report_config_schema() -> Schema {
    schema_for!(ReportConfig)
}
