//! # safely-typed-config
//!
//! Configuration for rendering and logging structured errors.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Problem types defined by this crate.
pub mod problems;
/// Report configuration schema and parsing.
pub mod schema;

pub use env::{
    ENV_REPORT_FORMAT, ENV_REPORT_INCLUDE_ERROR_ID, ENV_REPORT_INCLUDE_LOGS_ONLY,
    ENV_REPORT_REDACT_KEYS, EnvParseError, ReportEnv, apply_env_overrides,
    load_report_config_from_env_map,
};
pub use schema::{
    CURRENT_REPORT_CONFIG_VERSION, ConfigSchemaError, ReportConfig, ReportFormat,
    ValidatedReportConfig, parse_report_config_json, parse_report_config_toml,
    report_config_schema,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
