//! # safely-typed
//!
//! Facade API for consumers.
//! This crate depends on `core`, `config`, and `shared`.
//!
//! ```
//! use safely_typed::prelude::*;
//!
//! let input = Unknown::from(Record::new().with_method("has", |_| Unknown::Bool(true)));
//! assert!(is_has(&input));
//! assert!(!is_has(&Unknown::Null));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

pub use safely_typed_config::{ReportConfig, ReportFormat, ValidatedReportConfig};
pub use safely_typed_core::{
    Brand, Branded, DataValidator, GuaranteePipeline, Introspect, MemberKind, ObjectLike, Outcome,
    ProtocolDefinition, Record, TypeValidator, Unknown, ValidationPipeline, ValidatorOptions,
    guarantee, guarantee_with, implements_protocol, is_data, is_type, log_problem, log_problem_with,
    make_branded, must_be, must_be_branded, must_be_with, raise, render_problem, validate,
    validate_implements_protocol,
};
pub use safely_typed_shared::{
    AppError, AppErrorOr, AppErrorOrExt, DataPath, ErrorId, ErrorKind, ProblemType,
    UnexpectedError, problems,
};

/// Common imports for validating untrusted input.
pub mod prelude {
    pub use safely_typed_core::{
        ENTITY_PROTOCOL, HAS_PROTOCOL, Introspect, ObjectLike, ProtocolDefinition, Record,
        TypeValidator, Unknown, VALUE_PROTOCOL, ValidatorOptions, guarantee, implements_protocol,
        is_entity, is_has, is_type, is_value, must_be, must_be_entity, must_be_has, must_be_value,
        must_be_with, validate, validate_entity, validate_has, validate_implements_protocol,
        validate_value,
    };
    pub use safely_typed_shared::{AppError, AppErrorOr, AppErrorOrExt};
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Load the effective report config.
///
/// Starts from `config_path` (TOML when the extension is `toml`, JSON
/// otherwise) or the defaults, then applies `SAFELY_TYPED_REPORT_*` overrides
/// from `env`.
pub fn load_report_config(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> AppErrorOr<ValidatedReportConfig> {
    let base = match config_path {
        Some(path) => read_report_config_file(path)?.into_inner(),
        None => ReportConfig::default(),
    };
    let config = safely_typed_config::load_report_config_from_env_map(base, env)?;
    tracing::debug!(
        target: "safely_typed::config",
        from_file = config_path.is_some(),
        "loaded report config"
    );
    Ok(config)
}

/// Log `error` and render it for a caller, both under `config`'s redaction.
pub fn report_problem(error: &AppError, config: &ReportConfig) -> String {
    log_problem_with(error, config);
    render_problem(error, config)
}

fn read_report_config_file(path: &Path) -> AppErrorOr<ValidatedReportConfig> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        AppError::new(&safely_typed_config::problems::UNREADABLE_FILE)
            .with_public("reason", format!("{:?}", error.kind()))
            .with_logs_only("path", path.display().to_string())
            .with_logs_only("detail", error.to_string())
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("toml"));
    if is_toml {
        safely_typed_config::parse_report_config_toml(&raw)
    } else {
        safely_typed_config::parse_report_config_json(&raw)
    }
}
