//! Rendering and logging of structured problems.

use safely_typed_config::{ReportConfig, ReportFormat};
use safely_typed_shared::{AppError, ErrorId, ErrorKind, ErrorMetadata, REDACTED, is_secret_key};
use serde_json::{Map, Value};

const LOG_TARGET: &str = "safely_typed::problem";

/// Render `error` for a caller according to `config`.
///
/// The public payload is always included; logs-only data only when
/// `include_logs_only` is set. Secret-looking keys and configured
/// `redact_keys` are replaced with `[REDACTED]` at every depth.
pub fn render_problem(error: &AppError, config: &ReportConfig) -> String {
    let public = redacted_object(error.extra().public(), config);
    let logs_only = config
        .include_logs_only
        .then(|| redacted_object(error.extra().logs_only().expose(), config));
    let error_id = error
        .error_id()
        .filter(|_| config.include_error_id)
        .map(|id| id.as_str().to_owned());

    match config.format {
        ReportFormat::Text => render_text(error, error_id, &public, logs_only.as_ref()),
        ReportFormat::Json => render_json(error, error_id, public, logs_only),
    }
}

/// Emit one `tracing` event for `error` using the default redaction policy.
pub fn log_problem(error: &AppError) {
    log_problem_with(error, &ReportConfig::default());
}

/// Emit one `tracing` event for `error`.
///
/// Expected problems log at `warn`, everything else at `error`. Logs-only
/// data is always included; secret-looking keys and the configured
/// `redact_keys` are still redacted.
pub fn log_problem_with(error: &AppError, config: &ReportConfig) {
    let public = Value::Object(redacted_object(error.extra().public(), config));
    let logs_only = Value::Object(redacted_object(error.extra().logs_only().expose(), config));
    let error_id = error.error_id().map(ErrorId::as_str);

    match error.kind() {
        ErrorKind::Expected => tracing::warn!(
            target: LOG_TARGET,
            code = %error.code(),
            kind = %error.kind(),
            error_id,
            public = %public,
            logs_only = %logs_only,
            "{}",
            error.description()
        ),
        ErrorKind::Invariant | ErrorKind::Unexpected => tracing::error!(
            target: LOG_TARGET,
            code = %error.code(),
            kind = %error.kind(),
            error_id,
            public = %public,
            logs_only = %logs_only,
            "{}",
            error.description()
        ),
    }
}

fn render_text(
    error: &AppError,
    error_id: Option<String>,
    public: &Map<String, Value>,
    logs_only: Option<&Map<String, Value>>,
) -> String {
    let mut line = format!("{}: {}", error.code(), error.description());
    if let Some(error_id) = error_id {
        line.push_str(&format!(" [errorId={error_id}]"));
    }
    if !public.is_empty() {
        line.push_str(&format!(" ({})", join_fields(public)));
    }
    if let Some(logs_only) = logs_only.filter(|fields| !fields.is_empty()) {
        line.push_str(&format!(" logsOnly({})", join_fields(logs_only)));
    }
    line
}

fn join_fields(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_json(
    error: &AppError,
    error_id: Option<String>,
    public: Map<String, Value>,
    logs_only: Option<Map<String, Value>>,
) -> String {
    let mut payload = Map::new();
    payload.insert("definedBy".to_owned(), Value::from(error.defined_by()));
    payload.insert("code".to_owned(), Value::from(error.code().code()));
    payload.insert("kind".to_owned(), kind_value(error.kind()));
    payload.insert("description".to_owned(), Value::from(error.description()));
    if let Some(error_id) = error_id {
        payload.insert("errorId".to_owned(), Value::from(error_id));
    }
    if !public.is_empty() {
        payload.insert("extra".to_owned(), Value::Object(public));
    }
    if let Some(logs_only) = logs_only.filter(|fields| !fields.is_empty()) {
        payload.insert("logsOnly".to_owned(), Value::Object(logs_only));
    }
    Value::Object(payload).to_string()
}

fn kind_value(kind: ErrorKind) -> Value {
    serde_json::to_value(kind).unwrap_or(Value::Null)
}

fn redacted_object(fields: &ErrorMetadata, config: &ReportConfig) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| {
            let value = if should_redact(key, config) {
                Value::from(REDACTED)
            } else {
                redact_value(value.clone(), config)
            };
            (key.clone(), value)
        })
        .collect()
}

fn redact_value(value: Value, config: &ReportConfig) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, nested)| {
                    let nested = if should_redact(&key, config) {
                        Value::from(REDACTED)
                    } else {
                        redact_value(nested, config)
                    };
                    (key, nested)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| redact_value(item, config))
                .collect(),
        ),
        other => other,
    }
}

fn should_redact(key: &str, config: &ReportConfig) -> bool {
    is_secret_key(key) || config.is_redacted_key(key)
}
