//! Rendering problems with report configs loaded from fixtures.

use safely_typed_config::{parse_report_config_json, parse_report_config_toml};
use safely_typed_core::{Unknown, ValidatorOptions, render_problem, validate_has};
use safely_typed_shared::{AppError, REDACTED};
use safely_typed_testkit::read_fixture;
use serde_json::{Value, json};
use std::error::Error;

fn has_failure() -> Result<AppError, Box<dyn Error>> {
    let Err(error) = validate_has(&Unknown::from(json!({ "has": 1 })), &ValidatorOptions::new())
    else {
        return Err("a data field is not a method".into());
    };
    Ok(error
        .with_public("email", "ada@example.com")
        .with_logs_only("sessionCookie", "c=1")
        .with_generated_error_id())
}

#[test]
fn json_fixture_renders_redacted_json() -> Result<(), Box<dyn Error>> {
    let config = parse_report_config_json(&read_fixture("config/report-config.valid.json")?)?;
    let rendered: Value = serde_json::from_str(&render_problem(&has_failure()?, &config))?;

    assert_eq!(rendered["code"], json!("missing_capability"));
    assert_eq!(rendered["extra"]["missingMethods"], json!(["has"]));
    assert_eq!(rendered["extra"]["email"], json!(REDACTED));
    assert!(rendered.get("errorId").is_none());
    assert!(rendered.get("logsOnly").is_none());
    Ok(())
}

#[test]
fn toml_fixture_renders_text_with_logs_only() -> Result<(), Box<dyn Error>> {
    let config = parse_report_config_toml(&read_fixture("config/report-config.valid.toml")?)?;
    let rendered = render_problem(&has_failure()?, &config);

    assert!(rendered.starts_with("safely-typed:missing_capability"));
    assert!(rendered.contains("[errorId="));
    assert!(rendered.contains("ada@example.com"));
    assert!(rendered.contains(&format!("logsOnly(sessionCookie=\"{REDACTED}\")")));
    Ok(())
}
