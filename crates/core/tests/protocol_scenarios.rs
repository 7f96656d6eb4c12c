//! Protocol checks against dynamic records and deserialized input.

use safely_typed_core::{
    HAS_PROTOCOL, ProtocolDefinition, Unknown, ValidatorOptions, implements_protocol, is_has,
    must_be_entity, validate_has, validate_implements_protocol,
};
use safely_typed_shared::{DataPath, problems};
use safely_typed_testkit::objects;
use serde_json::json;
use std::panic::catch_unwind;

const ABC: ProtocolDefinition<'static> = ProtocolDefinition::new("Abc", &["a", "b", "c"]);

#[test]
fn missing_methods_are_listed_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let input = Unknown::from(objects::record_with_methods(&["a"]));
    let options = ValidatorOptions::at(DataPath::parse("args")?);
    let Err(error) = validate_implements_protocol(&ABC, &input, &options) else {
        return Err("b and c are missing".into());
    };

    assert!(error.is(&problems::MISSING_CAPABILITY));
    assert_eq!(error.public_field("missingMethods"), Some(&json!(["b", "c"])));
    assert_eq!(error.public_field("dataPath"), Some(&json!("args")));
    Ok(())
}

#[test]
fn full_implementors_are_returned_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let input = Unknown::from(objects::record_with_methods(&["c", "b", "a", "extra"]));
    let object = validate_implements_protocol(&ABC, &input, &ValidatorOptions::new())?;
    assert_eq!(object.to_unknown(), input);
    Ok(())
}

#[test]
fn null_is_rejected_as_unsupported_type() -> Result<(), Box<dyn std::error::Error>> {
    let Err(error) = validate_has(&Unknown::Null, &ValidatorOptions::new()) else {
        return Err("null has no members".into());
    };
    assert!(error.is(&problems::UNSUPPORTED_TYPE));
    assert!(!error.is(&problems::MISSING_CAPABILITY));
    Ok(())
}

#[test]
fn getters_returning_functions_do_not_satisfy_protocols() {
    assert!(!is_has(&objects::getter_only_has()));
    assert!(is_has(&objects::has_container(&["id"])));
}

#[test]
fn inherited_methods_count() {
    let input = objects::inherited_entity();
    let object = must_be_entity(&input, &ValidatorOptions::new());
    assert!(object.as_record().is_some());
}

#[test]
fn deserialized_data_never_implements_protocols() {
    let input = Unknown::from(json!({ "has": "yes", "valueOf": 1 }));
    assert!(!implements_protocol(&HAS_PROTOCOL, &input));
    assert!(!implements_protocol(&HAS_PROTOCOL, &Unknown::from(json!([1, 2]))));
}

#[test]
fn must_be_entity_unwinds_for_plain_values() {
    let caught = catch_unwind(|| {
        let input = objects::value_object();
        must_be_entity(&input, &ValidatorOptions::new()).to_unknown()
    });
    assert!(caught.is_err());
}
