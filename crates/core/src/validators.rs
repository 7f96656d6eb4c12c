//! Leaf validators over [`Unknown`] input.
//!
//! Shape mismatches report `UNSUPPORTED_TYPE` with `dataPath`, `expected`
//! and `actual` in the public payload.

use crate::options::ValidatorOptions;
use crate::pipeline::validate;
use crate::unknown::{ObjectLike, Record, Unknown};
use safely_typed_shared::{AppError, AppErrorOr, AppErrorOrExt, problems};
use std::sync::Arc;

fn unsupported_type(
    input: &Unknown,
    expected: &'static str,
    options: &ValidatorOptions,
) -> AppError {
    AppError::new(&problems::UNSUPPORTED_TYPE)
        .with_public("dataPath", options.data_path().as_str())
        .with_public("expected", expected)
        .with_public("actual", input.type_name())
}

/// Accept records and lists.
pub fn validate_object<'a>(
    input: &'a Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<ObjectLike<'a>> {
    input
        .as_object()
        .ok_or_else(|| unsupported_type(input, "object", options))
}

/// Accept records only.
pub fn validate_record<'a>(
    input: &'a Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<&'a Arc<Record>> {
    match input {
        Unknown::Record(record) => Ok(record),
        _ => Err(unsupported_type(input, "record", options)),
    }
}

/// Accept lists.
pub fn validate_array<'a>(
    input: &'a Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<&'a [Unknown]> {
    match input {
        Unknown::List(items) => Ok(items),
        _ => Err(unsupported_type(input, "array", options)),
    }
}

/// Accept text.
pub fn validate_string<'a>(input: &'a Unknown, options: &ValidatorOptions) -> AppErrorOr<&'a str> {
    match input {
        Unknown::Text(text) => Ok(text),
        _ => Err(unsupported_type(input, "string", options)),
    }
}

/// Accept text with at least one non-whitespace character.
pub fn validate_non_empty_string<'a>(
    input: &'a Unknown,
    options: &ValidatorOptions,
) -> AppErrorOr<&'a str> {
    validate(validate_string(input, options))
        .next(|text| {
            if text.trim().is_empty() {
                Err(AppError::new(&problems::UNSUPPORTED_VALUE)
                    .with_public("dataPath", options.data_path().as_str())
                    .with_public("expected", "non-empty string")
                    .with_logs_only("length", text.len()))
            } else {
                Ok(text)
            }
        })
        .value()
}

/// Accept numbers other than NaN.
pub fn validate_number(input: &Unknown, options: &ValidatorOptions) -> AppErrorOr<f64> {
    match input {
        Unknown::Number(number) if number.is_nan() => {
            Err(AppError::new(&problems::UNSUPPORTED_VALUE)
                .with_public("dataPath", options.data_path().as_str())
                .with_public("expected", "number")
                .with_public("actual", "NaN"))
        },
        Unknown::Number(number) => Ok(*number),
        _ => Err(unsupported_type(input, "number", options)),
    }
}

/// Accept booleans.
pub fn validate_boolean(input: &Unknown, options: &ValidatorOptions) -> AppErrorOr<bool> {
    match input {
        Unknown::Bool(flag) => Ok(*flag),
        _ => Err(unsupported_type(input, "boolean", options)),
    }
}

/// Validator for numbers within the inclusive range `min..=max`.
pub fn number_in_range(
    min: f64,
    max: f64,
) -> impl Fn(&Unknown, &ValidatorOptions) -> AppErrorOr<f64> + Copy {
    move |input, options| {
        validate(validate_number(input, options))
            .next(|number| {
                if (min..=max).contains(&number) {
                    Ok(number)
                } else {
                    Err(AppError::new(&problems::VALUE_OUT_OF_RANGE)
                        .with_public("dataPath", options.data_path().as_str())
                        .with_public("min", min)
                        .with_public("max", max)
                        .with_public("value", number))
                }
            })
            .value()
    }
}

/// Validator for lists whose every element passes `item_validator`.
///
/// Element paths are `parent[index]`; validation stops at the first failing
/// element.
pub fn validate_array_of<'a, T, V>(
    item_validator: V,
) -> impl Fn(&'a Unknown, &ValidatorOptions) -> AppErrorOr<Vec<T>>
where
    V: Fn(&'a Unknown, &ValidatorOptions) -> AppErrorOr<T>,
{
    move |input, options| {
        let items = validate_array(input, options)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| item_validator(item, &options.nested_index(index)))
            .collect::<AppErrorOr<Vec<T>>>()
            .with_logs_only_extra("arrayLength", items.len())
    }
}
