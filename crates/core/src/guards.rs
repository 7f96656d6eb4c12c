//! Adapters that fold validators into predicates and guarantees.

use crate::options::ValidatorOptions;
use crate::pipeline::{must_be, must_be_with};
use safely_typed_shared::{AppError, AppErrorOr, AppErrorOrExt};
use std::convert::Infallible;

/// A validator turning input `I` into a checked `T`.
///
/// Every `Fn(I, &ValidatorOptions) -> AppErrorOr<T>` is a validator.
pub trait TypeValidator<I, T> {
    /// Check `input`.
    fn validate(&self, input: I, options: &ValidatorOptions) -> AppErrorOr<T>;
}

impl<I, T, F> TypeValidator<I, T> for F
where
    F: Fn(I, &ValidatorOptions) -> AppErrorOr<T>,
{
    fn validate(&self, input: I, options: &ValidatorOptions) -> AppErrorOr<T> {
        self(input, options)
    }
}

/// Validators over plain data share the same contract.
pub use self::TypeValidator as DataValidator;

/// `true` iff `validator` accepts `input`. Never panics.
pub fn is_type<I, T, V>(validator: &V, input: I, options: &ValidatorOptions) -> bool
where
    V: TypeValidator<I, T> + ?Sized,
{
    validator.validate(input, options).is_valid()
}

/// `true` iff the plain-data `validator` accepts `input`. Never panics.
pub fn is_data<I, T, V>(validator: &V, input: I, options: &ValidatorOptions) -> bool
where
    V: DataValidator<I, T> + ?Sized,
{
    validator.validate(input, options).is_valid()
}

/// Return the validated value or unwind through the default handler.
pub fn guarantee<I, T, V>(validator: &V, input: I, options: &ValidatorOptions) -> T
where
    V: TypeValidator<I, T> + ?Sized,
{
    must_be(validator.validate(input, options)).value()
}

/// Return the validated value or divert to `on_error`.
pub fn guarantee_with<I, T, V, H>(
    validator: &V,
    input: I,
    options: &ValidatorOptions,
    on_error: H,
) -> T
where
    V: TypeValidator<I, T> + ?Sized,
    H: FnOnce(AppError) -> Infallible,
{
    must_be_with(validator.validate(input, options), on_error).value()
}
