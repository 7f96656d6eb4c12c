//! Fail-fast validation chains.
//!
//! [`validate`] threads a value through fallible steps and hands back the
//! first error. [`must_be`] does the same but escalates failures to an error
//! handler that never returns, so [`GuaranteePipeline::value`] yields a bare
//! `T`.
//!
//! ```
//! use safely_typed_core::{must_be, validate};
//! use safely_typed_shared::{AppError, AppErrorOr, problems};
//!
//! fn positive(value: i64) -> AppErrorOr<i64> {
//!     if value > 0 {
//!         Ok(value)
//!     } else {
//!         Err(AppError::new(&problems::VALUE_OUT_OF_RANGE))
//!     }
//! }
//!
//! assert_eq!(validate(Ok(4)).next(positive).next(|n| Ok(n * 2)).value(), Ok(8));
//! assert!(validate(Ok(-1)).next(positive).value().is_err());
//! assert_eq!(must_be(Ok(3)).next(positive).value(), 3);
//! ```

use safely_typed_shared::{AppError, AppErrorOr, UnexpectedError, normalize_unexpected_error};
use std::convert::Infallible;
use std::fmt;

const TRACE_TARGET: &str = "safely_typed::pipeline";

/// Handler invoked when a guarantee fails. It cannot return.
pub type DefaultHandler = fn(AppError) -> Infallible;

/// State carried between pipeline steps.
#[derive(Debug)]
pub enum Outcome<T> {
    /// A value that passed every step so far.
    Valid(T),
    /// A structured failure.
    Problem(AppError),
    /// A failure that is not a structured [`AppError`].
    Unexpected(UnexpectedError),
}

impl<T> Outcome<T> {
    /// Returns true unless the outcome is [`Outcome::Valid`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        !matches!(self, Self::Valid(_))
    }
}

impl<T> From<AppErrorOr<T>> for Outcome<T> {
    fn from(result: AppErrorOr<T>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(error) => Self::Problem(error),
        }
    }
}

/// Start a validation chain from a value that may already have failed.
pub fn validate<T>(initial: AppErrorOr<T>) -> ValidationPipeline<T> {
    ValidationPipeline::from_outcome(initial.into())
}

/// Fail-fast chain that reports failures as values.
#[must_use = "call `.value()` to obtain the result"]
#[derive(Debug)]
pub struct ValidationPipeline<T> {
    state: Outcome<T>,
}

impl<T> ValidationPipeline<T> {
    /// Start a chain from any outcome, including a foreign failure.
    pub const fn from_outcome(state: Outcome<T>) -> Self {
        Self { state }
    }

    /// Run `step` on the current value. Once failed, `step` is never called.
    pub fn next<R, F>(self, step: F) -> ValidationPipeline<R>
    where
        F: FnOnce(T) -> AppErrorOr<R>,
    {
        let state = match self.state {
            Outcome::Valid(value) => step(value).into(),
            Outcome::Problem(error) => Outcome::Problem(error),
            Outcome::Unexpected(error) => Outcome::Unexpected(error),
        };
        ValidationPipeline { state }
    }

    /// Returns true once any step has failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.state.is_failed()
    }

    /// Finish the chain.
    ///
    /// A foreign failure is normalized into an `UNEXPECTED` error whose
    /// original message is kept in the logs-only payload.
    pub fn value(self) -> AppErrorOr<T> {
        match self.state {
            Outcome::Valid(value) => Ok(value),
            Outcome::Problem(error) => Err(error),
            Outcome::Unexpected(error) => Err(normalize_unexpected_error(error)),
        }
    }
}

/// Default guarantee handler: unwinds with the [`AppError`] as panic payload.
///
/// Recover it with `std::panic::catch_unwind` and `downcast::<AppError>()`.
pub fn raise(error: AppError) -> Infallible {
    std::panic::panic_any(error)
}

/// Start a guarantee chain that escalates failures through [`raise`].
pub fn must_be<T>(initial: AppErrorOr<T>) -> GuaranteePipeline<T, DefaultHandler> {
    let handler: DefaultHandler = raise;
    must_be_with(initial, handler)
}

/// Start a guarantee chain with a custom error handler.
pub fn must_be_with<T, H>(initial: AppErrorOr<T>, on_error: H) -> GuaranteePipeline<T, H>
where
    H: FnOnce(AppError) -> Infallible,
{
    GuaranteePipeline::from_outcome(initial.into(), on_error)
}

/// Fail-fast chain that only ever holds a valid value.
#[must_use = "call `.value()` to obtain the guaranteed value"]
pub struct GuaranteePipeline<T, H> {
    value: T,
    on_error: H,
}

impl<T, H> GuaranteePipeline<T, H>
where
    H: FnOnce(AppError) -> Infallible,
{
    /// Start a chain from any outcome.
    ///
    /// A structured failure goes to `on_error` immediately. A foreign failure
    /// bypasses the handler and is re-raised unchanged.
    pub fn from_outcome(outcome: Outcome<T>, on_error: H) -> Self {
        match outcome {
            Outcome::Valid(value) => Self { value, on_error },
            Outcome::Problem(error) => escalate(error, on_error),
            Outcome::Unexpected(error) => {
                tracing::debug!(
                    target: TRACE_TARGET,
                    error = %error,
                    "re-raising unexpected failure"
                );
                std::panic::panic_any(error)
            },
        }
    }

    /// Run `step` on the current value, escalating its failure.
    pub fn next<R, F>(self, step: F) -> GuaranteePipeline<R, H>
    where
        F: FnOnce(T) -> AppErrorOr<R>,
    {
        match step(self.value) {
            Ok(value) => GuaranteePipeline {
                value,
                on_error: self.on_error,
            },
            Err(error) => escalate(error, self.on_error),
        }
    }

    /// The guaranteed value.
    pub fn value(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug, H> fmt::Debug for GuaranteePipeline<T, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GuaranteePipeline")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

fn escalate<H>(error: AppError, on_error: H) -> !
where
    H: FnOnce(AppError) -> Infallible,
{
    tracing::debug!(
        target: TRACE_TARGET,
        code = %error.code(),
        kind = ?error.kind(),
        "guarantee failed"
    );
    match on_error(error) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use safely_typed_shared::{ErrorKind, problems};
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn out_of_range() -> AppError {
        AppError::new(&problems::VALUE_OUT_OF_RANGE).with_public("value", 42)
    }

    #[test]
    fn failed_seed_skips_every_step() {
        let calls = Cell::new(0);
        let result = validate::<i32>(Err(out_of_range()))
            .next(|value| {
                calls.set(calls.get() + 1);
                Ok(value)
            })
            .value();

        assert_eq!(result, Err(out_of_range()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn next_changes_the_value_type() {
        let result = validate(Ok("42"))
            .next(|raw| {
                raw.parse::<u8>()
                    .map_err(|_| AppError::new(&problems::UNSUPPORTED_VALUE))
            })
            .next(|number| Ok(u32::from(number) * 2))
            .value();
        assert_eq!(result, Ok(84));
    }

    #[test]
    fn is_failed_tracks_state() {
        let pipeline = validate(Ok(1));
        assert!(!pipeline.is_failed());
        let pipeline = pipeline.next(|_| Err::<i32, _>(out_of_range()));
        assert!(pipeline.is_failed());
    }

    #[test]
    fn unexpected_seed_is_normalized() -> Result<(), Box<dyn std::error::Error>> {
        let calls = Cell::new(0);
        let result = ValidationPipeline::<i32>::from_outcome(Outcome::Unexpected(
            UnexpectedError::message("socket closed"),
        ))
        .next(|value| {
            calls.set(calls.get() + 1);
            Ok(value)
        })
        .value();

        let Err(error) = result else {
            return Err("unexpected seed must fail".into());
        };
        assert!(error.is(&problems::UNEXPECTED));
        assert_eq!(error.kind(), ErrorKind::Unexpected);
        assert_eq!(
            error.extra().logs_only().expose().get("message"),
            Some(&serde_json::json!("socket closed"))
        );
        assert_eq!(calls.get(), 0);
        Ok(())
    }

    #[test]
    fn must_be_returns_bare_value() {
        let value: u8 = must_be(Ok(5)).next(|n| Ok(n + 1)).value();
        assert_eq!(value, 6);
    }

    #[test]
    fn default_handler_unwinds_with_the_error() -> Result<(), Box<dyn std::error::Error>> {
        let caught = catch_unwind(|| must_be::<i32>(Err(out_of_range())).value());
        let Err(payload) = caught else {
            return Err("must_be should unwind".into());
        };
        let Ok(error) = payload.downcast::<AppError>() else {
            return Err("payload should be an AppError".into());
        };
        assert_eq!(*error, out_of_range());
        Ok(())
    }

    #[test]
    fn custom_handler_sees_the_first_failure() -> Result<(), Box<dyn std::error::Error>> {
        let seen = Cell::new(None);
        let later_calls = Cell::new(0);
        let caught = catch_unwind(AssertUnwindSafe(|| {
            must_be_with(Ok(1), |error: AppError| -> Infallible {
                seen.set(Some(error.code().code()));
                raise(error)
            })
            .next(|_| Err::<i32, _>(out_of_range()))
            .next(|value| {
                later_calls.set(later_calls.get() + 1);
                Ok(value)
            })
            .value()
        }));

        assert!(caught.is_err());
        assert_eq!(seen.get(), Some(problems::VALUE_OUT_OF_RANGE.code().code()));
        assert_eq!(later_calls.get(), 0);
        Ok(())
    }

    #[test]
    fn unexpected_seed_bypasses_the_handler() -> Result<(), Box<dyn std::error::Error>> {
        let handler_calls = Cell::new(0);
        let caught = catch_unwind(AssertUnwindSafe(|| {
            GuaranteePipeline::from_outcome(
                Outcome::<i32>::Unexpected(UnexpectedError::message("disk full")),
                |error: AppError| -> Infallible {
                    handler_calls.set(handler_calls.get() + 1);
                    raise(error)
                },
            )
            .value()
        }));

        let Err(payload) = caught else {
            return Err("unexpected seed should unwind".into());
        };
        let Ok(error) = payload.downcast::<UnexpectedError>() else {
            return Err("payload should be the original error".into());
        };
        assert_eq!(error.to_string(), "disk full");
        assert_eq!(handler_calls.get(), 0);
        Ok(())
    }
}
