//! Pipeline steps that count their invocations.

use safely_typed_shared::{AppError, AppErrorOr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A pipeline step that records how often it ran.
///
/// Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingStep {
    calls: Arc<AtomicUsize>,
    failure: Option<AppError>,
}

impl CountingStep {
    /// A step that passes its input through.
    pub fn passing() -> Self {
        Self::default()
    }

    /// A step that always fails with `error`.
    pub fn failing(error: AppError) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(error),
        }
    }

    /// Run the step.
    pub fn run<T>(&self, value: T) -> AppErrorOr<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(value),
        }
    }

    /// Number of times the step ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
