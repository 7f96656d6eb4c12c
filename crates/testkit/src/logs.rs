//! Capture `tracing` output emitted by code under test.

use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|guard| guard.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Run `body` with a plain-text fmt subscriber installed and return
/// everything it logged at `TRACE` and above.
pub fn capture_logs(body: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, body);
    buffer.contents()
}

/// Run `body` with a JSON fmt subscriber filtered by `directives`
/// (`EnvFilter` syntax, e.g. `safely_typed::problem=warn`) and return one
/// parsed event per logged line.
pub fn capture_json_logs(directives: &str, body: impl FnOnce()) -> Vec<serde_json::Value> {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, body);
    buffer
        .contents()
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}
