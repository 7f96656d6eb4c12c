//! Access to files under `crates/testkit/fixtures`.

use std::path::{Path, PathBuf};

/// Absolute path of a fixture file.
pub fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(relative)
}

/// Read a fixture file as UTF-8.
pub fn read_fixture(relative: &str) -> std::io::Result<String> {
    std::fs::read_to_string(fixture_path(relative))
}
