//! Options shared by every validator.

use safely_typed_shared::DataPath;

/// Options passed to every validator call.
///
/// Validator-specific settings live in the validator value itself (a closure
/// or struct); this type only carries what every validator understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    path: Option<DataPath>,
}

impl ValidatorOptions {
    /// Options with no explicit path.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Options located at `path`.
    #[must_use]
    pub const fn at(path: DataPath) -> Self {
        Self { path: Some(path) }
    }

    /// Replace the path.
    #[must_use]
    pub fn with_path(mut self, path: DataPath) -> Self {
        self.path = Some(path);
        self
    }

    /// The explicit path, if one was set.
    #[must_use]
    pub const fn path(&self) -> Option<&DataPath> {
        self.path.as_ref()
    }

    /// The explicit path, or the default root path.
    #[must_use]
    pub fn data_path(&self) -> DataPath {
        self.path.clone().unwrap_or_default()
    }

    /// Options for a named child of the current value.
    #[must_use]
    pub fn nested_field(&self, name: &str) -> Self {
        Self::at(self.data_path().field(name))
    }

    /// Options for a list element of the current value.
    #[must_use]
    pub fn nested_index(&self, index: usize) -> Self {
        Self::at(self.data_path().index(index))
    }
}
