//! Resolution of the engine library's on-disk location.
//!
//! The locator joins a host-provided library directory with the fixed
//! engine file name using canonical path joining, so trailing
//! separators in the directory never produce malformed paths. The
//! directory is validated on construction; resolution itself cannot
//! fail and happens exactly once per worker invocation.

use camino::{Utf8Path, Utf8PathBuf};

use crate::defaults;
use crate::error::ConfigError;

/// Validated location of the engine shared object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLocator {
    directory: Utf8PathBuf,
    file_name: String,
}

impl LibraryLocator {
    /// Creates a locator for the fixed engine file inside `directory`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the directory is empty or relative.
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Result<Self, ConfigError> {
        Self::with_file_name(directory, defaults::ENGINE_LIBRARY_FILE)
    }

    /// Creates a locator with an explicit file name.
    ///
    /// Deployments always use the fixed engine file name; this
    /// constructor exists for the harness, which smoke-tests arbitrary
    /// libraries outside the host.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the directory is empty or relative,
    /// or if the file name is empty or contains a path separator.
    pub fn with_file_name(
        directory: impl Into<Utf8PathBuf>,
        file_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let directory = directory.into();
        let file_name = file_name.into();
        if directory.as_str().is_empty() {
            return Err(ConfigError::EmptyLibraryDirectory);
        }
        if !directory.is_absolute() {
            return Err(ConfigError::RelativeLibraryDirectory { path: directory });
        }
        if file_name.is_empty() {
            return Err(ConfigError::EmptyLibraryFile);
        }
        if file_name.chars().any(std::path::is_separator) {
            return Err(ConfigError::SeparatorInLibraryFile { file: file_name });
        }
        Ok(Self {
            directory,
            file_name,
        })
    }

    /// Returns the library directory.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        self.directory.as_path()
    }

    /// Returns the library file name.
    #[must_use]
    pub const fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Joins the directory and file name into the load path.
    #[must_use]
    pub fn resolve(&self) -> Utf8PathBuf {
        self.directory.join(&self.file_name)
    }
}
