//! Domain errors raised while assembling shim configuration.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from configuration construction or parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The library directory is empty.
    #[error("library directory must not be empty")]
    EmptyLibraryDirectory,

    /// The library directory is not an absolute path.
    #[error("library directory must be absolute, got '{path}'")]
    RelativeLibraryDirectory {
        /// Directory that was supplied.
        path: Utf8PathBuf,
    },

    /// The library file name is empty.
    #[error("library file name must not be empty")]
    EmptyLibraryFile,

    /// The library file name contains a path separator.
    #[error("library file name must not contain path separators, got '{file}'")]
    SeparatorInLibraryFile {
        /// File name that was supplied.
        file: String,
    },

    /// The variant name does not match any known deployment variant.
    #[error("unknown deployment variant '{value}'")]
    UnknownVariant {
        /// Text that failed to parse.
        value: String,
        /// Underlying parse error.
        #[source]
        source: strum::ParseError,
    },

    /// An environment variable held a non-Unicode value.
    #[error("environment variable '{variable}' is not valid Unicode")]
    NonUnicodeValue {
        /// Name of the offending variable.
        variable: &'static str,
    },
}
