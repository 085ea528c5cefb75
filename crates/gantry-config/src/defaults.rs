//! Fixed contract values and defaults used across the workspace.

/// File name of the engine shared object inside the host's library
/// directory. There is no alternate search path and no versioned
/// naming; the worker either finds this file or terminates.
pub const ENGINE_LIBRARY_FILE: &str = "ferretdb.so";

/// Exported function the engine library must provide as its execution
/// body. Resolution is exact-match; there is no fallback symbol.
pub const ENGINE_ENTRY_SYMBOL: &str = "BackgroundWorkerMain";

/// Library directory used when the host supplies none.
pub const DEFAULT_LIBRARY_DIRECTORY: &str = "/usr/lib/postgresql/lib";

/// Display name under which the worker is registered with the host.
pub const DEFAULT_WORKER_NAME: &str = "ferretdb engine worker";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned log filter value used where allocation is required.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the worker entry point.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}
