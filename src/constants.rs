//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "FORMCRAFT_API_URL";

/// Default log file name (written to the working directory)
pub const DEFAULT_LOG_FILE: &str = "formcraft.log";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Label of the single section created by the builder
pub const MAIN_SECTION_LABEL: &str = "Main Section";

/// Placeholder row shown first in dropdown widgets
pub const SELECT_PLACEHOLDER: &str = "Select an option";

/// Application name
pub const APP_NAME: &str = "Formcraft";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
