//! Client-wide constants.

/// Crate version.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the Sigfox backend REST API.
pub const DEFAULT_API_URL: &str = "https://backend.sigfox.com/api";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Page size the backend uses for list endpoints when no limit is given.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
