//! Shared foundation for the Sigfox API client: the unified error
//! type, runtime settings, constants, and logging setup.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export key types
pub use config::{ResponseMode, Settings, SettingsHandle};
pub use error::{SigfoxError, SigfoxResult};
