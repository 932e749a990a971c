//! Client for the Sigfox backend REST API.
//!
//! Covers groups, device types, devices, callbacks, coverage queries,
//! and user lists. Every resource method goes through one generic
//! dispatcher that classifies HTTP statuses into typed errors,
//! unwraps the backend's `data` envelope, and tracks the single-slot
//! pagination cursor for explicit page draining.

pub mod client;
pub mod endpoints;
pub mod object;
pub mod pagination;
pub mod response;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types
pub use client::{Params, Sigfox};
pub use object::Object;
pub use pagination::PageCursor;
pub use response::{Envelope, Paging, Payload};
pub use sigfox_core::{ResponseMode, Settings, SettingsHandle, SigfoxError, SigfoxResult};
pub use transport::{Credentials, HttpTransport, Transport, TransportRequest, TransportResponse};
