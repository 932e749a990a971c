//! Resource endpoint modules organized by backend category.
//!
//! Each method fixes an HTTP method and path template and forwards
//! its parameters to the generic dispatcher; none carries logic of
//! its own.

pub mod callbacks;
pub mod coverages;
pub mod devices;
pub mod devicetypes;
pub mod groups;
pub mod users;
