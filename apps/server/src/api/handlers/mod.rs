//! Request handlers for API endpoints
//!
//! Handlers extract and check request input, call the catalog, and shape
//! responses. Failures surface as [`crate::Error`].

pub mod properties;

pub use properties::*;
