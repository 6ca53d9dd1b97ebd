//! Estate catalog server
//!
//! HTTP front end for the listing catalog:
//! - Search with accent-insensitive prefix filters and pagination
//! - Listing creation from JSON or HTML forms
//! - Bulk generation and demo seeding
//! - Postgres or in-memory storage

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod request_context;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
