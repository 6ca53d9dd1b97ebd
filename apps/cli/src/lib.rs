//! Command-line client for the listing catalog API.

pub mod cli;
pub mod client;
pub mod output;

pub use client::{CatalogClient, ClientError, ListParams};
