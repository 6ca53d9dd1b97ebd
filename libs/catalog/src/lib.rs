//! Estate catalog core
//!
//! The query engine behind the listing catalog:
//! - Text normalization for accent- and case-insensitive matching
//! - Composable predicates evaluated by pluggable storage engines
//! - Filter building, pagination and result envelopes
//! - Write-path enrichment, bulk generation and demo seeding
//!
//! Storage engines implement [`PropertyStore`]. [`InMemoryStore`] ships with the
//! crate; the server crate provides a Postgres adapter.

pub mod catalog;
pub mod enrich;
pub mod error;
pub mod generator;
pub mod memory;
pub mod model;
pub mod normalize;
pub mod pagination;
pub mod predicate;
pub mod query;
pub mod seed;
pub mod store;

pub use catalog::{Catalog, CatalogOptions};
pub use error::{Error, Result};
pub use memory::InMemoryStore;
pub use model::{NewProperty, PropertyId, PropertyRecord, PublicProperty};
pub use normalize::normalize;
pub use pagination::{Pagination, PublicPropertyPage, QueryPage};
pub use predicate::{CompareOp, Field, Predicate, SortKey, LISTING_ORDER};
pub use query::{build_filter, PropertyQuery};
pub use store::{PropertyStore, StoreError, StoreResult};
pub use tokio_util::sync::CancellationToken;
