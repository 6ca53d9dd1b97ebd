//! Storage engine capability surface used by the catalog.

use crate::model::{PropertyId, PropertyRecord};
use crate::predicate::{Predicate, SortKey};
use async_trait::async_trait;
use std::fmt;

/// Failure reported by a storage engine, carried through the catalog untouched.
pub struct StoreError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl StoreError {
    pub fn new<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(source))
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage backend for listings.
///
/// Implementations translate [`Predicate`] trees into their own query
/// language and must agree with [`Predicate::matches`]. Connection, socket and
/// server-selection timeouts belong to the implementation.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Records matching `filter`, ordered by `sort`, after skipping `skip`
    /// records and returning at most `limit`.
    async fn find(
        &self,
        filter: &Predicate,
        sort: &[SortKey],
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<PropertyRecord>>;

    /// Number of records matching `filter`, ignoring any window.
    async fn count(&self, filter: &Predicate) -> StoreResult<u64>;

    /// Point lookup by identifier.
    async fn get(&self, id: &PropertyId) -> StoreResult<Option<PropertyRecord>>;

    async fn insert_one(&self, record: &PropertyRecord) -> StoreResult<()>;

    /// Insert a batch in one engine call and report how many were written.
    async fn insert_many(&self, records: &[PropertyRecord]) -> StoreResult<u64>;
}
