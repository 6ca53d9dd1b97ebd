//! In-process storage engine.
//!
//! Evaluates predicates with the reference evaluator. Used by tests and by the
//! server's `memory` backend.

use crate::model::{PropertyId, PropertyRecord};
use crate::predicate::{Predicate, SortKey};
use crate::store::{PropertyStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::cmp::Ordering;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<PropertyRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records exactly as given (no enrichment).
    pub fn with_records(records: Vec<PropertyRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Copy of every stored record, in insertion order.
    pub async fn snapshot(&self) -> Vec<PropertyRecord> {
        self.records.read().await.clone()
    }
}

fn compare(sort: &[SortKey], a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
    sort.iter()
        .map(|key| key.compare(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn duplicate_id(id: &PropertyId) -> StoreError {
    StoreError::msg(format!("duplicate property id: {id}"))
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn find(
        &self,
        filter: &Predicate,
        sort: &[SortKey],
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<PropertyRecord>> {
        let records = self.records.read().await;
        let mut matched: Vec<&PropertyRecord> =
            records.iter().filter(|r| filter.matches(r)).collect();
        matched.sort_by(|a, b| compare(sort, a, b));

        Ok(matched
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &Predicate) -> StoreResult<u64> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn get(&self, id: &PropertyId) -> StoreResult<Option<PropertyRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == *id).cloned())
    }

    async fn insert_one(&self, record: &PropertyRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(duplicate_id(&record.id));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn insert_many(&self, batch: &[PropertyRecord]) -> StoreResult<u64> {
        let mut records = self.records.write().await;
        for (i, record) in batch.iter().enumerate() {
            let clashes = records.iter().any(|r| r.id == record.id)
                || batch[..i].iter().any(|r| r.id == record.id);
            if clashes {
                return Err(duplicate_id(&record.id));
            }
        }
        records.extend_from_slice(batch);
        Ok(batch.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{Field, LISTING_ORDER};
    use rust_decimal::Decimal;

    fn record(name: &str) -> PropertyRecord {
        PropertyRecord {
            id: PropertyId::generate(),
            owner_id: "own-1".to_string(),
            name: name.to_string(),
            address: "Cl 1".to_string(),
            price: Decimal::ONE,
            image: "img".to_string(),
            name_normalized: None,
            address_normalized: None,
        }
    }

    #[tokio::test]
    async fn find_sorts_then_windows() {
        let store = InMemoryStore::with_records(vec![
            record("Casa"),
            record("Apto"),
            record("Loft"),
            record("Duplex"),
        ]);

        let page = store
            .find(&Predicate::All, &LISTING_ORDER, 1, 2)
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Casa", "Duplex"]);

        let past_end = store
            .find(&Predicate::All, &LISTING_ORDER, 10, 2)
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn count_ignores_window() {
        let store = InMemoryStore::with_records(vec![record("Casa"), record("Casa Sur")]);
        let filter = Predicate::Prefix {
            field: Field::Name,
            value: "casa".to_string(),
            case_insensitive: true,
        };
        assert_eq!(store.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected_atomically() {
        let store = InMemoryStore::new();
        let first = record("Casa");
        store.insert_one(&first).await.unwrap();
        assert!(store.insert_one(&first).await.is_err());

        let fresh = record("Loft");
        let err = store.insert_many(&[fresh, first.clone()]).await;
        assert!(err.is_err());
        assert_eq!(store.len().await, 1);
    }
}
