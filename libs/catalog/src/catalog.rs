//! Repository facade: read and write paths over a [`PropertyStore`].

use crate::enrich::enrich;
use crate::error::{Error, Result};
use crate::generator::{clamp_batch, PropertyGenerator};
use crate::model::{NewProperty, PropertyId, PropertyRecord, PublicProperty};
use crate::pagination::{Pagination, QueryPage};
use crate::predicate::{Predicate, LISTING_ORDER};
use crate::query::{build_filter, PropertyQuery};
use crate::seed::demo_properties;
use crate::store::{PropertyStore, StoreResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use validator::Validate;

#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Fixed seed for bulk generation. `None` draws from OS entropy.
    pub generator_seed: Option<u64>,
}

/// Listing catalog over a storage engine.
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn PropertyStore>,
    options: CatalogOptions,
}

impl Catalog {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self::with_options(store, CatalogOptions::default())
    }

    pub fn with_options(store: Arc<dyn PropertyStore>, options: CatalogOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &Arc<dyn PropertyStore> {
        &self.store
    }

    /// Filtered, name-ordered page of listings with the total match count.
    #[tracing::instrument(
        name = "catalog.find",
        skip_all,
        fields(page = pagination.page(), page_size = pagination.page_size(), total = tracing::field::Empty)
    )]
    pub async fn find(
        &self,
        query: &PropertyQuery,
        pagination: Pagination,
        cancel: &CancellationToken,
    ) -> Result<QueryPage<PublicProperty>> {
        let filter = build_filter(query);
        tracing::debug!(?filter, "Listing search");

        let fetch = self
            .store
            .find(&filter, &LISTING_ORDER, pagination.skip(), pagination.limit());
        let count = self.store.count(&filter);

        let (records, total) =
            cancellable(cancel, async { tokio::try_join!(fetch, count) }).await?;

        tracing::Span::current().record("total", total);
        Ok(QueryPage::new(records, total, pagination).map(PublicProperty::from))
    }

    /// Point lookup. Malformed identifiers are a miss, not an error.
    #[tracing::instrument(name = "catalog.get_by_id", skip(self, cancel))]
    pub async fn get_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<PublicProperty>> {
        let Some(id) = PropertyId::parse(id) else {
            tracing::debug!("Malformed property id");
            return Ok(None);
        };
        let record = cancellable(cancel, self.store.get(&id)).await?;
        Ok(record.map(PublicProperty::from))
    }

    /// Validate, enrich and persist a single listing.
    #[tracing::instrument(name = "catalog.create", skip_all)]
    pub async fn create(
        &self,
        new: NewProperty,
        cancel: &CancellationToken,
    ) -> Result<PublicProperty> {
        new.validate()?;
        let record = enrich(PropertyRecord::from_new(new));

        cancellable(cancel, self.store.insert_one(&record)).await?;

        tracing::info!(id = %record.id, "Property created");
        Ok(record.into())
    }

    /// Generate `count` listings (clamped to `[1, 50]`) and insert them in one batch.
    #[tracing::instrument(name = "catalog.create_many", skip(self, cancel), fields(inserted = tracing::field::Empty))]
    pub async fn create_many(
        &self,
        count: i64,
        cancel: &CancellationToken,
    ) -> Result<Vec<PublicProperty>> {
        let count = clamp_batch(count);
        let mut generator = PropertyGenerator::new(self.rng());
        let records: Vec<PropertyRecord> = generator
            .batch(count)
            .into_iter()
            .map(|new| enrich(PropertyRecord::from_new(new)))
            .collect();

        let inserted = cancellable(cancel, self.store.insert_many(&records)).await?;

        tracing::Span::current().record("inserted", inserted);
        tracing::info!(inserted, "Generated properties");
        Ok(records.into_iter().map(PublicProperty::from).collect())
    }

    /// Insert the demo listings when the catalog is empty; otherwise do nothing.
    ///
    /// Returns the number of records inserted.
    #[tracing::instrument(name = "catalog.seed_if_empty", skip_all)]
    pub async fn seed_if_empty(&self, cancel: &CancellationToken) -> Result<u64> {
        let existing = cancellable(cancel, self.store.count(&Predicate::All)).await?;
        if existing > 0 {
            tracing::debug!(existing, "Catalog already populated, skipping seed");
            return Ok(0);
        }

        let records: Vec<PropertyRecord> = demo_properties()
            .into_iter()
            .map(|new| enrich(PropertyRecord::from_new(new)))
            .collect();
        let inserted = cancellable(cancel, self.store.insert_many(&records)).await?;

        tracing::info!(inserted, "Seeded demo properties");
        Ok(inserted)
    }

    fn rng(&self) -> StdRng {
        match self.options.generator_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Run a storage call unless `cancel` fires first, in which case the call is
/// dropped and [`Error::Cancelled`] is returned.
async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = StoreResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result.map_err(Error::from),
    }
}
