//! PostgreSQL implementation of the `PropertyStore` trait.

use super::sql::{self, BindValue};
use async_trait::async_trait;
use estate_catalog::{
    Predicate, PropertyId, PropertyRecord, PropertyStore, SortKey, StoreError, StoreResult,
};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryScalar};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

/// Postgres' bind parameter limit is 65535; eight columns per row.
const INSERT_CHUNK_ROWS: usize = 1000;

#[derive(Clone)]
pub struct PostgresPropertyStore {
    pool: PgPool,
}

impl PostgresPropertyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bind_values<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    binds: Vec<BindValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::Numeric(v) => query.bind(v),
            BindValue::BigInt(v) => query.bind(v),
            BindValue::Uuid(v) => query.bind(v),
        };
    }
    query
}

fn bind_scalar<'q>(
    mut query: QueryScalar<'q, Postgres, i64, PgArguments>,
    binds: Vec<BindValue>,
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::Numeric(v) => query.bind(v),
            BindValue::BigInt(v) => query.bind(v),
            BindValue::Uuid(v) => query.bind(v),
        };
    }
    query
}

fn record_from_row(row: &PgRow) -> Result<PropertyRecord, sqlx::Error> {
    Ok(PropertyRecord {
        id: PropertyId::from(row.try_get::<Uuid, _>("id")?),
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        price: row.try_get::<Decimal, _>("price")?,
        image: row.try_get("image")?,
        name_normalized: row.try_get("name_normalized")?,
        address_normalized: row.try_get("address_normalized")?,
    })
}

#[async_trait]
impl PropertyStore for PostgresPropertyStore {
    async fn find(
        &self,
        filter: &Predicate,
        sort: &[SortKey],
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<PropertyRecord>> {
        let (sql, binds) = sql::select_sql(filter, sort, skip, limit);
        tracing::trace!(%sql, binds = binds.len(), "find");

        let rows = bind_values(sqlx::query(&sql), binds)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::new)?;

        rows.iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::new)
    }

    async fn count(&self, filter: &Predicate) -> StoreResult<u64> {
        let (sql, binds) = sql::count_sql(filter);
        tracing::trace!(%sql, binds = binds.len(), "count");

        let total = bind_scalar(sqlx::query_scalar::<_, i64>(&sql), binds)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::new)?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn get(&self, id: &PropertyId) -> StoreResult<Option<PropertyRecord>> {
        let (sql, binds) = sql::get_sql(id);
        let row = bind_values(sqlx::query(&sql), binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::new)?;

        row.as_ref()
            .map(record_from_row)
            .transpose()
            .map_err(StoreError::new)
    }

    async fn insert_one(&self, record: &PropertyRecord) -> StoreResult<()> {
        self.insert_many(std::slice::from_ref(record)).await?;
        Ok(())
    }

    async fn insert_many(&self, records: &[PropertyRecord]) -> StoreResult<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(StoreError::new)?;
        let mut inserted = 0u64;

        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
                "INSERT INTO {} ({}) ",
                sql::TABLE,
                sql::COLUMNS
            ));
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(*record.id.as_uuid())
                    .push_bind(record.owner_id.as_str())
                    .push_bind(record.name.as_str())
                    .push_bind(record.address.as_str())
                    .push_bind(record.price)
                    .push_bind(record.image.as_str())
                    .push_bind(record.name_normalized.as_deref())
                    .push_bind(record.address_normalized.as_deref());
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(StoreError::new)?;
            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(StoreError::new)?;
        Ok(inserted)
    }
}
