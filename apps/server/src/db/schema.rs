//! Table and index bootstrap.
//!
//! Idempotent; runs at startup before the first request is served.

use sqlx::PgPool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS properties (
        id UUID PRIMARY KEY,
        owner_id TEXT NOT NULL,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        price NUMERIC NOT NULL CHECK (price >= 0),
        image TEXT NOT NULL,
        name_normalized TEXT,
        address_normalized TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS idx_properties_name ON properties (name COLLATE "C", id)"#,
    "CREATE INDEX IF NOT EXISTS idx_properties_name_normalized ON properties (name_normalized text_pattern_ops)",
    "CREATE INDEX IF NOT EXISTS idx_properties_address_normalized ON properties (address_normalized text_pattern_ops)",
    "CREATE INDEX IF NOT EXISTS idx_properties_price ON properties (price)",
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!(statements = STATEMENTS.len(), "Schema ensured");
    Ok(())
}
