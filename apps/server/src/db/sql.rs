//! Predicate to SQL translation for the `properties` table.
//!
//! Produces positional (`$n`) SQL fragments plus the values to bind, in order.
//! Prefix values are bound as `LIKE` patterns with `\ % _` escaped.

use estate_catalog::{CompareOp, Field, Predicate, PropertyId, SortKey};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const TABLE: &str = "properties";

pub const COLUMNS: &str =
    "id, owner_id, name, address, price, image, name_normalized, address_normalized";

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Numeric(Decimal),
    BigInt(i64),
    Uuid(Uuid),
}

fn push_bind(binds: &mut Vec<BindValue>, value: BindValue) -> usize {
    binds.push(value);
    binds.len()
}

pub(crate) fn escape_like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render `predicate` as a boolean SQL expression, appending its bind values.
pub fn where_expr(predicate: &Predicate, binds: &mut Vec<BindValue>) -> String {
    match predicate {
        Predicate::All => "TRUE".to_string(),
        Predicate::And(parts) => join(parts, " AND ", "TRUE", binds),
        Predicate::Or(parts) => join(parts, " OR ", "FALSE", binds),
        Predicate::Prefix {
            field,
            value,
            case_insensitive,
        } => {
            let pattern = format!("{}%", escape_like_pattern(value));
            let idx = push_bind(binds, BindValue::Text(pattern));
            let op = if *case_insensitive { "ILIKE" } else { "LIKE" };
            // NULL shadow columns evaluate to NULL, which never selects a row.
            format!("{} {} ${} ESCAPE E'\\\\'", field.as_str(), op, idx)
        }
        Predicate::Compare { field, op, value } => {
            let idx = push_bind(binds, BindValue::Numeric(*value));
            let op = match op {
                CompareOp::Gte => ">=",
                CompareOp::Lte => "<=",
            };
            format!("{} {} ${}", field.as_str(), op, idx)
        }
    }
}

fn join(parts: &[Predicate], sep: &str, empty: &str, binds: &mut Vec<BindValue>) -> String {
    match parts {
        [] => empty.to_string(),
        [single] => where_expr(single, binds),
        _ => {
            let rendered: Vec<String> = parts.iter().map(|p| where_expr(p, binds)).collect();
            format!("({})", rendered.join(sep))
        }
    }
}

/// `ORDER BY` list. Text columns compare bytewise so that pages agree with
/// the in-process ordering.
pub fn order_by(sort: &[SortKey]) -> String {
    if sort.is_empty() {
        return "id ASC".to_string();
    }
    sort.iter()
        .map(|key| {
            let dir = if key.ascending { "ASC" } else { "DESC" };
            match key.field {
                Field::Id | Field::Price => format!("{} {}", key.field.as_str(), dir),
                text => format!("{} COLLATE \"C\" {}", text.as_str(), dir),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Windowed select of full rows.
pub fn select_sql(
    filter: &Predicate,
    sort: &[SortKey],
    skip: u64,
    limit: u64,
) -> (String, Vec<BindValue>) {
    let mut binds = Vec::new();
    let where_sql = where_expr(filter, &mut binds);
    let limit_idx = push_bind(&mut binds, BindValue::BigInt(clamp_i64(limit)));
    let offset_idx = push_bind(&mut binds, BindValue::BigInt(clamp_i64(skip)));
    let sql = format!(
        "SELECT {COLUMNS} FROM {TABLE} WHERE {where_sql} ORDER BY {} LIMIT ${limit_idx} OFFSET ${offset_idx}",
        order_by(sort)
    );
    (sql, binds)
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Single row by primary key.
pub fn get_sql(id: &PropertyId) -> (String, Vec<BindValue>) {
    let binds = vec![BindValue::Uuid(*id.as_uuid())];
    (format!("SELECT {COLUMNS} FROM {TABLE} WHERE id = $1"), binds)
}

pub fn count_sql(filter: &Predicate) -> (String, Vec<BindValue>) {
    let mut binds = Vec::new();
    let where_sql = where_expr(filter, &mut binds);
    (
        format!("SELECT COUNT(*) FROM {TABLE} WHERE {where_sql}"),
        binds,
    )
}
