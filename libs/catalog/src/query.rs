//! Filter construction from loose listing search parameters.

use crate::normalize::normalize;
use crate::predicate::{CompareOp, Field, Predicate};
use rust_decimal::Decimal;

/// Listing search filters as supplied by a caller. Absent means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyQuery {
    pub name: Option<String>,
    pub address: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
}

impl PropertyQuery {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }
}

/// Build the storage predicate for a listing search.
///
/// Text filters match either the normalized shadow field by prefix or the raw
/// field by case-insensitive prefix. The raw branch is evaluated for every
/// record, not only those without shadow fields.
pub fn build_filter(query: &PropertyQuery) -> Predicate {
    let mut parts = Vec::new();

    if let Some(p) = text_prefix(
        query.name.as_deref(),
        Field::NameNormalized,
        Field::Name,
    ) {
        parts.push(p);
    }
    if let Some(p) = text_prefix(
        query.address.as_deref(),
        Field::AddressNormalized,
        Field::Address,
    ) {
        parts.push(p);
    }

    if let Some(min) = query.price_min {
        parts.push(Predicate::Compare {
            field: Field::Price,
            op: CompareOp::Gte,
            value: min,
        });
    }
    if let Some(max) = query.price_max {
        parts.push(Predicate::Compare {
            field: Field::Price,
            op: CompareOp::Lte,
            value: max,
        });
    }

    Predicate::and(parts)
}

fn text_prefix(raw: Option<&str>, shadow: Field, source: Field) -> Option<Predicate> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return None;
    }
    Some(Predicate::Or(vec![
        Predicate::Prefix {
            field: shadow,
            value: normalized,
            case_insensitive: false,
        },
        Predicate::Prefix {
            field: source,
            value: raw.unwrap_or_default().to_string(),
            case_insensitive: true,
        },
    ]))
}
