//! Storage-neutral filter and sort model.
//!
//! A [`Predicate`] is a declarative tree that storage engines translate into
//! their own query language. [`Predicate::matches`] is the reference evaluator:
//! every adapter must agree with it.

use crate::model::PropertyRecord;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Record fields that can appear in predicates and sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    NameNormalized,
    Address,
    AddressNormalized,
    Price,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::NameNormalized => "name_normalized",
            Field::Address => "address",
            Field::AddressNormalized => "address_normalized",
            Field::Price => "price",
        }
    }

    fn text<'a>(&self, record: &'a PropertyRecord) -> Option<&'a str> {
        match self {
            Field::Name => Some(&record.name),
            Field::NameNormalized => record.name_normalized.as_deref(),
            Field::Address => Some(&record.address),
            Field::AddressNormalized => record.address_normalized.as_deref(),
            Field::Id | Field::Price => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gte,
    Lte,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record.
    All,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// Field starts with the literal `value`.
    Prefix {
        field: Field,
        value: String,
        case_insensitive: bool,
    },
    Compare {
        field: Field,
        op: CompareOp,
        value: Decimal,
    },
}

impl Predicate {
    /// Conjunction that collapses trivial cases.
    pub fn and(mut parts: Vec<Predicate>) -> Predicate {
        parts.retain(|p| !matches!(p, Predicate::All));
        match parts.len() {
            0 => Predicate::All,
            1 => parts.remove(0),
            _ => Predicate::And(parts),
        }
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            Predicate::All => true,
            Predicate::And(parts) => parts.iter().all(|p| p.matches(record)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(record)),
            Predicate::Prefix {
                field,
                value,
                case_insensitive,
            } => {
                let Some(candidate) = field.text(record) else {
                    return false;
                };
                if *case_insensitive {
                    candidate.to_lowercase().starts_with(&value.to_lowercase())
                } else {
                    candidate.starts_with(value.as_str())
                }
            }
            Predicate::Compare { field, op, value } => {
                if *field != Field::Price {
                    return false;
                }
                match op {
                    CompareOp::Gte => record.price >= *value,
                    CompareOp::Lte => record.price <= *value,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: Field,
    pub ascending: bool,
}

impl SortKey {
    pub const fn asc(field: Field) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    /// Compare two records under this key.
    pub fn compare(&self, a: &PropertyRecord, b: &PropertyRecord) -> Ordering {
        let ord = match self.field {
            Field::Id => a.id.cmp(&b.id),
            Field::Price => a.price.cmp(&b.price),
            text => text.text(a).cmp(&text.text(b)),
        };
        if self.ascending {
            ord
        } else {
            ord.reverse()
        }
    }
}

/// Listing order used by every page fetch: name, then id for ties.
pub const LISTING_ORDER: [SortKey; 2] = [SortKey::asc(Field::Name), SortKey::asc(Field::Id)];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyId;

    fn record(name: &str, name_normalized: Option<&str>, price: i64) -> PropertyRecord {
        PropertyRecord {
            id: PropertyId::generate(),
            owner_id: "own-1".to_string(),
            name: name.to_string(),
            address: "Cl 1".to_string(),
            price: Decimal::from(price),
            image: "img".to_string(),
            name_normalized: name_normalized.map(str::to_string),
            address_normalized: None,
        }
    }

    #[test]
    fn and_collapses_trivial_parts() {
        assert_eq!(Predicate::and(vec![]), Predicate::All);
        assert_eq!(
            Predicate::and(vec![Predicate::All, Predicate::All]),
            Predicate::All
        );
        let single = Predicate::Compare {
            field: Field::Price,
            op: CompareOp::Gte,
            value: Decimal::ONE,
        };
        assert_eq!(
            Predicate::and(vec![Predicate::All, single.clone()]),
            single
        );
    }

    #[test]
    fn prefix_is_anchored_and_literal() {
        let rec = record("Casa (Norte) 50%", None, 1);
        let p = |v: &str| Predicate::Prefix {
            field: Field::Name,
            value: v.to_string(),
            case_insensitive: true,
        };
        assert!(p("casa (n").matches(&rec));
        assert!(!p("norte").matches(&rec));
        assert!(!p("casa.*").matches(&rec));
        assert!(p("Casa (Norte) 50%").matches(&rec));
    }

    #[test]
    fn missing_shadow_field_never_matches() {
        let rec = record("Casa", None, 1);
        let p = Predicate::Prefix {
            field: Field::NameNormalized,
            value: String::new(),
            case_insensitive: false,
        };
        assert!(!p.matches(&rec));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let rec = record("Casa", None, 500);
        let bound = |op, v: i64| Predicate::Compare {
            field: Field::Price,
            op,
            value: Decimal::from(v),
        };
        assert!(bound(CompareOp::Gte, 500).matches(&rec));
        assert!(bound(CompareOp::Lte, 500).matches(&rec));
        assert!(!bound(CompareOp::Gte, 501).matches(&rec));
        assert!(!bound(CompareOp::Lte, 499).matches(&rec));
    }

    #[test]
    fn listing_order_breaks_ties_by_id() {
        let mut a = record("Casa", None, 1);
        let mut b = record("Casa", None, 2);
        if a.id > b.id {
            std::mem::swap(&mut a, &mut b);
        }
        let ord = LISTING_ORDER
            .iter()
            .map(|k| k.compare(&a, &b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal);
        assert_eq!(ord, Ordering::Less);
    }
}
