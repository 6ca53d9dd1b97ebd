use crate::model::PropertyRecord;
use crate::normalize::normalize;

/// Derive the normalized shadow fields from their sources.
///
/// Applied on every write path before persistence, never on reads.
pub fn enrich(mut record: PropertyRecord) -> PropertyRecord {
    record.name_normalized = Some(normalize(Some(&record.name)));
    record.address_normalized = Some(normalize(Some(&record.address)));
    record
}
