//! Listing records and their public projections

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Storage identifier of a listing.
///
/// Assigned once at creation and never surfaced through [`PublicProperty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(Uuid);

impl PropertyId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a textual identifier, returning `None` when it is not a valid id.
    /// Surrounding whitespace makes the id invalid.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::try_parse(raw).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PropertyId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub image: String,
    /// Shadow of `name`; absent on records written before enrichment existed.
    pub name_normalized: Option<String>,
    /// Shadow of `address`; absent on records written before enrichment existed.
    pub address_normalized: Option<String>,
}

impl PropertyRecord {
    /// Build a record with a fresh id and no shadow fields.
    pub fn from_new(new: NewProperty) -> Self {
        Self {
            id: PropertyId::generate(),
            owner_id: new.owner_id,
            name: new.name,
            address: new.address,
            price: new.price,
            image: new.image,
            name_normalized: None,
            address_normalized: None,
        }
    }
}

impl From<PropertyRecord> for PublicProperty {
    fn from(record: PropertyRecord) -> Self {
        Self {
            owner_id: record.owner_id,
            name: record.name,
            address: record.address,
            price: record.price,
            image: record.image,
        }
    }
}

/// Listing as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicProperty {
    #[serde(rename = "idOwner")]
    pub owner_id: String,
    pub name: String,
    #[serde(rename = "addressProperty")]
    pub address: String,
    #[serde(rename = "priceProperty")]
    #[schema(value_type = String, example = "350000000")]
    pub price: Decimal,
    pub image: String,
}

/// Client-supplied fields for a new listing.
///
/// Missing fields deserialize as blanks so that they surface as validation
/// failures instead of body parse errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct NewProperty {
    #[serde(rename = "idOwner", alias = "IdOwner")]
    #[validate(custom(function = "not_blank"))]
    pub owner_id: String,

    #[serde(rename = "name", alias = "Name")]
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[serde(rename = "addressProperty", alias = "AddressProperty")]
    #[validate(custom(function = "not_blank"))]
    pub address: String,

    #[serde(rename = "priceProperty", alias = "PriceProperty")]
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = String, example = "350000000")]
    pub price: Decimal,

    #[serde(rename = "image", alias = "Image")]
    #[validate(custom(function = "not_blank"))]
    pub image: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed("Required"));
        return Err(err);
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some(Cow::Borrowed("PriceProperty must be >= 0"));
        return Err(err);
    }
    Ok(())
}
