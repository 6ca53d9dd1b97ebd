use axum::body::Bytes;
use estate_catalog::{enrich::enrich, PropertyId, PropertyRecord};
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Converts a JSON value to request body bytes
pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

pub const MULTIPART_BOUNDARY: &str = "estate-form-boundary";

/// Encodes text parts as a `multipart/form-data` body delimited by [`MULTIPART_BOUNDARY`]
pub fn multipart_body(fields: &[(&str, &str)]) -> Bytes {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    Bytes::from(body)
}

/// Builder for stored listing records
pub struct RecordBuilder {
    name: String,
    address: String,
    price: Decimal,
    legacy: bool,
}

impl RecordBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            address: "Cl 1 #2-3, Bogotá".to_string(),
            price: Decimal::from(100_000_000),
            legacy: false,
        }
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = Decimal::from(price);
        self
    }

    /// Record written before shadow fields existed.
    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }

    pub fn build(self) -> PropertyRecord {
        let record = PropertyRecord {
            id: PropertyId::generate(),
            owner_id: "own-100".to_string(),
            name: self.name,
            address: self.address,
            price: self.price,
            image: "https://picsum.photos/seed/1/600/400".to_string(),
            name_normalized: None,
            address_normalized: None,
        };
        if self.legacy {
            record
        } else {
            enrich(record)
        }
    }
}

/// Builder for create request bodies
pub struct PropertyBodyBuilder {
    owner: String,
    name: String,
    address: String,
    price: Value,
    image: String,
}

impl PropertyBodyBuilder {
    pub fn new() -> Self {
        Self {
            owner: "own-200".to_string(),
            name: "Casa Norte".to_string(),
            address: "Cl 150 #20-50, Bogotá".to_string(),
            price: json!(890_000_000),
            image: "https://picsum.photos/seed/2/600/400".to_string(),
        }
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.owner = owner.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn price(mut self, price: Value) -> Self {
        self.price = price;
        self
    }

    pub fn build(self) -> Value {
        json!({
            "idOwner": self.owner,
            "name": self.name,
            "addressProperty": self.address,
            "priceProperty": self.price,
            "image": self.image,
        })
    }
}
