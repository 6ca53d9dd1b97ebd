use crate::model::NewProperty;
use rust_decimal::Decimal;

/// Demonstration listings inserted into an empty catalog.
pub fn demo_properties() -> Vec<NewProperty> {
    [
        ("own-001", "Apto Centro", "Cra 7 #12-34, Bogotá", 350_000_000i64, 1),
        ("own-002", "Casa Norte", "Cl 150 #20-50, Bogotá", 890_000_000, 2),
        ("own-003", "Loft Chicó", "Cra 11 #86-15, Bogotá", 620_000_000, 3),
    ]
    .into_iter()
    .map(|(owner, name, address, price, image_seed)| NewProperty {
        owner_id: owner.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        price: Decimal::from(price),
        image: format!("https://picsum.photos/seed/{image_seed}/600/400"),
    })
    .collect()
}
