//! Synthetic listings for bulk generation.

use crate::model::NewProperty;
use rand::Rng;
use rust_decimal::Decimal;

pub const MIN_BATCH: i64 = 1;
pub const MAX_BATCH: i64 = 50;

pub const NAMES: &[&str] = &[
    "Apto Centro",
    "Casa Norte",
    "Loft Chicó",
    "Studio Parque",
    "Penthouse Sur",
    "Dúplex Cedritos",
];
pub const STREET_TYPES: &[&str] = &["Cra", "Cl", "Av", "Trans"];
pub const CITIES: &[&str] = &["Bogotá", "Medellín", "Cali", "Barranquilla", "Bucaramanga"];

/// Prices are whole millions in `[120, 1200)`.
pub const PRICE_MILLIONS: std::ops::Range<i64> = 120..1200;
const MILLION: i64 = 1_000_000;

/// Clamp a requested batch size into `[MIN_BATCH, MAX_BATCH]`.
pub fn clamp_batch(count: i64) -> usize {
    count.clamp(MIN_BATCH, MAX_BATCH) as usize
}

/// Draws plausible listings from fixed vocabularies.
pub struct PropertyGenerator<R> {
    rng: R,
}

impl<R: Rng> PropertyGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_property(&mut self) -> NewProperty {
        let rng = &mut self.rng;
        let name = pick(rng, NAMES);
        let address = format!(
            "{} {} #{}-{}, {}",
            pick(rng, STREET_TYPES),
            rng.gen_range(1..160),
            rng.gen_range(1..100),
            rng.gen_range(1..100),
            pick(rng, CITIES),
        );
        let price = Decimal::from(rng.gen_range(PRICE_MILLIONS) * MILLION);
        let image_seed: u32 = rng.gen_range(1..9999);

        NewProperty {
            owner_id: format!("own-{}", rng.gen_range(100..999)),
            name: name.to_string(),
            address,
            price,
            image: format!("https://picsum.photos/seed/{image_seed}/600/400"),
        }
    }

    pub fn batch(&mut self, count: usize) -> Vec<NewProperty> {
        (0..count).map(|_| self.next_property()).collect()
    }
}

fn pick<R: Rng>(rng: &mut R, options: &[&'static str]) -> &'static str {
    options[rng.gen_range(0..options.len())]
}
