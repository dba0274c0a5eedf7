// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use dealerdesk_app::{
    Catalog, CatalogId, Customer, DealerProduct, DealerProductId, DealerRef, Order,
    OrderId, OrderStatus, PickStatus, Product, ProductId, ProductStatus,
};
use serde::Serialize;
use std::path::PathBuf;
use time::macros::date;
use time::{Date, Duration};

/// brand → category → model → variants
type Lineup = (
    &'static str,
    &'static [(&'static str, &'static [(&'static str, &'static [&'static str])])],
);

static LINEUP: [Lineup; 4] = [
    (
        "Honda",
        &[
            (
                "Scooter",
                &[("Activa", &["STD", "DLX", "H-Smart"]), ("Dio", &["STD", "DLX"])],
            ),
            (
                "Motorcycle",
                &[("Shine", &["Drum", "Disc"]), ("Unicorn", &["STD"])],
            ),
        ],
    ),
    (
        "Yamaha",
        &[
            ("Scooter", &[("Fascino", &["Drum", "Disc"])]),
            (
                "Motorcycle",
                &[("FZ-S", &["V3", "V4"]), ("R15", &["V4", "M"])],
            ),
        ],
    ),
    (
        "Bajaj",
        &[(
            "Motorcycle",
            &[("Pulsar", &["150", "NS200"]), ("Platina", &["100"])],
        )],
    ),
    (
        "TVS",
        &[
            ("Scooter", &[("Jupiter", &["Base", "ZX"])]),
            ("Moped", &[("XL100", &["Comfort", "Heavy Duty"])]),
        ],
    ),
];

const DEALER_NAMES: [&str; 6] = [
    "Sunrise Motors",
    "Metro Wheels",
    "Highway Autos",
    "Lakeside Two Wheelers",
    "Patel Automobiles",
    "City Ride Hub",
];

const FIRST_NAMES: [&str; 12] = [
    "Aarav", "Diya", "Kabir", "Meera", "Rohan", "Sara", "Vikram", "Anaya", "Ishaan", "Priya",
    "Arjun", "Nisha",
];
const LAST_NAMES: [&str; 10] = [
    "Sharma", "Patel", "Iyer", "Khan", "Reddy", "Gupta", "Das", "Nair", "Singh", "Joshi",
];

const CATALOG_SEASONS: [&str; 4] = ["Spring", "Monsoon", "Festive", "Year-end"];

const REFERENCE_DAY: Date = date!(2026 - 01 - 01);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    /// True roughly `percent` times out of a hundred.
    fn chance(&mut self, percent: usize) -> bool {
        self.int_n(100) < percent
    }
}

/// One concrete brand/category/model/variant combination from the lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantPath {
    pub brand: &'static str,
    pub category: &'static str,
    pub model: &'static str,
    pub variant: &'static str,
}

/// Deterministic generator of sparse dealer-desk records.
///
/// Roughly one field in ten comes back empty so screens and the table engine
/// see the same shape of data an upstream API produces.
#[derive(Debug, Clone)]
pub struct DealerFaker {
    rng: DeterministicRng,
    seed: u64,
    issued: u64,
}

impl DealerFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            issued: 0,
        }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn variant_path(&mut self) -> VariantPath {
        let (brand, categories) = LINEUP[self.rng.int_n(LINEUP.len())];
        let (category, models) = categories[self.rng.int_n(categories.len())];
        let (model, variants) = models[self.rng.int_n(models.len())];
        let variant = variants[self.rng.int_n(variants.len())];
        VariantPath {
            brand,
            category,
            model,
            variant,
        }
    }

    pub fn dealer(&mut self) -> DealerRef {
        let index = self.rng.int_n(DEALER_NAMES.len());
        DealerRef {
            name: self.sometimes(DEALER_NAMES[index].to_owned()),
        }
    }

    pub fn product(&mut self) -> Product {
        let id = self.next_id("p");
        let path = self.variant_path();
        let status = ProductStatus::ALL[self.rng.int_n(ProductStatus::ALL.len())];
        let price = self.price_cents(path.category);
        let stock = self.rng.int_n(120) as i64;
        let dealer = self.rng.chance(60).then(|| self.dealer());
        Product {
            sku: self.sometimes(format!(
                "{}-{}-{}",
                sku_prefix(path.brand),
                sku_prefix(path.model),
                id.rsplit('-').next().unwrap_or_default()
            )),
            name: self.sometimes(format!("{} {} {}", path.brand, path.model, path.variant)),
            brand: self.sometimes(path.brand.to_owned()),
            category: self.sometimes(path.category.to_owned()),
            model: self.sometimes(path.model.to_owned()),
            variant: self.sometimes(path.variant.to_owned()),
            status: self.sometimes(status),
            price_cents: self.sometimes(price),
            stock: self.sometimes(stock),
            dealer,
            id: ProductId::new(id),
        }
    }

    pub fn order(&mut self) -> Order {
        let id = self.next_id("o");
        let status = OrderStatus::ALL[self.rng.int_n(OrderStatus::ALL.len())];
        let pick = match status {
            OrderStatus::Pending | OrderStatus::Cancelled => PickStatus::NotStarted,
            OrderStatus::Confirmed => {
                if self.rng.chance(50) {
                    PickStatus::Picking
                } else {
                    PickStatus::NotStarted
                }
            }
            _ => PickStatus::Picked,
        };
        let items = 1 + self.rng.int_n(4) as i64;
        let unit = self.price_cents("Scooter");
        let placed_on = self.placed_on();
        let customer = self.rng.chance(90).then(|| self.customer());
        let dealer = self.rng.chance(85).then(|| self.dealer());
        Order {
            order_number: self.sometimes(format!("ORD-{:05}", self.issued)),
            customer,
            dealer,
            status: self.sometimes(status),
            pick_status: self.sometimes(pick),
            placed_on,
            total_cents: self.sometimes(unit * items),
            item_count: self.sometimes(items),
            id: OrderId::new(id),
        }
    }

    pub fn catalog(&mut self) -> Catalog {
        let id = self.next_id("c");
        let path = self.variant_path();
        let season = CATALOG_SEASONS[self.rng.int_n(CATALOG_SEASONS.len())];
        let published = self.rng.chance(70);
        let count = 5 + self.rng.int_n(40) as i64;
        let updated = self.day_offset(300);
        Catalog {
            name: self.sometimes(format!("{} {} {}", path.brand, season, path.category)),
            brand: self.sometimes(path.brand.to_owned()),
            category: self.sometimes(path.category.to_owned()),
            published: self.sometimes(published),
            product_count: self.sometimes(count),
            updated_on: self.sometimes(updated.to_string()),
            id: CatalogId::new(id),
        }
    }

    pub fn dealer_product(&mut self) -> DealerProduct {
        let id = self.next_id("dp");
        let path = self.variant_path();
        let base = self.price_cents(path.category);
        let markup = 100 + self.rng.int_n(8) as i64;
        let stock = self.rng.int_n(40) as i64;
        let dealer = self.dealer();
        DealerProduct {
            dealer: Some(dealer),
            product_name: self.sometimes(format!("{} {}", path.brand, path.model)),
            brand: self.sometimes(path.brand.to_owned()),
            category: self.sometimes(path.category.to_owned()),
            model: self.sometimes(path.model.to_owned()),
            variant: self.sometimes(path.variant.to_owned()),
            dealer_price_cents: self.sometimes(base * markup / 100),
            stock: self.sometimes(stock),
            id: DealerProductId::new(id),
        }
    }

    pub fn products(&mut self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.product()).collect()
    }

    pub fn orders(&mut self, count: usize) -> Vec<Order> {
        (0..count).map(|_| self.order()).collect()
    }

    pub fn catalogs(&mut self, count: usize) -> Vec<Catalog> {
        (0..count).map(|_| self.catalog()).collect()
    }

    pub fn dealer_products(&mut self, count: usize) -> Vec<DealerProduct> {
        (0..count).map(|_| self.dealer_product()).collect()
    }

    fn customer(&mut self) -> Customer {
        let first = FIRST_NAMES[self.rng.int_n(FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.int_n(LAST_NAMES.len())];
        let phone = format!(
            "98{:04}{:04}",
            self.rng.int_n(10_000),
            self.rng.int_n(10_000)
        );
        Customer {
            name: Some(format!("{first} {last}")),
            phone: self.sometimes(phone),
        }
    }

    /// Mostly ISO days; occasionally absent or a free-form value upstream
    /// never normalized.
    fn placed_on(&mut self) -> Option<String> {
        match self.rng.int_n(20) {
            0 => None,
            1 => Some("pending".to_owned()),
            _ => Some(self.day_offset(365).to_string()),
        }
    }

    fn day_offset(&mut self, max_days: usize) -> Date {
        let days = self.rng.int_n(max_days) as i64;
        REFERENCE_DAY.saturating_add(Duration::days(days))
    }

    fn price_cents(&mut self, category: &str) -> i64 {
        let (floor, spread) = match category {
            "Motorcycle" => (7_500_000, 10_000_000),
            "Moped" => (4_000_000, 1_500_000),
            _ => (6_500_000, 3_000_000),
        };
        floor + (self.rng.int_n(spread / 100) * 100) as i64
    }

    fn sometimes<T>(&mut self, value: T) -> Option<T> {
        (!self.rng.chance(10)).then_some(value)
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.issued += 1;
        format!("{prefix}-{:04}", self.issued)
    }
}

/// Options for the cascade level below `path`: brands for an empty path,
/// then categories, models and variants. Unknown parents have no children.
pub fn lineup_options(path: &[String]) -> Vec<String> {
    let names: Vec<&str> = match path {
        [] => LINEUP.iter().map(|(brand, _)| *brand).collect(),
        [brand] => categories_of(brand)
            .iter()
            .map(|(category, _)| *category)
            .collect(),
        [brand, category] => models_of(brand, category)
            .iter()
            .map(|(model, _)| *model)
            .collect(),
        [brand, category, model] => models_of(brand, category)
            .iter()
            .find(|(name, _)| *name == model.as_str())
            .map(|(_, variants)| variants.to_vec())
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    let mut options: Vec<String> = names.into_iter().map(str::to_owned).collect();
    options.sort();
    options
}

fn categories_of(
    brand: &str,
) -> &'static [(&'static str, &'static [(&'static str, &'static [&'static str])])] {
    LINEUP
        .iter()
        .find(|(name, _)| *name == brand)
        .map(|(_, categories)| *categories)
        .unwrap_or(&[])
}

fn models_of(brand: &str, category: &str) -> &'static [(&'static str, &'static [&'static str])] {
    categories_of(brand)
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, models)| *models)
        .unwrap_or(&[])
}

pub fn dealer_names() -> &'static [&'static str] {
    &DEALER_NAMES
}

pub fn sku_prefix(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// Serializes `records` to a JSON dump inside a fresh temp dir.
pub fn temp_records_file<T: Serialize>(records: &[T]) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("records.json");
    let body = serde_json::to_string_pretty(records).context("encode records")?;
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}
