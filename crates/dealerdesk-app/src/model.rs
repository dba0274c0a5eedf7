// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use dealerdesk_table::Record;
use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Pending,
    Inactive,
}

impl ProductStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Pending, Self::Inactive];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Packed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Packed => "packed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Packed => "Packed",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "packed" => Some(Self::Packed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickStatus {
    NotStarted,
    Picking,
    Picked,
}

impl PickStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::Picking => "Picking",
            Self::Picked => "Picked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenKind {
    Products,
    Orders,
    Catalogs,
    DealerProducts,
}

impl ScreenKind {
    pub const ALL: [Self; 4] = [
        Self::Products,
        Self::Orders,
        Self::Catalogs,
        Self::DealerProducts,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Catalogs => "catalogs",
            Self::DealerProducts => "dealer-products",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Catalogs => "catalogs",
            Self::DealerProducts => "dealer stock",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "products" => Some(Self::Products),
            "orders" => Some(Self::Orders),
            "catalogs" => Some(Self::Catalogs),
            "dealer-products" | "dealer_products" => Some(Self::DealerProducts),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub dealer: Option<DealerRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub dealer: Option<DealerRef>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub pick_status: Option<PickStatus>,
    /// `YYYY-MM-DD` as sent upstream.
    #[serde(default)]
    pub placed_on: Option<String>,
    #[serde(default)]
    pub total_cents: Option<i64>,
    #[serde(default)]
    pub item_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub id: CatalogId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub product_count: Option<i64>,
    #[serde(default)]
    pub updated_on: Option<String>,
}

/// A product as stocked by one dealer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerProduct {
    pub id: DealerProductId,
    #[serde(default)]
    pub dealer: Option<DealerRef>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub dealer_price_cents: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl Record for Product {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Order {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for Catalog {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for DealerProduct {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}
