// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use dealerdesk_table::{FieldValue, TableSchema};
use time::Date;
use time::macros::format_description;

use crate::model::{Catalog, DealerProduct, DealerRef, Order, Product};

/// Parses an upstream `YYYY-MM-DD` date. Anything else is treated as absent.
pub fn parse_day(value: Option<&str>) -> FieldValue {
    let format = format_description!("[year]-[month]-[day]");
    value
        .and_then(|raw| Date::parse(raw.trim(), format).ok())
        .into()
}

fn money(cents: Option<i64>) -> FieldValue {
    cents.map(|cents| cents as f64 / 100.0).into()
}

fn dealer_name(dealer: Option<&DealerRef>) -> Option<&str> {
    dealer.and_then(|dealer| dealer.name.as_deref())
}

fn dealer_value(dealer: Option<&DealerRef>) -> FieldValue {
    dealer_name(dealer).into()
}

pub fn product_schema() -> Result<TableSchema<Product>> {
    TableSchema::builder("products")
        .field("name", "Name", |row: &Product| row.name.as_deref().into())
        .field("sku", "SKU", |row: &Product| row.sku.as_deref().into())
        .field("brand", "Brand", |row: &Product| row.brand.as_deref().into())
        .field("category", "Category", |row: &Product| {
            row.category.as_deref().into()
        })
        .field("model", "Model", |row: &Product| row.model.as_deref().into())
        .field("variant", "Variant", |row: &Product| {
            row.variant.as_deref().into()
        })
        .field("status", "Status", |row: &Product| {
            row.status.map(|status| status.label()).into()
        })
        .field("price", "Price", |row: &Product| money(row.price_cents))
        .field("stock", "Stock", |row: &Product| row.stock.into())
        .field("dealer", "Dealer", |row: &Product| {
            dealer_value(row.dealer.as_ref())
        })
        .filter("brand")
        .filter("category")
        .filter("model")
        .search(|row: &Product| row.name.as_deref())
        .search(|row: &Product| row.sku.as_deref())
        .search(|row: &Product| row.brand.as_deref())
        .tab(|row: &Product| row.status.map(|status| status.label()).into())
        .build()
}

pub fn order_schema() -> Result<TableSchema<Order>> {
    TableSchema::builder("orders")
        .field("order_number", "Order", |row: &Order| {
            row.order_number.as_deref().into()
        })
        .field("customer", "Customer", |row: &Order| {
            row.customer
                .as_ref()
                .and_then(|customer| customer.name.as_deref())
                .into()
        })
        .field("dealer", "Dealer", |row: &Order| {
            dealer_value(row.dealer.as_ref())
        })
        .field("status", "Status", |row: &Order| {
            row.status.map(|status| status.label()).into()
        })
        .field("pick", "Pick", |row: &Order| {
            row.pick_status.map(|status| status.label()).into()
        })
        .field("placed_on", "Placed", |row: &Order| {
            parse_day(row.placed_on.as_deref())
        })
        .field("items", "Items", |row: &Order| row.item_count.into())
        .field("total", "Total", |row: &Order| money(row.total_cents))
        .filter("dealer")
        .filter("pick")
        .search(|row: &Order| row.order_number.as_deref())
        .search(|row: &Order| {
            row.customer
                .as_ref()
                .and_then(|customer| customer.name.as_deref())
        })
        .search(|row: &Order| {
            row.customer
                .as_ref()
                .and_then(|customer| customer.phone.as_deref())
        })
        .search(|row: &Order| dealer_name(row.dealer.as_ref()))
        .tab(|row: &Order| row.status.map(|status| status.label()).into())
        .build()
}

pub fn catalog_schema() -> Result<TableSchema<Catalog>> {
    TableSchema::builder("catalogs")
        .field("name", "Name", |row: &Catalog| row.name.as_deref().into())
        .field("brand", "Brand", |row: &Catalog| row.brand.as_deref().into())
        .field("category", "Category", |row: &Catalog| {
            row.category.as_deref().into()
        })
        .field("products", "Products", |row: &Catalog| {
            row.product_count.into()
        })
        .field("updated_on", "Updated", |row: &Catalog| {
            parse_day(row.updated_on.as_deref())
        })
        .filter("brand")
        .filter("category")
        .search(|row: &Catalog| row.name.as_deref())
        .search(|row: &Catalog| row.brand.as_deref())
        .tab(|row: &Catalog| {
            row.published
                .map(|published| if published { "Published" } else { "Draft" })
                .into()
        })
        .build()
}

pub fn dealer_product_schema() -> Result<TableSchema<DealerProduct>> {
    TableSchema::builder("dealer-products")
        .field("product", "Product", |row: &DealerProduct| {
            row.product_name.as_deref().into()
        })
        .field("dealer", "Dealer", |row: &DealerProduct| {
            dealer_value(row.dealer.as_ref())
        })
        .field("brand", "Brand", |row: &DealerProduct| {
            row.brand.as_deref().into()
        })
        .field("category", "Category", |row: &DealerProduct| {
            row.category.as_deref().into()
        })
        .field("model", "Model", |row: &DealerProduct| {
            row.model.as_deref().into()
        })
        .field("variant", "Variant", |row: &DealerProduct| {
            row.variant.as_deref().into()
        })
        .field("price", "Dealer price", |row: &DealerProduct| {
            money(row.dealer_price_cents)
        })
        .field("stock", "Stock", |row: &DealerProduct| row.stock.into())
        .filter("dealer")
        .filter("brand")
        .filter("category")
        .filter("model")
        .search(|row: &DealerProduct| row.product_name.as_deref())
        .search(|row: &DealerProduct| dealer_name(row.dealer.as_ref()))
        .search(|row: &DealerProduct| row.variant.as_deref())
        .build()
}
