// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use dealerdesk_table::{
    FieldValue, FilterChoice, FilterState, PageRequest, Record, SortDirection, SortDirective,
    TableCommand, TableSchema, TableView, apply_filters, apply_sort, derive_options, paginate,
    toggle_sort, total_pages,
};

#[derive(Debug, Clone, PartialEq)]
struct Listing {
    id: String,
    title: Option<String>,
    brand: Option<&'static str>,
    status: Option<&'static str>,
    stock: Option<i64>,
}

impl Record for Listing {
    fn record_id(&self) -> &str {
        &self.id
    }
}

const BRANDS: [Option<&str>; 5] = [
    Some("Honda"),
    Some("Yamaha"),
    None,
    Some("Bajaj"),
    Some("Honda"),
];
const STATUSES: [Option<&str>; 4] = [Some("Active"), Some("Pending"), Some("Active"), None];

fn listings(count: usize) -> Vec<Listing> {
    (0..count)
        .map(|index| Listing {
            id: format!("L{index:03}"),
            title: (index % 7 != 0).then(|| format!("Listing {}", index * 37 % 101)),
            brand: BRANDS[index % BRANDS.len()],
            status: STATUSES[index % STATUSES.len()],
            stock: (index % 5 != 1).then_some((index * 13 % 17) as i64),
        })
        .collect()
}

fn schema() -> Result<TableSchema<Listing>> {
    TableSchema::builder("listings")
        .field("title", "Title", |row: &Listing| row.title.clone().into())
        .field("brand", "Brand", |row: &Listing| row.brand.into())
        .field("status", "Status", |row: &Listing| row.status.into())
        .field("stock", "Stock", |row: &Listing| row.stock.into())
        .filter("brand")
        .filter("status")
        .search(|row: &Listing| row.title.as_deref())
        .search(|row: &Listing| row.brand)
        .build()
}

#[test]
fn pages_rebuild_the_filtered_sorted_sequence() -> Result<()> {
    let schema = schema()?;
    let records = listings(83);
    let mut state = FilterState::default();
    state.set("status", FilterChoice::from("Active"));

    let filtered = apply_filters(&records, &schema, &FilterChoice::All, &state);
    let sorted = apply_sort(
        filtered,
        &schema,
        &SortDirective::new("stock", SortDirection::Desc),
    )?;

    let first = PageRequest::first(9)?;
    let mut rebuilt = Vec::new();
    for number in 1..=total_pages(sorted.len(), first.size()) {
        rebuilt.extend_from_slice(paginate(&sorted, first.with_number(number)));
    }
    assert_eq!(rebuilt, sorted);
    Ok(())
}

#[test]
fn every_added_constraint_narrows_the_result() -> Result<()> {
    let schema = schema()?;
    let records = listings(120);

    let mut state = FilterState::default();
    let mut previous = apply_filters(&records, &schema, &FilterChoice::All, &state);
    assert_eq!(previous.len(), records.len());

    for (key, value) in [("brand", "Honda"), ("status", "Active")] {
        state.set(key, FilterChoice::from(value));
        let next = apply_filters(&records, &schema, &FilterChoice::All, &state);
        assert!(next.iter().all(|row| previous.contains(row)));
        previous = next;
    }

    state.search = "listing 1".to_owned();
    let searched = apply_filters(&records, &schema, &FilterChoice::All, &state);
    assert!(searched.iter().all(|row| previous.contains(row)));
    assert!(searched.iter().all(|row| {
        row.title
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains("listing 1"))
    }));
    Ok(())
}

#[test]
fn brand_facets_are_sorted_and_unique() -> Result<()> {
    let schema = schema()?;
    let records = listings(40);
    let options = derive_options(&records, schema.accessor("brand")?);
    assert_eq!(options, vec!["Bajaj", "Honda", "Yamaha"]);
    Ok(())
}

fn ids_for_brand<'a>(rows: &[&'a Listing], brand: Option<&str>) -> Vec<&'a str> {
    rows.iter()
        .filter(|row| row.brand == brand)
        .map(|row| row.id.as_str())
        .collect()
}

#[test]
fn brand_ties_keep_whatever_order_they_arrived_in() -> Result<()> {
    let schema = schema()?;
    let records = listings(30);
    let forward: Vec<&Listing> = records.iter().collect();
    let backward: Vec<&Listing> = records.iter().rev().collect();

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let directive = SortDirective::new("brand", direction);
        let from_forward = apply_sort(forward.clone(), &schema, &directive)?;
        let from_backward = apply_sort(backward.clone(), &schema, &directive)?;
        assert_ne!(from_forward, from_backward);

        for brand in BRANDS {
            assert_eq!(
                ids_for_brand(&from_forward, brand),
                ids_for_brand(&forward, brand)
            );
            assert_eq!(
                ids_for_brand(&from_backward, brand),
                ids_for_brand(&backward, brand)
            );
        }
    }
    Ok(())
}

#[test]
fn toggling_twice_from_untouched_goes_asc_then_desc() {
    let first = toggle_sort(&SortDirective::default(), "price");
    let second = toggle_sort(&first, "price");
    assert_eq!(first, SortDirective::new("price", SortDirection::Asc));
    assert_eq!(second, SortDirective::new("price", SortDirection::Desc));
}

#[test]
fn session_walks_pages_after_search_and_sort() -> Result<()> {
    let mut view = TableView::new(schema()?, 10)?;
    view.replace_records(listings(60));

    view.dispatch(TableCommand::SetFilter {
        key: "brand".to_owned(),
        choice: FilterChoice::from("Honda"),
    })?;
    view.dispatch(TableCommand::ToggleSort("stock".to_owned()))?;

    let projection = view.project()?;
    let total = projection.total_filtered;
    assert_eq!(total, 24);
    assert_eq!(projection.total_pages, 3);
    assert_eq!(projection.applied_filter_count, 1);

    let mut seen = Vec::new();
    for number in 1..=3 {
        view.dispatch(TableCommand::GoToPage(number))?;
        let page = view.project()?;
        seen.extend(page.rows.iter().map(|row| row.id.clone()));
    }
    assert_eq!(seen.len(), total);
    let mut unique = seen.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), total);

    let stocks: Vec<FieldValue> = view
        .filtered_sorted()?
        .iter()
        .map(|row| FieldValue::from(row.stock))
        .collect();
    assert!(
        stocks
            .windows(2)
            .all(|pair| pair[0].cmp_sort_key(&pair[1]).is_le())
    );
    Ok(())
}
