// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::TableSchema;

pub const ALL_SENTINEL: &str = "all";

/// One categorical constraint. `All` never excludes a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterChoice {
    #[default]
    All,
    Only(String),
}

impl FilterChoice {
    /// `"all"` and blank input both mean "no constraint".
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() || value == ALL_SENTINEL {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Only(value) => value,
        }
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn admits(&self, candidate: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(value) => value == candidate,
        }
    }
}

impl From<String> for FilterChoice {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for FilterChoice {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<FilterChoice> for String {
    fn from(choice: FilterChoice) -> Self {
        match choice {
            FilterChoice::All => ALL_SENTINEL.to_owned(),
            FilterChoice::Only(value) => value,
        }
    }
}

/// Committed constraints for one list view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub filters: BTreeMap<String, FilterChoice>,
    #[serde(default)]
    pub search: String,
}

impl FilterState {
    pub fn get(&self, key: &str) -> &FilterChoice {
        static ALL: FilterChoice = FilterChoice::All;
        self.filters.get(key).unwrap_or(&ALL)
    }

    pub fn set(&mut self, key: impl Into<String>, choice: FilterChoice) {
        let key = key.into();
        if choice.is_all() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, choice);
        }
    }

    pub fn search_query(&self) -> Option<String> {
        let trimmed = self.search.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    pub fn is_default(&self) -> bool {
        count_applied_filters(self) == 0
    }
}

/// Narrow `records` to the ones admitted by `tab` and `state`.
///
/// Order of application: tab partition, declared filters in schema order,
/// free-text search. Input order is preserved.
pub fn apply_filters<'a, R>(
    records: &'a [R],
    schema: &TableSchema<R>,
    tab: &FilterChoice,
    state: &FilterState,
) -> Vec<&'a R> {
    for key in state.filters.keys() {
        if !schema.is_filter(key) {
            warn!(table = schema.name(), key = %key, "ignoring filter not declared by table");
        }
    }

    let mut rows: Vec<&R> = records.iter().collect();

    if let Some(accessor) = schema.tab_accessor()
        && !tab.is_all()
    {
        rows.retain(|row| {
            let value = accessor(row);
            !value.is_missing() && tab.admits(&value.display())
        });
    }

    for key in schema.filter_keys() {
        let choice = state.get(key);
        if choice.is_all() {
            continue;
        }
        let Some(field) = schema.field(key) else {
            continue;
        };
        rows.retain(|row| {
            let value = (field.accessor)(row);
            !value.is_missing() && choice.admits(&value.display())
        });
    }

    if let Some(query) = state.search_query() {
        let searchable = schema.searchable();
        rows.retain(|row| {
            searchable.iter().any(|accessor| {
                accessor(row).is_some_and(|text| text.to_lowercase().contains(&query))
            })
        });
    }

    rows
}

/// Badge count for the filter button: one per constrained key plus one for a
/// non-blank search.
pub fn count_applied_filters(state: &FilterState) -> usize {
    let constrained = state
        .filters
        .values()
        .filter(|choice| match choice {
            FilterChoice::All => false,
            FilterChoice::Only(value) => !value.is_empty() && value != ALL_SENTINEL,
        })
        .count();
    constrained + usize::from(state.search_query().is_some())
}

#[cfg(test)]
mod tests {
    use super::{FilterChoice, FilterState, apply_filters, count_applied_filters};
    use crate::{FieldValue, TableSchema};
    use anyhow::Result;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: Option<&'static str>,
        status: Option<&'static str>,
        kind: &'static str,
    }

    fn row(name: Option<&'static str>, status: Option<&'static str>, kind: &'static str) -> Row {
        Row { name, status, kind }
    }

    fn schema() -> Result<TableSchema<Row>> {
        TableSchema::builder("rows")
            .field("name", "Name", |row: &Row| row.name.into())
            .field("status", "Status", |row: &Row| row.status.into())
            .field("kind", "Kind", |row: &Row| FieldValue::from(row.kind))
            .filter("status")
            .filter("kind")
            .search(|row: &Row| row.name)
            .tab(|row: &Row| FieldValue::from(row.kind))
            .build()
    }

    fn sample() -> Vec<Row> {
        vec![
            row(Some("Alpha"), Some("Active"), "retail"),
            row(Some("Bravo"), Some("Pending"), "retail"),
            row(Some("Charlie"), Some("Active"), "wholesale"),
            row(None, None, "retail"),
        ]
    }

    #[test]
    fn exact_filter_keeps_matching_rows_in_order() -> Result<()> {
        let schema = schema()?;
        let records = vec![
            row(Some("a"), Some("Active"), "x"),
            row(Some("b"), Some("Pending"), "x"),
            row(Some("c"), Some("Active"), "x"),
        ];
        let mut state = FilterState::default();
        state.set("status", FilterChoice::from("Active"));

        let filtered = apply_filters(&records, &schema, &FilterChoice::All, &state);
        assert_eq!(filtered, vec![&records[0], &records[2]]);
        Ok(())
    }

    #[test]
    fn default_state_is_identity() -> Result<()> {
        let schema = schema()?;
        let records = sample();
        let filtered = apply_filters(&records, &schema, &FilterChoice::All, &FilterState::default());
        assert_eq!(filtered, records.iter().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn whitespace_search_excludes_nothing() -> Result<()> {
        let schema = schema()?;
        let records = sample();
        let state = FilterState {
            search: "   ".to_owned(),
            ..FilterState::default()
        };
        let filtered = apply_filters(&records, &schema, &FilterChoice::All, &state);
        assert_eq!(filtered.len(), records.len());
        assert_eq!(count_applied_filters(&state), 0);
        Ok(())
    }

    #[test]
    fn search_is_trimmed_case_insensitive_and_skips_missing_fields() -> Result<()> {
        let schema = schema()?;
        let records = sample();
        let state = FilterState {
            search: "  cHaR ".to_owned(),
            ..FilterState::default()
        };
        let filtered = apply_filters(&records, &schema, &FilterChoice::All, &state);
        assert_eq!(filtered, vec![&records[2]]);
        Ok(())
    }

    #[test]
    fn tab_partition_applies_before_filters() -> Result<()> {
        let schema = schema()?;
        let records = sample();
        let mut state = FilterState::default();
        state.set("status", FilterChoice::from("Active"));

        let filtered = apply_filters(&records, &schema, &FilterChoice::from("retail"), &state);
        assert_eq!(filtered, vec![&records[0]]);
        Ok(())
    }

    #[test]
    fn missing_field_never_matches_concrete_value() -> Result<()> {
        let schema = schema()?;
        let records = vec![row(None, None, "retail")];
        let mut state = FilterState::default();
        state.set("status", FilterChoice::from("Active"));
        assert!(apply_filters(&records, &schema, &FilterChoice::All, &state).is_empty());
        Ok(())
    }

    #[test]
    fn empty_records_and_unmatched_query_yield_empty_output() -> Result<()> {
        let schema = schema()?;
        let mut state = FilterState::default();
        state.set("status", FilterChoice::from("Active"));
        assert!(apply_filters(&[], &schema, &FilterChoice::All, &state).is_empty());

        let records = sample();
        let state = FilterState {
            search: "zzz".to_owned(),
            ..FilterState::default()
        };
        assert!(apply_filters(&records, &schema, &FilterChoice::All, &state).is_empty());
        Ok(())
    }

    #[test]
    fn more_constraints_yield_subset() -> Result<()> {
        let schema = schema()?;
        let records = sample();
        let mut loose = FilterState::default();
        loose.set("kind", FilterChoice::from("retail"));
        let mut strict = loose.clone();
        strict.set("status", FilterChoice::from("Pending"));

        let wide = apply_filters(&records, &schema, &FilterChoice::All, &loose);
        let narrow = apply_filters(&records, &schema, &FilterChoice::All, &strict);
        assert!(narrow.len() <= wide.len());
        assert!(narrow.iter().all(|row| wide.contains(row)));
        Ok(())
    }

    #[test]
    fn undeclared_filter_key_is_ignored() -> Result<()> {
        let schema = schema()?;
        let records = sample();
        let mut state = FilterState::default();
        state.set("name", FilterChoice::from("Alpha"));
        let filtered = apply_filters(&records, &schema, &FilterChoice::All, &state);
        assert_eq!(filtered.len(), records.len());
        Ok(())
    }

    #[test]
    fn applied_count_grows_by_one_per_constraint() {
        let mut state = FilterState::default();
        assert_eq!(count_applied_filters(&state), 0);
        assert!(state.is_default());

        state.set("status", FilterChoice::from("Active"));
        assert_eq!(count_applied_filters(&state), 1);

        state.set("kind", FilterChoice::from("retail"));
        assert_eq!(count_applied_filters(&state), 2);

        state.search = "bolt".to_owned();
        assert_eq!(count_applied_filters(&state), 3);

        state.set("kind", FilterChoice::All);
        assert_eq!(count_applied_filters(&state), 2);
    }

    #[test]
    fn choice_parses_sentinel_and_blank_as_all() {
        assert_eq!(FilterChoice::parse("all"), FilterChoice::All);
        assert_eq!(FilterChoice::parse("  "), FilterChoice::All);
        assert_eq!(
            FilterChoice::parse("Active"),
            FilterChoice::Only("Active".to_owned())
        );
        assert_eq!(FilterChoice::All.as_str(), "all");
    }

    #[test]
    fn filter_state_serializes_choices_as_plain_strings() -> Result<()> {
        let mut state = FilterState::default();
        state.set("status", FilterChoice::from("Active"));
        let json = serde_json::to_string(&state)?;
        assert_eq!(json, r#"{"filters":{"status":"Active"},"search":""}"#);

        let parsed: FilterState = serde_json::from_str(r#"{"filters":{"kind":"all"}}"#)?;
        assert!(parsed.get("kind").is_all());
        Ok(())
    }
}
