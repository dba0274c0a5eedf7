// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::{Accessor, TableSchema};

/// Distinct non-empty values of one field, sorted ascending (case-sensitive).
pub fn derive_options<R>(records: &[R], accessor: Accessor<R>) -> Vec<String> {
    records
        .iter()
        .map(accessor)
        .filter(|value| !value.is_missing())
        .map(|value| value.display())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Facets for every declared filter, recomputed only when the record
/// collection generation changes.
#[derive(Debug, Clone, Default)]
pub struct OptionsCache {
    generation: Option<u64>,
    options: BTreeMap<&'static str, Vec<String>>,
}

impl OptionsCache {
    pub fn refresh<R>(&mut self, generation: u64, records: &[R], schema: &TableSchema<R>) -> bool {
        if self.generation == Some(generation) {
            return false;
        }
        self.options = schema
            .filter_keys()
            .iter()
            .filter_map(|key| {
                schema
                    .field(key)
                    .map(|field| (*key, derive_options(records, field.accessor)))
            })
            .collect();
        self.generation = Some(generation);
        debug!(
            table = schema.name(),
            generation,
            facets = self.options.len(),
            rows = records.len(),
            "recomputed filter options"
        );
        true
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.options.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all(&self) -> &BTreeMap<&'static str, Vec<String>> {
        &self.options
    }

    pub const fn generation(&self) -> Option<u64> {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionsCache, derive_options};
    use crate::TableSchema;
    use anyhow::Result;

    struct Row {
        brand: Option<&'static str>,
    }

    fn brand(row: &Row) -> crate::FieldValue {
        row.brand.into()
    }

    fn rows(brands: &[Option<&'static str>]) -> Vec<Row> {
        brands.iter().map(|brand| Row { brand: *brand }).collect()
    }

    #[test]
    fn options_are_distinct_sorted_and_skip_blank_values() {
        let records = rows(&[
            Some("Yamaha"),
            None,
            Some("Honda"),
            Some(""),
            Some("Yamaha"),
            Some("bajaj"),
        ]);
        let options = derive_options(&records, brand);
        assert_eq!(options, vec!["Honda", "Yamaha", "bajaj"]);
    }

    #[test]
    fn cache_recomputes_only_on_new_generation() -> Result<()> {
        let schema = TableSchema::builder("rows")
            .field("brand", "Brand", brand)
            .filter("brand")
            .build()?;
        let first = rows(&[Some("Honda")]);
        let mut cache = OptionsCache::default();

        assert!(cache.refresh(1, &first, &schema));
        assert_eq!(cache.get("brand"), ["Honda".to_owned()]);
        assert!(!cache.refresh(1, &first, &schema));

        let second = rows(&[Some("Hero"), Some("Honda")]);
        assert!(cache.refresh(2, &second, &schema));
        assert_eq!(cache.get("brand"), ["Hero".to_owned(), "Honda".to_owned()]);
        assert_eq!(cache.generation(), Some(2));
        assert!(cache.get("model").is_empty());
        Ok(())
    }
}
