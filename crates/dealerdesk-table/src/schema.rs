// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow, bail};

use crate::FieldValue;

/// Anything a list view can display. The id is what selection sets track.
pub trait Record {
    fn record_id(&self) -> &str;
}

pub type Accessor<R> = fn(&R) -> FieldValue;
pub type TextAccessor<R> = fn(&R) -> Option<&str>;

pub struct FieldSpec<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub accessor: Accessor<R>,
}

impl<R> Clone for FieldSpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldSpec<R> {}

/// Per-screen wiring for the table pipeline. Built once and then shared
/// read-only by every operation.
pub struct TableSchema<R> {
    name: &'static str,
    fields: Vec<FieldSpec<R>>,
    filters: Vec<&'static str>,
    searchable: Vec<TextAccessor<R>>,
    tab: Option<Accessor<R>>,
}

impl<R> Clone for TableSchema<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            fields: self.fields.clone(),
            filters: self.filters.clone(),
            searchable: self.searchable.clone(),
            tab: self.tab,
        }
    }
}

impl<R> std::fmt::Debug for TableSchema<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSchema")
            .field("name", &self.name)
            .field(
                "fields",
                &self.fields.iter().map(|field| field.key).collect::<Vec<_>>(),
            )
            .field("filters", &self.filters)
            .field("searchable", &self.searchable.len())
            .field("tab", &self.tab.is_some())
            .finish()
    }
}

impl<R> TableSchema<R> {
    pub fn builder(name: &'static str) -> TableSchemaBuilder<R> {
        TableSchemaBuilder {
            schema: TableSchema {
                name,
                fields: Vec::new(),
                filters: Vec::new(),
                searchable: Vec::new(),
                tab: None,
            },
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldSpec<R>] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec<R>> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn accessor(&self, key: &str) -> Result<Accessor<R>> {
        self.field(key)
            .map(|field| field.accessor)
            .ok_or_else(|| anyhow!("unknown field {key:?} for table {:?}", self.name))
    }

    /// Filter keys in the order they are applied.
    pub fn filter_keys(&self) -> &[&'static str] {
        &self.filters
    }

    pub fn is_filter(&self, key: &str) -> bool {
        self.filters.iter().any(|filter| *filter == key)
    }

    pub fn searchable(&self) -> &[TextAccessor<R>] {
        &self.searchable
    }

    pub const fn tab_accessor(&self) -> Option<Accessor<R>> {
        self.tab
    }
}

pub struct TableSchemaBuilder<R> {
    schema: TableSchema<R>,
}

impl<R> TableSchemaBuilder<R> {
    pub fn field(mut self, key: &'static str, label: &'static str, accessor: Accessor<R>) -> Self {
        self.schema.fields.push(FieldSpec {
            key,
            label,
            accessor,
        });
        self
    }

    pub fn filter(mut self, key: &'static str) -> Self {
        self.schema.filters.push(key);
        self
    }

    pub fn search(mut self, accessor: TextAccessor<R>) -> Self {
        self.schema.searchable.push(accessor);
        self
    }

    pub fn tab(mut self, accessor: Accessor<R>) -> Self {
        self.schema.tab = Some(accessor);
        self
    }

    pub fn build(self) -> Result<TableSchema<R>> {
        let schema = self.schema;
        for (index, field) in schema.fields.iter().enumerate() {
            if schema.fields[..index]
                .iter()
                .any(|earlier| earlier.key == field.key)
            {
                bail!(
                    "field {:?} registered twice for table {:?}",
                    field.key,
                    schema.name
                );
            }
        }
        for key in &schema.filters {
            if schema.field(key).is_none() {
                bail!(
                    "filter {key:?} for table {:?} has no registered field; add .field({key:?}, ..) first",
                    schema.name
                );
            }
        }
        Ok(schema)
    }
}
