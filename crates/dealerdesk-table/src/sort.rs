// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::TableSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column. `field == None` keeps source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }
}

/// Same field flips direction; a new field starts ascending.
pub fn toggle_sort(current: &SortDirective, field: &str) -> SortDirective {
    match current.field.as_deref() {
        Some(active) if active == field => SortDirective::new(field, current.direction.flip()),
        _ => SortDirective::new(field, SortDirection::Asc),
    }
}

/// Stable sort by the directive's field. Fails only when the field is not
/// registered on the schema.
pub fn apply_sort<'a, R>(
    records: Vec<&'a R>,
    schema: &TableSchema<R>,
    directive: &SortDirective,
) -> Result<Vec<&'a R>> {
    let Some(field) = directive.field.as_deref() else {
        return Ok(records);
    };
    let accessor = schema.accessor(field)?;

    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|record| (accessor(record), record))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| {
        let order = left.cmp_sort_key(right);
        match directive.direction {
            SortDirection::Asc => order,
            SortDirection::Desc => order.reverse(),
        }
    });
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
