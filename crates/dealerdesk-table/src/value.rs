// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use time::Date;

/// A single cell value pulled out of a record by a field accessor.
///
/// Records come from sparse upstream payloads, so every accessor is allowed to
/// answer `Missing`. Filtering treats `Missing` as "no match" and sorting
/// treats it as the minimum of whatever type it is compared against.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(Date),
    #[default]
    Missing,
}

impl FieldValue {
    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => format!("{value:.2}"),
            Self::Date(value) => value.to_string(),
            Self::Missing => String::new(),
        }
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Ascending comparator used by every sortable column. Descending order is
    /// always derived by reversing this result.
    pub fn cmp_sort_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Missing, typed) => typed.minimum().cmp_sort_key(typed),
            (typed, Self::Missing) => typed.cmp_sort_key(&typed.minimum()),
            (Self::Text(left), Self::Text(right)) => left.to_lowercase().cmp(&right.to_lowercase()),
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Decimal(left), Self::Decimal(right)) => left.total_cmp(right),
            (Self::Integer(left), Self::Decimal(right)) => (*left as f64).total_cmp(right),
            (Self::Decimal(left), Self::Integer(right)) => left.total_cmp(&(*right as f64)),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            _ => self
                .display()
                .to_lowercase()
                .cmp(&other.display().to_lowercase()),
        }
    }

    fn minimum(&self) -> Self {
        match self {
            Self::Text(_) => Self::Text(String::new()),
            Self::Integer(_) => Self::Integer(0),
            Self::Decimal(_) => Self::Decimal(0.0),
            Self::Date(_) => Self::Date(Date::MIN),
            Self::Missing => Self::Missing,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<Date> for FieldValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use std::cmp::Ordering;
    use time::{Date, Month};

    #[test]
    fn text_compares_case_insensitively() {
        let banana = FieldValue::from("Banana");
        let apple = FieldValue::from("apple");
        assert_eq!(apple.cmp_sort_key(&banana), Ordering::Less);
        assert_eq!(
            FieldValue::from("CHERRY").cmp_sort_key(&FieldValue::from("cherry")),
            Ordering::Equal
        );
    }

    #[test]
    fn numbers_compare_numerically_not_lexically() {
        assert_eq!(
            FieldValue::Integer(9).cmp_sort_key(&FieldValue::Integer(10)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Decimal(2.5).cmp_sort_key(&FieldValue::Integer(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn missing_sorts_as_type_minimum() {
        assert_eq!(
            FieldValue::Missing.cmp_sort_key(&FieldValue::Integer(1)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Missing.cmp_sort_key(&FieldValue::Integer(0)),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::Text(String::new()).cmp_sort_key(&FieldValue::Missing),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::Integer(-3).cmp_sort_key(&FieldValue::Missing),
            Ordering::Less
        );
        let date = Date::from_calendar_date(2026, Month::March, 1).expect("valid date");
        assert_eq!(
            FieldValue::Missing.cmp_sort_key(&FieldValue::Date(date)),
            Ordering::Less
        );
    }

    #[test]
    fn option_conversion_maps_none_to_missing() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Missing);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".to_owned()));
        assert!(FieldValue::from(None::<String>).is_missing());
        assert_eq!(FieldValue::Missing.display(), "");
    }
}
