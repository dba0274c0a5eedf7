// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

/// Record ids checked on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    /// Returns whether `id` is selected after the toggle.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_owned());
            true
        }
    }

    /// Select-all checkbox: clears when the whole page is already selected,
    /// otherwise selects exactly the page.
    pub fn toggle_all<'a, I>(&mut self, page_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let page: BTreeSet<String> = page_ids.into_iter().map(str::to_owned).collect();
        if !page.is_empty() && page == self.ids {
            self.ids.clear();
            false
        } else {
            self.ids = page;
            !self.ids.is_empty()
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionSet;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = SelectionSet::default();
        assert!(selection.toggle("p-1"));
        assert!(selection.contains("p-1"));
        assert!(!selection.toggle("p-1"));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_selects_page_then_clears() {
        let mut selection = SelectionSet::default();
        selection.toggle("p-9");

        assert!(selection.toggle_all(["p-1", "p-2"]));
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["p-1", "p-2"]);
        assert!(!selection.contains("p-9"));

        assert!(!selection.toggle_all(["p-1", "p-2"]));
        assert_eq!(selection.len(), 0);
    }

    #[test]
    fn toggle_all_on_empty_page_selects_nothing() {
        let mut selection = SelectionSet::default();
        assert!(!selection.toggle_all(std::iter::empty()));
        assert!(selection.is_empty());
    }
}
