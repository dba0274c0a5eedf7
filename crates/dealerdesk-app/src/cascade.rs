// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Brand → category → model → variant dependent dropdowns.
//!
//! Every transition is a pure function of the current state and returns the
//! effects the caller must carry out (usually one fetch for the next level).
//! Changing a parent always clears every descendant selection and option list
//! before the child fetch is issued, and an options response only lands if it
//! answers the fetch that is currently pending.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CascadeLevel {
    Brand,
    Category,
    Model,
    Variant,
}

impl CascadeLevel {
    pub const ALL: [Self; 4] = [Self::Brand, Self::Category, Self::Model, Self::Variant];

    pub const fn index(self) -> usize {
        match self {
            Self::Brand => 0,
            Self::Category => 1,
            Self::Model => 2,
            Self::Variant => 3,
        }
    }

    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Brand => Some(Self::Category),
            Self::Category => Some(Self::Model),
            Self::Model => Some(Self::Variant),
            Self::Variant => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Model => "model",
            Self::Variant => "variant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeEffect {
    /// Load the options for `level` under the parent `path`.
    Fetch {
        level: CascadeLevel,
        path: Vec<String>,
    },
    Cleared(CascadeLevel),
    OptionsReady {
        level: CascadeLevel,
        count: usize,
    },
    StaleIgnored(CascadeLevel),
    UnknownOption {
        level: CascadeLevel,
        value: String,
    },
    ParentMissing(CascadeLevel),
}

const LEVELS: usize = CascadeLevel::ALL.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeState {
    selected: [Option<String>; LEVELS],
    options: [Vec<String>; LEVELS],
    pending: Option<(CascadeLevel, Vec<String>)>,
}

impl Default for CascadeState {
    fn default() -> Self {
        Self {
            selected: Default::default(),
            options: Default::default(),
            pending: Some((CascadeLevel::Brand, Vec::new())),
        }
    }
}

impl CascadeState {
    /// Fresh state plus the brand fetch that seeds it.
    pub fn new() -> (Self, CascadeEffect) {
        let state = Self::default();
        let effect = CascadeEffect::Fetch {
            level: CascadeLevel::Brand,
            path: Vec::new(),
        };
        (state, effect)
    }

    pub fn reset(&mut self) -> CascadeEffect {
        *self = Self::default();
        CascadeEffect::Fetch {
            level: CascadeLevel::Brand,
            path: Vec::new(),
        }
    }

    pub fn selection(&self, level: CascadeLevel) -> Option<&str> {
        self.selected[level.index()].as_deref()
    }

    pub fn options(&self, level: CascadeLevel) -> &[String] {
        &self.options[level.index()]
    }

    pub fn pending(&self) -> Option<(CascadeLevel, &[String])> {
        self.pending
            .as_ref()
            .map(|(level, path)| (*level, path.as_slice()))
    }

    /// The contiguous chosen prefix, brand first.
    pub fn selected_path(&self) -> Vec<String> {
        self.selected
            .iter()
            .map_while(Clone::clone)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.selected_path().len() == LEVELS
    }

    pub fn select(&mut self, level: CascadeLevel, value: &str) -> Vec<CascadeEffect> {
        let index = level.index();
        if self.selected[..index].iter().any(Option::is_none) {
            return vec![CascadeEffect::ParentMissing(level)];
        }
        if !self.options[index].iter().any(|option| option == value) {
            return vec![CascadeEffect::UnknownOption {
                level,
                value: value.to_owned(),
            }];
        }
        if self.selected[index].as_deref() == Some(value) {
            return Vec::new();
        }

        self.selected[index] = Some(value.to_owned());
        let mut effects = self.clear_below(level);
        if let Some(child) = level.child() {
            let path = self.selected_path();
            debug!(level = child.label(), ?path, "cascade fetch");
            self.pending = Some((child, path.clone()));
            effects.push(CascadeEffect::Fetch { level: child, path });
        } else {
            self.pending = None;
        }
        effects
    }

    pub fn options_loaded(
        &mut self,
        level: CascadeLevel,
        path: &[String],
        options: Vec<String>,
    ) -> CascadeEffect {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|(pending, expected)| *pending == level && expected == path);
        if !current {
            debug!(level = level.label(), ?path, "stale cascade options");
            return CascadeEffect::StaleIgnored(level);
        }
        self.pending = None;
        let count = options.len();
        self.options[level.index()] = options;
        CascadeEffect::OptionsReady { level, count }
    }

    /// Clears `level` and everything beneath it. The options for `level`
    /// stay loaded so the user can pick again.
    pub fn clear(&mut self, level: CascadeLevel) -> Vec<CascadeEffect> {
        let index = level.index();
        let mut effects = Vec::new();
        if self.selected[index].take().is_some() {
            effects.push(CascadeEffect::Cleared(level));
        }
        effects.extend(self.clear_below(level));
        if self
            .pending
            .as_ref()
            .is_some_and(|(pending, _)| *pending > level)
        {
            self.pending = None;
        }
        effects
    }

    fn clear_below(&mut self, level: CascadeLevel) -> Vec<CascadeEffect> {
        let mut effects = Vec::new();
        for descendant in CascadeLevel::ALL.into_iter().skip(level.index() + 1) {
            let index = descendant.index();
            let had_selection = self.selected[index].take().is_some();
            let had_options = !self.options[index].is_empty();
            self.options[index].clear();
            if had_selection || had_options {
                effects.push(CascadeEffect::Cleared(descendant));
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::{CascadeEffect, CascadeLevel, CascadeState};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    /// Walks the cascade down to a full Honda scooter path.
    fn walked() -> CascadeState {
        let (mut state, _) = CascadeState::new();
        state.options_loaded(CascadeLevel::Brand, &[], strings(&["Honda", "Yamaha"]));
        state.select(CascadeLevel::Brand, "Honda");
        state.options_loaded(
            CascadeLevel::Category,
            &strings(&["Honda"]),
            strings(&["Scooter", "Motorcycle"]),
        );
        state.select(CascadeLevel::Category, "Scooter");
        state.options_loaded(
            CascadeLevel::Model,
            &strings(&["Honda", "Scooter"]),
            strings(&["Activa", "Dio"]),
        );
        state.select(CascadeLevel::Model, "Activa");
        state.options_loaded(
            CascadeLevel::Variant,
            &strings(&["Honda", "Scooter", "Activa"]),
            strings(&["STD", "DLX"]),
        );
        state.select(CascadeLevel::Variant, "DLX");
        state
    }

    #[test]
    fn full_walk_completes_the_path() {
        let state = walked();
        assert!(state.is_complete());
        assert_eq!(
            state.selected_path(),
            strings(&["Honda", "Scooter", "Activa", "DLX"])
        );
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn selecting_a_brand_requests_categories() {
        let (mut state, seed) = CascadeState::new();
        assert_eq!(
            seed,
            CascadeEffect::Fetch {
                level: CascadeLevel::Brand,
                path: Vec::new(),
            }
        );
        state.options_loaded(CascadeLevel::Brand, &[], strings(&["Honda"]));
        let effects = state.select(CascadeLevel::Brand, "Honda");
        assert_eq!(
            effects,
            vec![CascadeEffect::Fetch {
                level: CascadeLevel::Category,
                path: strings(&["Honda"]),
            }]
        );
    }

    #[test]
    fn changing_a_parent_clears_every_descendant_first() {
        let mut state = walked();
        let effects = state.select(CascadeLevel::Category, "Motorcycle");
        assert_eq!(
            effects,
            vec![
                CascadeEffect::Cleared(CascadeLevel::Model),
                CascadeEffect::Cleared(CascadeLevel::Variant),
                CascadeEffect::Fetch {
                    level: CascadeLevel::Model,
                    path: strings(&["Honda", "Motorcycle"]),
                },
            ]
        );
        assert!(state.options(CascadeLevel::Model).is_empty());
        assert!(state.options(CascadeLevel::Variant).is_empty());
        assert_eq!(state.selection(CascadeLevel::Model), None);
        assert_eq!(state.selection(CascadeLevel::Brand), Some("Honda"));
        assert!(!state.is_complete());
    }

    #[test]
    fn reselecting_the_same_value_is_a_no_op() {
        let mut state = walked();
        assert!(state.select(CascadeLevel::Model, "Activa").is_empty());
        assert!(state.is_complete());
    }

    #[test]
    fn late_responses_for_an_old_parent_are_ignored() {
        let mut state = walked();
        state.select(CascadeLevel::Category, "Motorcycle");
        let stale = state.options_loaded(
            CascadeLevel::Model,
            &strings(&["Honda", "Scooter"]),
            strings(&["Activa"]),
        );
        assert_eq!(stale, CascadeEffect::StaleIgnored(CascadeLevel::Model));
        assert!(state.options(CascadeLevel::Model).is_empty());

        let fresh = state.options_loaded(
            CascadeLevel::Model,
            &strings(&["Honda", "Motorcycle"]),
            strings(&["Shine", "Unicorn", "SP125"]),
        );
        assert_eq!(
            fresh,
            CascadeEffect::OptionsReady {
                level: CascadeLevel::Model,
                count: 3,
            }
        );
    }

    #[test]
    fn rejects_values_outside_the_loaded_options() {
        let (mut state, _) = CascadeState::new();
        state.options_loaded(CascadeLevel::Brand, &[], strings(&["Honda"]));
        assert_eq!(
            state.select(CascadeLevel::Brand, "Vespa"),
            vec![CascadeEffect::UnknownOption {
                level: CascadeLevel::Brand,
                value: "Vespa".to_owned(),
            }]
        );
        assert_eq!(
            state.select(CascadeLevel::Model, "Activa"),
            vec![CascadeEffect::ParentMissing(CascadeLevel::Model)]
        );
    }

    #[test]
    fn clear_drops_level_and_descendants_but_keeps_its_options() {
        let mut state = walked();
        let effects = state.clear(CascadeLevel::Model);
        assert_eq!(
            effects,
            vec![
                CascadeEffect::Cleared(CascadeLevel::Model),
                CascadeEffect::Cleared(CascadeLevel::Variant),
            ]
        );
        assert_eq!(state.options(CascadeLevel::Model).len(), 2);
        assert_eq!(state.selected_path(), strings(&["Honda", "Scooter"]));
        assert_eq!(state.select(CascadeLevel::Model, "Dio").len(), 1);
    }

    #[test]
    fn reset_returns_to_the_seeded_state() {
        let mut state = walked();
        let effect = state.reset();
        assert_eq!(
            effect,
            CascadeEffect::Fetch {
                level: CascadeLevel::Brand,
                path: Vec::new(),
            }
        );
        assert_eq!(state, CascadeState::default());
        assert!(state.selected_path().is_empty());
    }
}
