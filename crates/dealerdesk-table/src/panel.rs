// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FilterChoice, FilterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Opened,
    DraftEdited,
    Applied,
    ResetAndApplied,
    ClosedWithoutApply,
    NotOpen,
}

/// Filter panel with a staged draft. Edits touch only the draft until the
/// user applies or resets; closing any other way discards them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPanel {
    state: PanelState,
    draft: FilterState,
}

impl FilterPanel {
    pub const fn state(&self) -> PanelState {
        self.state
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open)
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    pub fn open(&mut self, committed: &FilterState) -> PanelOutcome {
        self.draft = committed.clone();
        self.state = PanelState::Open;
        PanelOutcome::Opened
    }

    pub fn set_draft(&mut self, key: impl Into<String>, choice: FilterChoice) -> PanelOutcome {
        if !self.is_open() {
            return PanelOutcome::NotOpen;
        }
        self.draft.set(key, choice);
        PanelOutcome::DraftEdited
    }

    /// Commits the drafted filters. Search has its own commit path, so the
    /// committed query survives even if it changed while the panel was open.
    pub fn apply(&mut self, committed: &mut FilterState) -> PanelOutcome {
        if !self.is_open() {
            return PanelOutcome::NotOpen;
        }
        committed.filters = std::mem::take(&mut self.draft).filters;
        self.state = PanelState::Closed;
        PanelOutcome::Applied
    }

    pub fn reset(&mut self, committed: &mut FilterState) -> PanelOutcome {
        if !self.is_open() {
            return PanelOutcome::NotOpen;
        }
        self.draft = FilterState::default();
        *committed = FilterState::default();
        self.state = PanelState::Closed;
        PanelOutcome::ResetAndApplied
    }

    /// Outside click, escape, or the close button.
    pub fn close(&mut self) -> PanelOutcome {
        if !self.is_open() {
            return PanelOutcome::NotOpen;
        }
        self.draft = FilterState::default();
        self.state = PanelState::Closed;
        PanelOutcome::ClosedWithoutApply
    }
}
