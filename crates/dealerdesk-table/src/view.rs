// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    FilterChoice, FilterPanel, FilterState, OptionsCache, PageRequest, PanelOutcome, Record,
    SelectionSet, SortDirective, TableSchema, apply_filters, apply_sort, count_applied_filters,
    paginate, toggle_sort, total_pages,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    SetFilter { key: String, choice: FilterChoice },
    ClearFilters,
    CommitSearch(String),
    SetTab(FilterChoice),
    ToggleSort(String),
    ClearSort,
    GoToPage(usize),
    ToggleSelection(String),
    SelectAllOnPage,
    OpenFilterPanel,
    SetDraftFilter { key: String, choice: FilterChoice },
    ApplyFilterPanel,
    ResetFilterPanel,
    CloseFilterPanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    FiltersChanged { applied: usize },
    TabChanged(FilterChoice),
    SortChanged(SortDirective),
    PageChanged(usize),
    SelectionChanged { selected: usize },
    SelectionCleared,
    SelectionUnavailable(String),
    Panel(PanelOutcome),
}

impl TableEvent {
    pub fn message(&self) -> String {
        match self {
            Self::FiltersChanged { applied: 0 } => "filters cleared".to_owned(),
            Self::FiltersChanged { applied } => format!("{applied} filter(s) applied"),
            Self::TabChanged(tab) => format!("tab {}", tab.as_str()),
            Self::SortChanged(SortDirective { field: None, .. }) => "sort cleared".to_owned(),
            Self::SortChanged(SortDirective {
                field: Some(field),
                direction,
            }) => format!("sort {field} {}", direction.as_str()),
            Self::PageChanged(number) => format!("page {number}"),
            Self::SelectionChanged { selected } => format!("{selected} selected"),
            Self::SelectionCleared => "selection cleared".to_owned(),
            Self::SelectionUnavailable(id) => format!("{id} is not on this page"),
            Self::Panel(outcome) => match outcome {
                PanelOutcome::Opened => "filter panel open".to_owned(),
                PanelOutcome::DraftEdited => "draft updated".to_owned(),
                PanelOutcome::Applied => "filters applied".to_owned(),
                PanelOutcome::ResetAndApplied => "filters reset".to_owned(),
                PanelOutcome::ClosedWithoutApply => "filter panel closed".to_owned(),
                PanelOutcome::NotOpen => "filter panel is not open".to_owned(),
            },
        }
    }
}

/// What a list screen renders for the current state.
#[derive(Debug)]
pub struct TableProjection<'a, R> {
    pub rows: Vec<&'a R>,
    pub page: PageRequest,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub applied_filter_count: usize,
    pub options: &'a BTreeMap<&'static str, Vec<String>>,
}

/// One list-view session: records plus every piece of screen-local state the
/// pipeline reads.
#[derive(Debug)]
pub struct TableView<R> {
    schema: TableSchema<R>,
    records: Vec<R>,
    generation: u64,
    tab: FilterChoice,
    filters: FilterState,
    panel: FilterPanel,
    sort: SortDirective,
    page: PageRequest,
    selection: SelectionSet,
    options: OptionsCache,
}

impl<R: Record> TableView<R> {
    pub fn new(schema: TableSchema<R>, page_size: usize) -> Result<Self> {
        Ok(Self {
            schema,
            records: Vec::new(),
            generation: 0,
            tab: FilterChoice::All,
            filters: FilterState::default(),
            panel: FilterPanel::default(),
            sort: SortDirective::default(),
            page: PageRequest::first(page_size)?,
            selection: SelectionSet::default(),
            options: OptionsCache::default(),
        })
    }

    pub fn schema(&self) -> &TableSchema<R> {
        &self.schema
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tab(&self) -> &FilterChoice {
        &self.tab
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    pub const fn page(&self) -> PageRequest {
        self.page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Swap in a freshly fetched collection. Facets are recomputed lazily on
    /// the next projection.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.generation = self.generation.wrapping_add(1);
        self.page = self.page.with_number(1);
        self.selection.clear();
        debug!(
            table = self.schema.name(),
            generation = self.generation,
            rows = self.records.len(),
            "records replaced"
        );
    }

    pub fn dispatch(&mut self, command: TableCommand) -> Result<Vec<TableEvent>> {
        let events = match command {
            TableCommand::SetFilter { key, choice } => {
                self.require_filter(&key)?;
                self.filters.set(key, choice);
                self.filters_mutated()
            }
            TableCommand::ClearFilters => {
                self.filters.filters.clear();
                self.filters_mutated()
            }
            TableCommand::CommitSearch(query) => {
                self.filters.search = query;
                self.filters_mutated()
            }
            TableCommand::SetTab(tab) => {
                if self.schema.tab_accessor().is_none() && !tab.is_all() {
                    bail!(
                        "table {:?} has no tabs; cannot show tab {:?}",
                        self.schema.name(),
                        tab.as_str()
                    );
                }
                self.tab = tab.clone();
                let mut events = vec![TableEvent::TabChanged(tab)];
                events.extend(self.reset_page_and_selection());
                events
            }
            TableCommand::ToggleSort(field) => {
                self.schema.accessor(&field)?;
                self.sort = toggle_sort(&self.sort, &field);
                let mut events = vec![TableEvent::SortChanged(self.sort.clone())];
                events.extend(self.clear_selection());
                events
            }
            TableCommand::ClearSort => {
                self.sort = SortDirective::default();
                let mut events = vec![TableEvent::SortChanged(self.sort.clone())];
                events.extend(self.clear_selection());
                events
            }
            TableCommand::GoToPage(number) => {
                self.page = self.page.with_number(number);
                let mut events = vec![TableEvent::PageChanged(self.page.number())];
                events.extend(self.clear_selection());
                events
            }
            TableCommand::ToggleSelection(id) => {
                let on_page = self.page_ids()?.iter().any(|candidate| *candidate == id);
                if on_page {
                    self.selection.toggle(&id);
                    vec![TableEvent::SelectionChanged {
                        selected: self.selection.len(),
                    }]
                } else {
                    vec![TableEvent::SelectionUnavailable(id)]
                }
            }
            TableCommand::SelectAllOnPage => {
                let ids = self.page_ids()?;
                self.selection.toggle_all(ids.iter().map(String::as_str));
                vec![TableEvent::SelectionChanged {
                    selected: self.selection.len(),
                }]
            }
            TableCommand::OpenFilterPanel => {
                vec![TableEvent::Panel(self.panel.open(&self.filters))]
            }
            TableCommand::SetDraftFilter { key, choice } => {
                self.require_filter(&key)?;
                vec![TableEvent::Panel(self.panel.set_draft(key, choice))]
            }
            TableCommand::ApplyFilterPanel => {
                let outcome = self.panel.apply(&mut self.filters);
                self.panel_committed(outcome)
            }
            TableCommand::ResetFilterPanel => {
                let outcome = self.panel.reset(&mut self.filters);
                self.panel_committed(outcome)
            }
            TableCommand::CloseFilterPanel => vec![TableEvent::Panel(self.panel.close())],
        };
        Ok(events)
    }

    /// Filtered and sorted rows across every page.
    pub fn filtered_sorted(&self) -> Result<Vec<&R>> {
        let filtered = apply_filters(&self.records, &self.schema, &self.tab, &self.filters);
        apply_sort(filtered, &self.schema, &self.sort)
    }

    pub fn project(&mut self) -> Result<TableProjection<'_, R>> {
        self.options.refresh(self.generation, &self.records, &self.schema);
        let sorted = self.filtered_sorted()?;
        let total_filtered = sorted.len();
        Ok(TableProjection {
            rows: paginate(&sorted, self.page).to_vec(),
            page: self.page,
            total_filtered,
            total_pages: total_pages(total_filtered, self.page.size()),
            applied_filter_count: count_applied_filters(&self.filters),
            options: self.options.all(),
        })
    }

    pub fn options(&mut self, key: &str) -> &[String] {
        self.options.refresh(self.generation, &self.records, &self.schema);
        self.options.get(key)
    }

    fn require_filter(&self, key: &str) -> Result<()> {
        if !self.schema.is_filter(key) {
            bail!(
                "unknown filter {key:?} for table {:?}; filterable keys: {}",
                self.schema.name(),
                self.schema.filter_keys().join(", ")
            );
        }
        Ok(())
    }

    fn page_ids(&self) -> Result<Vec<String>> {
        let sorted = self.filtered_sorted()?;
        Ok(paginate(&sorted, self.page)
            .iter()
            .map(|record| record.record_id().to_owned())
            .collect())
    }

    fn panel_committed(&mut self, outcome: PanelOutcome) -> Vec<TableEvent> {
        let mut events = vec![TableEvent::Panel(outcome)];
        if matches!(
            outcome,
            PanelOutcome::Applied | PanelOutcome::ResetAndApplied
        ) {
            events.extend(self.filters_mutated());
        }
        events
    }

    fn filters_mutated(&mut self) -> Vec<TableEvent> {
        let mut events = vec![TableEvent::FiltersChanged {
            applied: count_applied_filters(&self.filters),
        }];
        events.extend(self.reset_page_and_selection());
        events
    }

    fn reset_page_and_selection(&mut self) -> Vec<TableEvent> {
        let mut events = Vec::new();
        if self.page.number() != 1 {
            debug!(
                table = self.schema.name(),
                from = self.page.number(),
                "filtered set changed; back to page 1"
            );
            self.page = self.page.with_number(1);
            events.push(TableEvent::PageChanged(1));
        }
        events.extend(self.clear_selection());
        events
    }

    fn clear_selection(&mut self) -> Option<TableEvent> {
        if self.selection.is_empty() {
            return None;
        }
        self.selection.clear();
        Some(TableEvent::SelectionCleared)
    }
}
