// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use dealerdesk_table::TableEvent;

use crate::ScreenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_screen: ScreenKind,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_screen: ScreenKind::Products,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    NextScreen,
    PrevScreen,
    SelectScreen(ScreenKind),
    /// Surface the outcome of a table action on the status line.
    ReportTable(Vec<TableEvent>),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScreenChanged(ScreenKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::SelectScreen(screen) => {
                if screen == self.active_screen {
                    return Vec::new();
                }
                self.active_screen = screen;
                vec![
                    AppEvent::ScreenChanged(screen),
                    self.set_status(screen.label()),
                ]
            }
            AppCommand::ReportTable(events) => match events.last() {
                Some(event) => vec![self.set_status(&event.message())],
                None => Vec::new(),
            },
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = ScreenKind::ALL;
        let current = screens
            .iter()
            .position(|screen| *screen == self.active_screen)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(screens.len() as isize) as usize;
        self.active_screen = screens[next];
        vec![AppEvent::ScreenChanged(self.active_screen)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
