// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// A search query whose quiet period elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommit {
    pub token: u64,
    pub query: String,
}

/// Debounces keystrokes into a single search commit.
///
/// Every keystroke bumps the token; only the commit carrying the newest token
/// is accepted. Cancelling (or dropping the debouncer) bumps the token once
/// more so timers still in flight land as stale.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    token: u64,
    tx: Sender<SearchCommit>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration, tx: Sender<SearchCommit>) -> Self {
        Self { delay, token: 0, tx }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, query: impl Into<String>) -> u64 {
        self.token = self.token.saturating_add(1);
        let commit = SearchCommit {
            token: self.token,
            query: query.into(),
        };
        let sender = self.tx.clone();
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = sender.send(commit);
        });
        self.token
    }

    /// The query to commit, or `None` when a newer keystroke or a cancel
    /// superseded it.
    pub fn accept(&self, commit: SearchCommit) -> Option<String> {
        if commit.token == self.token {
            Some(commit.query)
        } else {
            debug!(
                token = commit.token,
                current = self.token,
                "dropping stale search commit"
            );
            None
        }
    }

    pub fn cancel(&mut self) {
        self.token = self.token.saturating_add(1);
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchCommit, SearchDebouncer};
    use std::sync::mpsc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn only_latest_keystroke_commits() {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(5), tx);

        debouncer.schedule("ho");
        debouncer.schedule("hon");
        let latest = debouncer.schedule("honda");

        let mut accepted = Vec::new();
        for _ in 0..3 {
            let commit = rx.recv_timeout(WAIT).expect("timer should fire");
            if let Some(query) = debouncer.accept(commit) {
                accepted.push(query);
            }
        }
        assert_eq!(latest, 3);
        assert_eq!(accepted, vec!["honda".to_owned()]);
    }

    #[test]
    fn cancel_discards_pending_commit() {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(5), tx);

        debouncer.schedule("scooter");
        debouncer.cancel();

        let commit = rx.recv_timeout(WAIT).expect("timer should fire");
        assert_eq!(debouncer.accept(commit), None);
    }

    #[test]
    fn stale_token_is_rejected_without_timers() {
        let (tx, _rx) = mpsc::channel();
        let debouncer = SearchDebouncer::new(Duration::from_millis(500), tx);
        let stale = SearchCommit {
            token: 7,
            query: "bolt".to_owned(),
        };
        assert_eq!(debouncer.accept(stale), None);
        assert_eq!(debouncer.delay(), Duration::from_millis(500));
    }
}
