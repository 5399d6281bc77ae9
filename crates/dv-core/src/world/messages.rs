//! Message log
//!
//! `current` holds what the last resolved command produced; `history` is the
//! bounded scrollback the presentation layer can page through.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::MESSAGE_HISTORY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    current: Vec<String>,
    history: VecDeque<String>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(MESSAGE_HISTORY)
    }
}

impl MessageLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Vec::new(),
            history: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        self.current.push(msg.clone());
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(msg);
    }

    /// Start a new command's batch of messages
    pub fn clear_current(&mut self) {
        self.current.clear();
    }

    pub fn current(&self) -> &[String] {
        &self.current
    }

    pub fn history(&self) -> impl Iterator<Item = &String> {
        self.history.iter()
    }

    pub fn last(&self) -> Option<&str> {
        self.history.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// True if any message in the current batch contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.current.iter().any(|m| m.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut log = MessageLog::with_capacity(3);
        for i in 0..5 {
            log.push(format!("msg {}", i));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.history().next().map(String::as_str), Some("msg 2"));
        assert_eq!(log.last(), Some("msg 4"));
        assert_eq!(log.current().len(), 5);
    }

    #[test]
    fn test_clear_current_keeps_history() {
        let mut log = MessageLog::default();
        log.push("You wait...");
        log.clear_current();
        assert!(log.current().is_empty());
        assert_eq!(log.len(), 1);
        assert!(!log.contains("wait"));
    }
}
