use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Newest-first log of rendered notices, bounded to `capacity` entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageLog {
    capacity: usize,
    entries: VecDeque<String>,
    #[serde(default)]
    pushed: u64,
}

impl MessageLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            pushed: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(self.capacity);
        self.pushed += 1;
    }

    /// Number of entries ever pushed, including dropped ones.
    pub fn total_pushed(&self) -> u64 {
        self.pushed
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_is_first() {
        let mut log = MessageLog::with_capacity(5);
        log.push("a");
        log.push("b");
        assert_eq!(log.latest(), Some("b"));
        assert_eq!(log.to_vec(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn oldest_entries_are_dropped() {
        let mut log = MessageLog::with_capacity(5);
        for idx in 0..8 {
            log.push(format!("m{idx}"));
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.total_pushed(), 8);
        let entries: Vec<&str> = log.iter().collect();
        assert_eq!(entries, vec!["m7", "m6", "m5", "m4", "m3"]);
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let mut log = MessageLog::with_capacity(0);
        log.push("x");
        log.push("y");
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.to_vec(), vec!["y".to_string()]);
    }
}
