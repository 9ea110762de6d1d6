//! History storage trait and pure update helpers.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when reading or writing the history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistent storage for the ids of already posted submissions.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read the persisted ids, oldest first.
    ///
    /// A store that has never been written returns an empty list.
    async fn load(&self) -> Result<Vec<String>, HistoryError>;

    /// Replace the persisted ids.
    async fn save(&self, history: &[String]) -> Result<(), HistoryError>;
}

/// Append `id` and drop the oldest entries until at most `capacity` remain.
pub fn append_and_trim(history: &[String], id: &str, capacity: usize) -> Vec<String> {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.extend_from_slice(history);
    next.push(id.to_string());
    trim(&next, capacity)
}

/// Keep only the newest `capacity` entries.
pub fn trim(history: &[String], capacity: usize) -> Vec<String> {
    let skip = history.len().saturating_sub(capacity);
    history[skip..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_append_under_capacity() {
        let history = ids(&["a", "b"]);
        assert_eq!(append_and_trim(&history, "c", 5), ids(&["a", "b", "c"]));
    }

    #[test]
    fn test_append_drops_oldest_when_full() {
        let history = ids(&["a", "b", "c"]);
        assert_eq!(append_and_trim(&history, "d", 3), ids(&["b", "c", "d"]));
    }

    #[test]
    fn test_append_trims_oversized_history() {
        // Capacity lowered since the file was written
        let history = ids(&["a", "b", "c", "d", "e"]);
        assert_eq!(append_and_trim(&history, "f", 2), ids(&["e", "f"]));
    }

    #[test]
    fn test_append_does_not_mutate_input() {
        let history = ids(&["a"]);
        let _ = append_and_trim(&history, "b", 1);
        assert_eq!(history, ids(&["a"]));
    }

    #[test]
    fn test_append_result_is_suffix_of_extended_history() {
        let mut history: Vec<String> = Vec::new();
        for capacity in 1..6 {
            for n in 0..12 {
                let id = format!("id-{}", n);
                let mut extended = history.clone();
                extended.push(id.clone());

                let next = append_and_trim(&history, &id, capacity);
                let expected_len = (history.len() + 1).min(capacity);
                assert_eq!(next.len(), expected_len);
                assert!(next.len() <= capacity);
                assert_eq!(next[..], extended[extended.len() - expected_len..]);
                history = next;
            }
        }
    }

    #[test]
    fn test_trim_noop_when_within_capacity() {
        let history = ids(&["a", "b"]);
        assert_eq!(trim(&history, 2), history);
        assert_eq!(trim(&history, 10), history);
    }

    #[test]
    fn test_trim_empty() {
        assert!(trim(&[], 3).is_empty());
    }
}
