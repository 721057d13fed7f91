use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mask::RevealMask;

/// Permanent log entry marking a puzzle as solved. Independent of reveal
/// progress: it survives resets and replays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    #[serde(rename = "id")]
    pub puzzle_id: String,
    pub name: String,
    #[serde(rename = "completedAt")]
    pub completed_at: DateTime<Utc>,
}

/// Durable home for reveal progress and completion history.
///
/// The session treats the store as a best-effort mirror of its in-memory
/// state: the write signatures are infallible, implementations log failures
/// and carry on, and gameplay never blocks on persistence.
pub trait ProgressStore {
    /// Returns a saved mask only when its length matches `expected_len`;
    /// anything else counts as no valid saved progress.
    fn load_mask(&self, puzzle_id: &str, expected_len: usize) -> Option<RevealMask>;

    fn save_mask(&mut self, puzzle_id: &str, mask: &RevealMask);

    fn clear_mask(&mut self, puzzle_id: &str);

    /// Appends unless a record for the same puzzle already exists.
    fn append_completion(&mut self, record: CompletionRecord);

    /// Unspecified order; display layers sort by completion time.
    fn completions(&self) -> Vec<CompletionRecord>;

    fn clear_completions(&mut self);
}

/// In-memory store: the test double, and the fallback that keeps the game
/// playable when durable storage is unavailable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    masks: BTreeMap<String, RevealMask>,
    history: Vec<CompletionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load_mask(&self, puzzle_id: &str, expected_len: usize) -> Option<RevealMask> {
        self.masks
            .get(puzzle_id)
            .filter(|mask| mask.len() == expected_len)
            .cloned()
    }

    fn save_mask(&mut self, puzzle_id: &str, mask: &RevealMask) {
        self.masks.insert(String::from(puzzle_id), mask.clone());
    }

    fn clear_mask(&mut self, puzzle_id: &str) {
        self.masks.remove(puzzle_id);
    }

    fn append_completion(&mut self, record: CompletionRecord) {
        if self
            .history
            .iter()
            .any(|entry| entry.puzzle_id == record.puzzle_id)
        {
            return;
        }
        self.history.push(record);
    }

    fn completions(&self) -> Vec<CompletionRecord> {
        self.history.clone()
    }

    fn clear_completions(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn record(puzzle_id: &str, millis: i64) -> CompletionRecord {
        CompletionRecord {
            puzzle_id: puzzle_id.to_string(),
            name: "Đèn lồng Trung Thu".to_string(),
            completed_at: DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[test]
    fn load_mask_rejects_length_mismatch() {
        let mut store = MemoryStore::new();
        let mut mask = RevealMask::new(5);
        mask.reveal(2);
        store.save_mask("puzzle-1", &mask);

        assert_eq!(store.load_mask("puzzle-1", 9), None);
        assert_eq!(store.load_mask("puzzle-1", 5), Some(mask));
        assert_eq!(store.load_mask("puzzle-2", 5), None);
    }

    #[test]
    fn clear_mask_forgets_progress() {
        let mut store = MemoryStore::new();
        store.save_mask("puzzle-1", &RevealMask::new(3));

        store.clear_mask("puzzle-1");

        assert_eq!(store.load_mask("puzzle-1", 3), None);
    }

    #[test]
    fn completions_are_deduplicated_by_puzzle_id() {
        let mut store = MemoryStore::new();
        store.append_completion(record("puzzle-1", 0));
        store.append_completion(record("puzzle-1", 60_000));
        store.append_completion(record("puzzle-2", 30_000));

        let completions = store.completions();
        assert_eq!(completions.len(), 2);
        // The first entry wins; a later duplicate never overwrites it.
        assert_eq!(completions[0], record("puzzle-1", 0));

        store.clear_completions();
        assert!(store.completions().is_empty());
    }

    #[test]
    fn completion_wire_format_uses_iso_8601() {
        let value = serde_json::to_value(record("puzzle-1", 0)).unwrap();

        assert_eq!(value["id"], "puzzle-1");
        assert_eq!(value["name"], "Đèn lồng Trung Thu");
        assert_eq!(value["completedAt"], "1970-01-01T00:00:00Z");
    }
}
