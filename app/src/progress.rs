use ruocden_core::{CompletionRecord, ProgressStore, RevealMask};

use crate::storage::{Storage, StorageError};

const HISTORY_KEY: &str = "ruocden:history";

fn progress_key(puzzle_id: &str) -> String {
    format!("ruocden:progress:{puzzle_id}")
}

/// Progress store persisted through a [`Storage`] substrate.
///
/// Failures are logged and swallowed: this is a best-effort mirror of
/// session state and must never interrupt play. Unreadable or wrong-length
/// saved masks count as no saved progress.
#[derive(Clone, Debug, Default)]
pub struct DurableProgress<S> {
    storage: S,
}

impl<S> DurableProgress<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: Storage> ProgressStore for DurableProgress<S> {
    fn load_mask(&self, puzzle_id: &str, expected_len: usize) -> Option<RevealMask> {
        let mask: RevealMask = match self.storage.get(&progress_key(puzzle_id)) {
            Ok(mask) => mask,
            Err(StorageError::KeyNotFound(_)) => return None,
            Err(err) => {
                log::warn!("discarding saved progress for {puzzle_id:?}: {err}");
                return None;
            }
        };
        if mask.len() != expected_len {
            log::warn!(
                "discarding saved progress for {puzzle_id:?}: {} pieces saved, {expected_len} expected",
                mask.len()
            );
            return None;
        }
        Some(mask)
    }

    fn save_mask(&mut self, puzzle_id: &str, mask: &RevealMask) {
        if let Err(err) = self.storage.set(&progress_key(puzzle_id), mask) {
            log::error!("could not save progress for {puzzle_id:?}: {err}");
        }
    }

    fn clear_mask(&mut self, puzzle_id: &str) {
        self.storage.delete(&progress_key(puzzle_id));
    }

    fn append_completion(&mut self, record: CompletionRecord) {
        let mut history = self.completions();
        if history
            .iter()
            .any(|entry| entry.puzzle_id == record.puzzle_id)
        {
            return;
        }
        history.push(record);
        if let Err(err) = self.storage.set(HISTORY_KEY, &history) {
            log::error!("could not save completion history: {err}");
        }
    }

    fn completions(&self) -> Vec<CompletionRecord> {
        match self.storage.get(HISTORY_KEY) {
            Ok(history) => history,
            Err(StorageError::KeyNotFound(_)) => Vec::new(),
            Err(err) => {
                log::warn!("discarding completion history: {err}");
                Vec::new()
            }
        }
    }

    fn clear_completions(&mut self) {
        self.storage.delete(HISTORY_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{DateTime, Utc};

    fn progress() -> DurableProgress<MemoryStorage> {
        DurableProgress::new(MemoryStorage::new())
    }

    fn record(puzzle_id: &str, millis: i64) -> CompletionRecord {
        CompletionRecord {
            puzzle_id: puzzle_id.to_string(),
            name: "Đèn lồng Trung Thu".to_string(),
            completed_at: DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[test]
    fn mask_round_trips_through_storage() {
        let mut progress = progress();
        let mut mask = RevealMask::new(9);
        mask.reveal(0);
        mask.reveal(8);

        progress.save_mask("default-puzzle-1", &mask);

        assert_eq!(progress.load_mask("default-puzzle-1", 9), Some(mask));
        assert_eq!(progress.load_mask("default-puzzle-1", 5), None);
        assert_eq!(progress.load_mask("other", 9), None);

        progress.clear_mask("default-puzzle-1");
        assert_eq!(progress.load_mask("default-puzzle-1", 9), None);
    }

    #[test]
    fn unreadable_saved_progress_counts_as_none() {
        let mut progress = progress();
        progress
            .storage
            .set("ruocden:progress:default-puzzle-1", &"oops")
            .unwrap();

        assert_eq!(progress.load_mask("default-puzzle-1", 9), None);
    }

    #[test]
    fn history_appends_and_deduplicates() {
        let mut progress = progress();
        progress.append_completion(record("puzzle-1", 0));
        progress.append_completion(record("puzzle-2", 60_000));
        progress.append_completion(record("puzzle-1", 120_000));

        let history = progress.completions();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], record("puzzle-1", 0));

        progress.clear_completions();
        assert!(progress.completions().is_empty());
    }

    #[test]
    fn history_wire_format_matches_persisted_record() {
        let mut progress = progress();
        progress.append_completion(record("puzzle-1", 0));

        let raw: serde_json::Value = progress.storage().get("ruocden:history").unwrap();
        assert_eq!(
            raw,
            serde_json::json!([{
                "id": "puzzle-1",
                "name": "Đèn lồng Trung Thu",
                "completedAt": "1970-01-01T00:00:00Z",
            }])
        );
    }
}
