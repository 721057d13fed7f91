use chrono::{DateTime, Utc};

use crate::answer::normalize;
use crate::mask::RevealMask;
use crate::puzzle::{PuzzleDefinition, Question};
use crate::store::{CompletionRecord, ProgressStore};

/// Minimum revealed pieces before a final guess may be attempted. Forces
/// engagement with the question flow while still allowing early guesses once
/// a meaningful fraction of the image is visible.
pub const FINAL_GUESS_MIN_REVEALED: usize = 3;

/// Never persisted: a session is rebuilt from the saved mask alone, so a
/// reload always comes back `Idle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Asking(usize),
    Won,
}

impl SessionState {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }

    pub const fn asking(self) -> Option<usize> {
        match self {
            Self::Asking(index) => Some(index),
            _ => None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Opened)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnswerOutcome {
    NoChange,
    Incorrect,
    Revealed,
    /// The reveal completed the mask.
    AllRevealed,
}

impl AnswerOutcome {
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Revealed | Self::AllRevealed)
    }

    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    NoChange,
    Incorrect,
    Won,
}

impl GuessOutcome {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// In-memory state of one active puzzle.
///
/// Owns the reveal mask and win state exclusively; the injected store is a
/// best-effort mirror, restored at construction and rewritten on every mask
/// mutation. Operations run synchronously to completion and invalid ones are
/// silent no-ops, so a single live session serializes all state changes.
#[derive(Clone, Debug)]
pub struct PuzzleSession<S> {
    puzzle: PuzzleDefinition,
    mask: RevealMask,
    state: SessionState,
    store: S,
}

impl<S: ProgressStore> PuzzleSession<S> {
    /// Opens `puzzle`, restoring saved progress when a mask of the right
    /// length exists in the store.
    pub fn new(puzzle: PuzzleDefinition, store: S) -> Self {
        let mask = store
            .load_mask(&puzzle.id, puzzle.questions.len())
            .unwrap_or_else(|| RevealMask::new(puzzle.questions.len()));
        Self {
            puzzle,
            mask,
            state: SessionState::Idle,
            store,
        }
    }

    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mask(&self) -> &RevealMask {
        &self.mask
    }

    pub fn revealed_count(&self) -> usize {
        self.mask.revealed_count()
    }

    pub fn question_count(&self) -> usize {
        self.puzzle.questions.len()
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.state
            .asking()
            .and_then(|index| self.puzzle.questions.get(index))
    }

    pub fn can_final_guess(&self) -> bool {
        !self.state.is_won() && self.revealed_count() >= FINAL_GUESS_MIN_REVEALED
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Opens the question behind an unrevealed piece. Revealed, out-of-range,
    /// already-asking, and won states are silent no-ops.
    pub fn open_question(&mut self, index: usize) -> OpenOutcome {
        if self.state != SessionState::Idle
            || index >= self.puzzle.questions.len()
            || self.mask.is_revealed(index)
        {
            return OpenOutcome::NoChange;
        }

        log::debug!("open question {index}");
        self.state = SessionState::Asking(index);
        OpenOutcome::Opened
    }

    /// Resolves the open question against `raw`. The question closes either
    /// way; an incorrect answer leaves the mask untouched so the piece can be
    /// reopened and retried later.
    pub fn submit_answer(&mut self, raw: &str) -> AnswerOutcome {
        let SessionState::Asking(index) = self.state else {
            return AnswerOutcome::NoChange;
        };
        self.state = SessionState::Idle;

        let Some(question) = self.puzzle.questions.get(index) else {
            return AnswerOutcome::NoChange;
        };

        let submitted = normalize(raw);
        let correct = question
            .accepted_answers
            .iter()
            .any(|accepted| normalize(accepted) == submitted);
        if !correct {
            log::debug!("incorrect answer for question {index}");
            return AnswerOutcome::Incorrect;
        }

        self.mask.reveal(index);
        self.store.save_mask(&self.puzzle.id, &self.mask);

        if self.mask.all_revealed() {
            log::debug!("all {} pieces revealed", self.mask.len());
            AnswerOutcome::AllRevealed
        } else {
            AnswerOutcome::Revealed
        }
    }

    /// First unrevealed index in grid order; `None` once every question has
    /// been answered. Never mutates.
    pub fn next_unsolved(&self) -> Option<usize> {
        self.mask.first_unrevealed()
    }

    /// Attempts to name the image. Gated until [`FINAL_GUESS_MIN_REVEALED`]
    /// pieces are revealed; winning is terminal until [`PuzzleSession::reset`].
    /// A win clears saved progress (superseded by completion) and appends a
    /// completion record stamped with the caller-supplied `now`.
    pub fn final_guess(&mut self, name_guess: &str, now: DateTime<Utc>) -> GuessOutcome {
        if self.state.is_won() || self.revealed_count() < FINAL_GUESS_MIN_REVEALED {
            return GuessOutcome::NoChange;
        }
        if normalize(name_guess) != normalize(&self.puzzle.target_name) {
            return GuessOutcome::Incorrect;
        }

        log::debug!("puzzle {:?} solved", self.puzzle.id);
        self.state = SessionState::Won;
        self.store.clear_mask(&self.puzzle.id);
        self.store.append_completion(CompletionRecord {
            puzzle_id: self.puzzle.id.clone(),
            name: self.puzzle.target_name.clone(),
            completed_at: now,
        });
        GuessOutcome::Won
    }

    /// Returns the puzzle to a fresh state and clears saved progress.
    /// Completion history is a permanent log and survives resets.
    pub fn reset(&mut self) {
        self.mask.clear();
        self.store.clear_mask(&self.puzzle.id);
        self.state = SessionState::Idle;
    }
}
