use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::answer::normalize;
use crate::error::DefinitionError;

/// One trivia question bound to a grid piece. Immutable once a session has
/// loaded its definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Positional id assigned by the editing surface or the generator.
    pub id: u32,
    pub prompt: String,
    /// Accepted variants as authored; comparison normalizes both sides, so
    /// these need not be pre-normalized.
    pub accepted_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A curated puzzle: the hidden image, its name and meaning, and one
/// question per grid piece. Owned by the editing surface; sessions only
/// read it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// Unique and stable across sessions; progress and history key off it.
    pub id: String,
    pub image_ref: String,
    pub theme_hint: String,
    pub target_name: String,
    pub target_meaning: String,
    /// Grid size is defined as `questions.len()`, conventionally 9.
    pub questions: Vec<Question>,
}

impl PuzzleDefinition {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Editing-surface validation. A blank-normalizing accepted answer is
    /// rejected because it would make the countdown's synthesized empty
    /// submission count as correct.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        if normalize(&self.target_name).is_empty() {
            return Err(DefinitionError::EmptyTargetName);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(DefinitionError::EmptyPrompt { index });
            }
            if question.accepted_answers.is_empty() {
                return Err(DefinitionError::NoAcceptedAnswers { index });
            }
            if question
                .accepted_answers
                .iter()
                .any(|accepted| normalize(accepted).is_empty())
            {
                return Err(DefinitionError::BlankAcceptedAnswer { index });
            }
        }
        Ok(())
    }
}
