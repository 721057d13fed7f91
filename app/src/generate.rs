use ruocden_core::{PuzzleDefinition, Question, normalize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::QUESTIONS_PER_PUZZLE;

/// User-displayable failure from the question generator. Shown on the
/// editing surface only; never routed into a live session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct GenerateError(pub String);

/// One generated question/answer-set pair. Field names match the generator
/// wire format (`q`/`a`). Generators are asked to return answers already
/// uppercased and accent-stripped, but nothing depends on it: answer
/// comparison normalizes both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(rename = "q")]
    pub prompt: String,
    #[serde(rename = "a")]
    pub accepted_answers: Vec<String>,
}

/// External text-generation capability: a theme in, a full question set out,
/// or a displayable error.
pub trait QuestionGenerator {
    fn generate(&self, theme: &str) -> Result<Vec<GeneratedQuestion>, GenerateError>;
}

/// Installs a generated set into a definition, ids assigned by position.
///
/// An incomplete set (wrong count) or unusable content (blank prompts or
/// answers) is rejected without touching the definition.
pub fn apply_generated(
    puzzle: &mut PuzzleDefinition,
    generated: Vec<GeneratedQuestion>,
) -> Result<(), GenerateError> {
    if generated.len() != QUESTIONS_PER_PUZZLE {
        return Err(GenerateError(
            "AI không trả về đủ số lượng câu hỏi như mong đợi.".to_string(),
        ));
    }
    let usable = generated.iter().all(|question| {
        !question.prompt.trim().is_empty()
            && !question.accepted_answers.is_empty()
            && question
                .accepted_answers
                .iter()
                .all(|answer| !normalize(answer).is_empty())
    });
    if !usable {
        return Err(GenerateError(
            "Tạo câu hỏi thất bại. Vui lòng kiểm tra lại chủ đề hoặc thử lại sau.".to_string(),
        ));
    }

    puzzle.questions = generated
        .into_iter()
        .enumerate()
        .map(|(index, question)| Question {
            id: index as u32,
            prompt: question.prompt,
            accepted_answers: question.accepted_answers,
            hint: None,
        })
        .collect();
    Ok(())
}
