use thiserror::Error;

/// Authoring mistakes caught on the editing surface, before a definition
/// reaches players. Sessions tolerate any definition without panicking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("puzzle id is empty")]
    EmptyId,
    #[error("target name normalizes to the empty string")]
    EmptyTargetName,
    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },
    #[error("question {index} has no accepted answers")]
    NoAcceptedAnswers { index: usize },
    #[error("question {index} accepts an answer that normalizes to the empty string")]
    BlankAcceptedAnswer { index: usize },
}
