use thiserror::Error;

use crate::ids::QuestionId;

/// Errors raised by catalog construction and metadata lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The id is neither a single-choice nor a multi-choice question.
    #[error("question {0} is not classified as single or multiple choice")]
    UnclassifiedQuestion(QuestionId),

    #[error("section references unknown question {0}")]
    UnknownQuestion(QuestionId),

    #[error("no question or alternative has id {0}")]
    UnknownId(QuestionId),

    #[error("question {question} references unknown alternative {alternative}")]
    UnknownAlternative {
        question: QuestionId,
        alternative: QuestionId,
    },

    #[error("alternative {alternative} is listed by both question {first} and question {second}")]
    SharedAlternative {
        alternative: QuestionId,
        first: QuestionId,
        second: QuestionId,
    },

    #[error("alternative {0} belongs to no multiple choice question")]
    OrphanAlternative(QuestionId),

    #[error("id {0} is registered more than once")]
    DuplicateQuestion(QuestionId),

    #[error("question {0} is classified as both single and multiple choice")]
    ConflictingKind(QuestionId),

    #[error("multiple choice question {0} has no alternatives")]
    EmptyAlternatives(QuestionId),

    #[error("question {0} is not a multiple choice question")]
    NotMultipleChoice(QuestionId),

    #[error("question {0} is not a single choice question")]
    NotSingleChoice(QuestionId),

    #[error("no question has the text '{0}'")]
    TextNotFound(String),

    /// Several questions share the same display text.
    #[error("text '{text}' matches several questions: {}", join_ids(candidates))]
    AmbiguousText {
        text: String,
        candidates: Vec<QuestionId>,
    },

    #[error("unknown questionnaire section '{0}'")]
    UnknownSection(String),

    #[error("duplicate questionnaire section '{0}'")]
    DuplicateSection(String),

    #[error("invalid column key '{value}' for id {id}")]
    InvalidColumn { id: QuestionId, value: String },
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ModelError>;
