use polars::prelude::PolarsError;
use survey_model::{ModelError, QuestionId};
use thiserror::Error;

/// Errors surfaced to the user when an analysis cannot be computed.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Both axes of a bivariate analysis refer to the same question.
    #[error("please select two different questions (both axes are question {0})")]
    IdenticalQuestions(QuestionId),

    /// Multi-choice against multi-choice has no defined semantics.
    #[error(
        "comparing two multiple choice questions ({first} and {second}) is not supported yet"
    )]
    UnsupportedCombination {
        first: QuestionId,
        second: QuestionId,
    },

    #[error("column '{column}' is missing from the response table")]
    MissingColumn { column: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl AggregateError {
    /// True for errors that are informational notices rather than failures.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::UnsupportedCombination { .. })
    }
}

impl From<PolarsError> for AggregateError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
