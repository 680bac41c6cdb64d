//! Question, alternative and section records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{ColumnKey, QuestionId};

/// Question type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// One column, one value per respondent.
    Single,
    /// One 0/1 indicator column per alternative.
    Multiple,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable alternative of a multi-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: QuestionId,
    pub column: ColumnKey,
    pub text: String,
}

/// A logical survey question.
///
/// Single-choice questions carry the column holding the answer. Multi-choice
/// questions have no column of their own; they are answered through the
/// columns of their alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
    /// `None` for multi-choice questions.
    pub column: Option<ColumnKey>,
    /// Alternative ids in questionnaire order. Empty for single choice.
    pub alternatives: Vec<QuestionId>,
}

impl Question {
    pub fn is_single(&self) -> bool {
        self.kind == QuestionKind::Single
    }

    pub fn is_multiple(&self) -> bool {
        self.kind == QuestionKind::Multiple
    }
}

/// Named group of questions used to populate selection menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub questions: Vec<QuestionId>,
}
