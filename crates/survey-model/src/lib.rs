//! Survey question metadata.
//!
//! Every survey column is addressed through a [`QuestionId`]. The
//! [`QuestionCatalog`] classifies questions as single or multiple choice,
//! registers their display texts, groups multi-choice alternatives and
//! organises questions into questionnaire sections.

pub mod catalog;
pub mod error;
pub mod ids;
pub mod question;

pub use catalog::{CatalogBuilder, QuestionCatalog};
pub use error::{ModelError, Result};
pub use ids::{ColumnKey, QuestionId};
pub use question::{Alternative, Question, QuestionKind, Section};
