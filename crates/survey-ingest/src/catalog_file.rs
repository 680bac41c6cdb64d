//! TOML question catalog.
//!
//! ```toml
//! [[question]]
//! id = 1
//! kind = "single"
//! column = "P1_a"
//! text = "Idade"
//!
//! [[question]]
//! id = 10
//! kind = "multiple"
//! text = "Quais linguagens você utiliza?"
//! alternatives = [11, 12]
//!
//! [[alternative]]
//! id = 11
//! column = "P4_d_1"
//! text = "Python"
//!
//! [[section]]
//! key = "P1"
//! title = "Dados demográficos"
//! questions = [1]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use survey_model::{QuestionCatalog, QuestionId, QuestionKind};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "question")]
    pub questions: Vec<QuestionEntry>,
    #[serde(default, rename = "alternative")]
    pub alternatives: Vec<AlternativeEntry>,
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<QuestionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeEntry {
    pub id: QuestionId,
    pub column: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuestionId>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> survey_model::Result<QuestionCatalog> {
        let mut builder = QuestionCatalog::builder();
        for entry in self.questions {
            builder = match entry.kind {
                QuestionKind::Single => {
                    builder.single(entry.id, entry.column.unwrap_or_default(), entry.text)
                }
                QuestionKind::Multiple => {
                    if let Some(column) = entry.column {
                        warn!(
                            question = %entry.id,
                            column = %column,
                            "column ignored on multiple choice question"
                        );
                    }
                    builder.multiple(entry.id, entry.text, entry.alternatives)
                }
            };
        }
        for entry in self.alternatives {
            builder = builder.alternative(entry.id, entry.column, entry.text);
        }
        for entry in self.sections {
            builder = builder.section(entry.key, entry.title, entry.questions);
        }
        builder.build()
    }
}

/// Parses and validates catalog text. `path` is only used in error messages.
pub fn parse_catalog(contents: &str, path: &Path) -> Result<QuestionCatalog> {
    let file: CatalogFile = toml::from_str(contents).map_err(|e| IngestError::CatalogParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.into_catalog().map_err(|e| IngestError::Catalog {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn load_catalog(path: &Path) -> Result<QuestionCatalog> {
    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let catalog = parse_catalog(&contents, path)?;
    debug!(
        path = %path.display(),
        questions = catalog.len(),
        sections = catalog.sections().len(),
        "question catalog loaded"
    );
    Ok(catalog)
}
