//! Immutable question metadata.
//!
//! [`QuestionCatalog`] gathers the type classification, the text registry,
//! the multi-choice alternative grouping and the questionnaire sections into
//! one validated value. It is built once at startup and passed by reference
//! into every aggregation.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ModelError, Result};
use crate::ids::{ColumnKey, QuestionId};
use crate::question::{Alternative, Question, QuestionKind, Section};

#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: BTreeMap<QuestionId, Question>,
    alternatives: BTreeMap<QuestionId, Alternative>,
    sections: Vec<Section>,
}

impl QuestionCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions in id order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    /// Looks up a question.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnclassifiedQuestion`] when the id belongs to
    /// neither classification set (alternative ids included).
    pub fn question(&self, id: QuestionId) -> Result<&Question> {
        self.questions
            .get(&id)
            .ok_or(ModelError::UnclassifiedQuestion(id))
    }

    pub fn kind(&self, id: QuestionId) -> Result<QuestionKind> {
        self.question(id).map(|question| question.kind)
    }

    /// Display text of a question or of an alternative.
    pub fn text(&self, id: QuestionId) -> Result<&str> {
        if let Some(question) = self.questions.get(&id) {
            return Ok(&question.text);
        }
        self.alternatives
            .get(&id)
            .map(|alternative| alternative.text.as_str())
            .ok_or(ModelError::UnknownId(id))
    }

    /// Answer column of a single-choice question.
    pub fn single_column(&self, id: QuestionId) -> Result<&ColumnKey> {
        let question = self.question(id)?;
        match (&question.column, question.kind) {
            (Some(column), QuestionKind::Single) => Ok(column),
            _ => Err(ModelError::NotSingleChoice(id)),
        }
    }

    /// Alternatives of a multi-choice question, in questionnaire order.
    pub fn alternatives(&self, id: QuestionId) -> Result<Vec<&Alternative>> {
        let question = self.question(id)?;
        if !question.is_multiple() {
            return Err(ModelError::NotMultipleChoice(id));
        }
        question
            .alternatives
            .iter()
            .map(|alternative| {
                self.alternatives
                    .get(alternative)
                    .ok_or(ModelError::UnknownAlternative {
                        question: id,
                        alternative: *alternative,
                    })
            })
            .collect()
    }

    /// Every response-table column the catalog refers to.
    pub fn referenced_columns(&self) -> BTreeSet<&ColumnKey> {
        let mut columns: BTreeSet<&ColumnKey> = self
            .questions
            .values()
            .filter_map(|question| question.column.as_ref())
            .collect();
        columns.extend(self.alternatives.values().map(|alternative| &alternative.column));
        columns
    }

    /// Resolves a question by its exact display text.
    ///
    /// Alternatives are not searched. A text shared by several questions is
    /// rejected rather than resolved to the first match.
    pub fn find_by_text(&self, text: &str) -> Result<QuestionId> {
        let needle = text.trim();
        let candidates: Vec<QuestionId> = self
            .questions
            .values()
            .filter(|question| question.text.trim() == needle)
            .map(|question| question.id)
            .collect();
        match candidates.as_slice() {
            [] => Err(ModelError::TextNotFound(needle.to_string())),
            [id] => Ok(*id),
            _ => Err(ModelError::AmbiguousText {
                text: needle.to_string(),
                candidates,
            }),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Looks up a section by key, falling back to a case-insensitive title match.
    pub fn section(&self, key: &str) -> Result<&Section> {
        let key = key.trim();
        self.sections
            .iter()
            .find(|section| section.key == key)
            .or_else(|| {
                self.sections
                    .iter()
                    .find(|section| section.title.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| ModelError::UnknownSection(key.to_string()))
    }

    pub fn section_questions(&self, key: &str) -> Result<Vec<&Question>> {
        self.section(key)?
            .questions
            .iter()
            .map(|id| self.question(*id))
            .collect()
    }
}

/// Staging area for catalog entries; [`CatalogBuilder::build`] validates them.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    questions: Vec<PendingQuestion>,
    alternatives: Vec<PendingAlternative>,
    sections: Vec<Section>,
}

#[derive(Debug, Clone)]
struct PendingQuestion {
    id: QuestionId,
    text: String,
    kind: QuestionKind,
    column: Option<String>,
    alternatives: Vec<QuestionId>,
}

#[derive(Debug, Clone)]
struct PendingAlternative {
    id: QuestionId,
    column: String,
    text: String,
}

impl CatalogBuilder {
    #[must_use]
    pub fn single(
        mut self,
        id: impl Into<QuestionId>,
        column: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.questions.push(PendingQuestion {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::Single,
            column: Some(column.into()),
            alternatives: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn multiple<I, A>(
        mut self,
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        alternatives: I,
    ) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<QuestionId>,
    {
        self.questions.push(PendingQuestion {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::Multiple,
            column: None,
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[must_use]
    pub fn alternative(
        mut self,
        id: impl Into<QuestionId>,
        column: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.alternatives.push(PendingAlternative {
            id: id.into(),
            column: column.into(),
            text: text.into(),
        });
        self
    }

    #[must_use]
    pub fn section<I, Q>(
        mut self,
        key: impl Into<String>,
        title: impl Into<String>,
        questions: I,
    ) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QuestionId>,
    {
        self.sections.push(Section {
            key: key.into(),
            title: title.into(),
            questions: questions.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Validates the staged entries.
    ///
    /// # Errors
    ///
    /// Fails on duplicate or conflicting ids, blank column keys, multi-choice
    /// questions without (known) alternatives, alternatives owned by no
    /// question or by more than one, and sections that reference unknown
    /// questions or reuse a key.
    pub fn build(self) -> Result<QuestionCatalog> {
        let mut questions: BTreeMap<QuestionId, Question> = BTreeMap::new();
        for pending in self.questions {
            if let Some(existing) = questions.get(&pending.id) {
                return Err(if existing.kind == pending.kind {
                    ModelError::DuplicateQuestion(pending.id)
                } else {
                    ModelError::ConflictingKind(pending.id)
                });
            }
            let column = match (pending.kind, pending.column) {
                (QuestionKind::Single, Some(raw)) => Some(
                    ColumnKey::new(raw.clone()).ok_or(ModelError::InvalidColumn {
                        id: pending.id,
                        value: raw,
                    })?,
                ),
                (QuestionKind::Single, None) => {
                    return Err(ModelError::InvalidColumn {
                        id: pending.id,
                        value: String::new(),
                    });
                }
                (QuestionKind::Multiple, _) => None,
            };
            if pending.kind == QuestionKind::Multiple && pending.alternatives.is_empty() {
                return Err(ModelError::EmptyAlternatives(pending.id));
            }
            questions.insert(
                pending.id,
                Question {
                    id: pending.id,
                    text: pending.text,
                    kind: pending.kind,
                    column,
                    alternatives: pending.alternatives,
                },
            );
        }

        let mut alternatives: BTreeMap<QuestionId, Alternative> = BTreeMap::new();
        for pending in self.alternatives {
            if questions.contains_key(&pending.id) || alternatives.contains_key(&pending.id) {
                return Err(ModelError::DuplicateQuestion(pending.id));
            }
            let column = ColumnKey::new(pending.column.clone()).ok_or(ModelError::InvalidColumn {
                id: pending.id,
                value: pending.column,
            })?;
            alternatives.insert(
                pending.id,
                Alternative {
                    id: pending.id,
                    column,
                    text: pending.text,
                },
            );
        }

        let mut owners: BTreeMap<QuestionId, QuestionId> = BTreeMap::new();
        for question in questions.values() {
            for alternative in &question.alternatives {
                if !alternatives.contains_key(alternative) {
                    return Err(ModelError::UnknownAlternative {
                        question: question.id,
                        alternative: *alternative,
                    });
                }
                if let Some(&first) = owners.get(alternative) {
                    return Err(ModelError::SharedAlternative {
                        alternative: *alternative,
                        first,
                        second: question.id,
                    });
                }
                owners.insert(*alternative, question.id);
            }
        }
        if let Some(orphan) = alternatives.keys().find(|id| !owners.contains_key(id)) {
            return Err(ModelError::OrphanAlternative(*orphan));
        }

        let mut keys = BTreeSet::new();
        for section in &self.sections {
            if !keys.insert(section.key.as_str()) {
                return Err(ModelError::DuplicateSection(section.key.clone()));
            }
            if let Some(missing) = section
                .questions
                .iter()
                .find(|id| !questions.contains_key(id))
            {
                return Err(ModelError::UnknownQuestion(*missing));
            }
        }

        Ok(QuestionCatalog {
            questions,
            alternatives,
            sections: self.sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::builder()
            .single(0u32, "P1_a", "Idade")
            .single(1u32, "P1_b", "Gênero")
            .multiple(2u32, "Linguagens utilizadas", [3u32, 4])
            .alternative(3u32, "P4_d_1", "Python")
            .alternative(4u32, "P4_d_2", "SQL")
            .section("P1", "Dados demográficos", [0u32, 1])
            .section("P4", "Conhecimentos", [2u32])
            .build()
            .expect("valid catalog")
    }

    #[test]
    fn kind_lookup_rejects_alternatives() {
        let catalog = catalog();
        assert_eq!(catalog.kind(QuestionId::new(2)), Ok(QuestionKind::Multiple));
        assert_eq!(
            catalog.kind(QuestionId::new(3)),
            Err(ModelError::UnclassifiedQuestion(QuestionId::new(3)))
        );
    }

    #[test]
    fn text_covers_alternatives() {
        let catalog = catalog();
        assert_eq!(catalog.text(QuestionId::new(4)), Ok("SQL"));
        let missing = catalog.text(QuestionId::new(99)).unwrap_err();
        assert_eq!(missing, ModelError::UnknownId(QuestionId::new(99)));
        assert_eq!(missing.to_string(), "no question or alternative has id 99");
    }

    #[test]
    fn referenced_columns_include_alternatives() {
        let catalog = catalog();
        let columns: Vec<&str> = catalog
            .referenced_columns()
            .into_iter()
            .map(ColumnKey::as_str)
            .collect();
        assert_eq!(columns, vec!["P1_a", "P1_b", "P4_d_1", "P4_d_2"]);
    }

    #[test]
    fn section_falls_back_to_title() {
        let catalog = catalog();
        let section = catalog.section("dados demográficos").expect("title match");
        assert_eq!(section.key, "P1");
    }
}
