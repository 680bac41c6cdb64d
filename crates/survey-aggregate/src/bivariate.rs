//! Bivariate cross-tabulation of two questions.
//!
//! | first    | second   | result                                  |
//! |----------|----------|-----------------------------------------|
//! | single   | single   | [`PairCounts`] (frequency table + matrix) |
//! | single   | multiple | [`CrossTab`], rows = single answers       |
//! | multiple | single   | [`CrossTab`], rows = alternatives         |
//! | multiple | multiple | [`AggregateError::UnsupportedCombination`] |
//!
//! Matrix rows and columns built from answers are in ascending label order;
//! alternatives keep questionnaire order.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::Serialize;
use survey_model::{QuestionCatalog, QuestionId, QuestionKind};
use tracing::debug;

use crate::crosstab::CrossTab;
use crate::error::{AggregateError, Result};
use crate::frame::ResponseTable;
use crate::grouping::{grouped_selection_sums, pair_counts};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub first: String,
    pub second: String,
    pub count: u64,
}

/// Joint answer frequencies of two single-choice questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCounts {
    pub first: QuestionId,
    pub second: QuestionId,
    /// One entry per observed answer pair, sorted by count descending.
    pub rows: Vec<PairCount>,
    /// Rows are answers to `first`, columns answers to `second`.
    pub matrix: CrossTab,
}

impl PairCounts {
    /// Respondents who answered both questions.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| row.count).sum()
    }

    /// Frequency table: both question titles and a `Quantidade` column.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let firsts: Vec<&str> = self.rows.iter().map(|row| row.first.as_str()).collect();
        let seconds: Vec<&str> = self.rows.iter().map(|row| row.second.as_str()).collect();
        let counts: Vec<u64> = self.rows.iter().map(|row| row.count).collect();
        DataFrame::new(vec![
            Series::new(self.matrix.row_title.as_str().into(), firsts).into_column(),
            Series::new(self.matrix.column_title.as_str().into(), seconds).into_column(),
            Series::new("Quantidade".into(), counts).into_column(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bivariate {
    SingleSingle(PairCounts),
    SingleMulti(CrossTab),
    MultiSingle(CrossTab),
}

impl Bivariate {
    pub fn matrix(&self) -> &CrossTab {
        match self {
            Self::SingleSingle(pairs) => &pairs.matrix,
            Self::SingleMulti(matrix) | Self::MultiSingle(matrix) => matrix,
        }
    }
}

/// Cross-tabulates two questions, choosing the aggregation from their kinds.
///
/// # Errors
///
/// - [`AggregateError::IdenticalQuestions`] when `first == second`, checked
///   before anything else
/// - [`AggregateError::Model`] when either id is not a classified question
/// - [`AggregateError::UnsupportedCombination`] for two multi-choice questions
pub fn analyze_pair(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    first: QuestionId,
    second: QuestionId,
) -> Result<Bivariate> {
    if first == second {
        return Err(AggregateError::IdenticalQuestions(first));
    }
    let result = match (catalog.kind(first)?, catalog.kind(second)?) {
        (QuestionKind::Single, QuestionKind::Single) => {
            Bivariate::SingleSingle(single_single(table, catalog, first, second)?)
        }
        (QuestionKind::Single, QuestionKind::Multiple) => {
            Bivariate::SingleMulti(single_multi(table, catalog, first, second)?)
        }
        (QuestionKind::Multiple, QuestionKind::Single) => {
            Bivariate::MultiSingle(multi_single(table, catalog, first, second)?)
        }
        (QuestionKind::Multiple, QuestionKind::Multiple) => {
            return Err(AggregateError::UnsupportedCombination { first, second });
        }
    };
    let (rows, columns) = result.matrix().shape();
    debug!(first = %first, second = %second, rows, columns, "bivariate analysis");
    Ok(result)
}

/// Joint frequencies of two distinct single-choice questions.
///
/// Respondents missing either answer are left out, so the matrix total is
/// the number of respondents who answered both.
pub fn single_single(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    first: QuestionId,
    second: QuestionId,
) -> Result<PairCounts> {
    if first == second {
        return Err(AggregateError::IdenticalQuestions(first));
    }
    let first_column = catalog.single_column(first)?;
    let second_column = catalog.single_column(second)?;
    table.column(first_column)?;
    table.column(second_column)?;

    let rows: Vec<PairCount> = pair_counts(
        table.data(),
        first_column.as_str(),
        second_column.as_str(),
    )?
    .into_iter()
    .map(|(first, second, count)| PairCount {
        first,
        second,
        count,
    })
    .collect();

    let row_labels: Vec<String> = rows
        .iter()
        .map(|row| row.first.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column_labels: Vec<String> = rows
        .iter()
        .map(|row| row.second.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let mut cells = vec![vec![0u64; column_labels.len()]; row_labels.len()];
    for row in &rows {
        // Labels come from `rows` itself, so both lookups succeed.
        if let (Ok(r), Ok(c)) = (
            row_labels.binary_search(&row.first),
            column_labels.binary_search(&row.second),
        ) {
            cells[r][c] += row.count;
        }
    }

    let matrix = CrossTab::new(
        catalog.text(first)?,
        catalog.text(second)?,
        row_labels,
        column_labels,
        cells,
    );
    Ok(PairCounts {
        first,
        second,
        rows,
        matrix,
    })
}

/// Selections of a multi-choice question grouped by a single-choice answer.
///
/// Rows are the single-choice answers, columns the alternatives' texts.
pub fn single_multi(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    single: QuestionId,
    multi: QuestionId,
) -> Result<CrossTab> {
    let group_column = catalog.single_column(single)?;
    table.column(group_column)?;
    let alternatives = catalog.alternatives(multi)?;

    let groups: BTreeMap<String, Vec<u64>> =
        grouped_selection_sums(table.data(), group_column.as_str(), &alternatives)?
            .into_iter()
            .collect();
    let (rows, cells): (Vec<String>, Vec<Vec<u64>>) = groups.into_iter().unzip();
    let columns = alternatives
        .iter()
        .map(|alternative| alternative.text.clone())
        .collect();

    Ok(CrossTab::new(
        catalog.text(single)?,
        catalog.text(multi)?,
        rows,
        columns,
        cells,
    ))
}

/// Transpose of [`single_multi`]: rows are alternatives, columns answers.
pub fn multi_single(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    multi: QuestionId,
    single: QuestionId,
) -> Result<CrossTab> {
    Ok(single_multi(table, catalog, single, multi)?.transpose())
}
