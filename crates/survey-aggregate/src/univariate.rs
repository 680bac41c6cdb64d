//! Univariate distributions.
//!
//! Single-choice questions count each distinct answer. Multi-choice
//! questions sum the selection indicator of every alternative; those values
//! are independent, so they may add up to more than the respondent count.

use survey_model::{QuestionCatalog, QuestionId, QuestionKind};
use tracing::debug;

use crate::distribution::{DisplayMode, Distribution, DistributionRow, percentage};
use crate::error::Result;
use crate::frame::ResponseTable;
use crate::grouping::{answer_counts, selection_sums};

/// Distribution of the answers to `question`.
///
/// - Single choice: one row per distinct non-missing answer, sorted by
///   count descending (ties in first-occurrence order). Percentages are
///   taken over respondents who answered the question.
/// - Multi choice: one row per alternative, in questionnaire order.
///   Percentages are taken over respondents who answered at least one
///   alternative of the question.
pub fn univariate(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    question: QuestionId,
    mode: DisplayMode,
) -> Result<Distribution> {
    let distribution = match catalog.kind(question)? {
        QuestionKind::Single => single_choice(table, catalog, question, mode)?,
        QuestionKind::Multiple => multi_choice(table, catalog, question, mode)?,
    };
    debug!(
        question = %question,
        mode = %mode,
        rows = distribution.rows.len(),
        "univariate distribution"
    );
    Ok(distribution)
}

/// Distributions of every question of a questionnaire section, in section order.
pub fn univariate_section(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    section: &str,
    mode: DisplayMode,
) -> Result<Vec<Distribution>> {
    catalog
        .section(section)?
        .questions
        .iter()
        .map(|&question| univariate(table, catalog, question, mode))
        .collect()
}

fn single_choice(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    question: QuestionId,
    mode: DisplayMode,
) -> Result<Distribution> {
    let column = catalog.single_column(question)?;
    // Fails early with a catalog-aware message instead of a polars one.
    table.column(column)?;
    let counts = answer_counts(table.data(), column.as_str())?;
    let answered: u64 = counts.iter().map(|(_, count)| count).sum();
    let rows = counts
        .into_iter()
        .map(|(label, count)| DistributionRow {
            label,
            value: match mode {
                DisplayMode::Count => count as f64,
                DisplayMode::Percent => percentage(count as f64, answered as f64),
            },
        })
        .collect();
    Ok(Distribution {
        question,
        title: catalog.text(question)?.to_string(),
        mode,
        multi_choice: false,
        rows,
    })
}

fn multi_choice(
    table: &ResponseTable,
    catalog: &QuestionCatalog,
    question: QuestionId,
    mode: DisplayMode,
) -> Result<Distribution> {
    let alternatives = catalog.alternatives(question)?;
    let columns: Vec<_> = alternatives.iter().map(|alt| &alt.column).collect();
    let answered = table.answered_any(&columns)?;
    let sums = selection_sums(table.data(), &alternatives)?;
    let rows = alternatives
        .iter()
        .zip(sums)
        .map(|(alternative, selected)| DistributionRow {
            label: alternative.text.clone(),
            value: match mode {
                DisplayMode::Count => selected as f64,
                DisplayMode::Percent => percentage(selected as f64, answered as f64),
            },
        })
        .collect();
    Ok(Distribution {
        question,
        title: catalog.text(question)?.to_string(),
        mode,
        multi_choice: true,
        rows,
    })
}
