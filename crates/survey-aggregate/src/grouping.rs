//! Group-by helpers over the response table.
//!
//! Groups are formed in the order answers first appear. Missing answers,
//! NaN included, never form a group.

use std::collections::HashMap;
use std::hash::Hash;

use polars::prelude::{DataFrame, DataType, Expr, IntoLazy, col, len, lit};
use survey_ingest::{any_to_f64, any_to_label};
use survey_model::Alternative;

use crate::error::Result;

const COUNT_COLUMN: &str = "__count";

fn alternative_alias(idx: usize) -> String {
    format!("__alternative_{idx}")
}

/// Sum of one 0/1 indicator column; missing and NaN count as unselected.
fn selection_sum(alternative: &Alternative, idx: usize) -> Expr {
    col(alternative.column.as_str())
        .cast(DataType::Float64)
        .fill_nan(lit(0.0))
        .fill_null(lit(0.0))
        .sum()
        .alias(alternative_alias(idx))
}

fn count_u64(value: Option<f64>) -> u64 {
    value.map_or(0, |v| v.max(0.0).round() as u64)
}

/// Adds up rows whose keys collide after label normalisation.
///
/// Each key keeps the position of its first variant, so a stable sort by
/// count descending breaks ties in first-occurrence order.
fn merge_by_key<K>(rows: impl IntoIterator<Item = (K, u64)>) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
{
    let mut merged: Vec<(K, u64)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();
    for (key, count) in rows {
        match positions.get(&key) {
            Some(&position) => merged[position].1 += count,
            None => {
                positions.insert(key.clone(), merged.len());
                merged.push((key, count));
            }
        }
    }
    merged.sort_by(|a, b| b.1.cmp(&a.1));
    merged
}

/// Counts each distinct non-missing answer of `column`.
///
/// Sorted by count descending; ties keep first-occurrence order. Answers
/// differing only in surrounding whitespace are one answer, and NaN is
/// non-response.
pub(crate) fn answer_counts(df: &DataFrame, column: &str) -> Result<Vec<(String, u64)>> {
    let counted = df
        .clone()
        .lazy()
        .select([col(column)])
        .filter(col(column).is_not_null())
        .group_by_stable([col(column)])
        .agg([len().alias(COUNT_COLUMN)])
        .collect()?;

    let labels = counted.column(column)?;
    let counts = counted.column(COUNT_COLUMN)?;
    let mut rows = Vec::with_capacity(counted.height());
    for idx in 0..counted.height() {
        let Some(label) = any_to_label(labels.get(idx)?) else {
            continue;
        };
        rows.push((label, count_u64(any_to_f64(counts.get(idx)?))));
    }
    Ok(merge_by_key(rows))
}

/// Counts each observed pair of non-missing answers of `first` and `second`.
///
/// One entry per normalised pair, sorted by count descending; ties keep
/// first-occurrence order.
pub(crate) fn pair_counts(
    df: &DataFrame,
    first: &str,
    second: &str,
) -> Result<Vec<(String, String, u64)>> {
    let counted = df
        .clone()
        .lazy()
        .select([col(first), col(second)])
        .filter(col(first).is_not_null().and(col(second).is_not_null()))
        .group_by_stable([col(first), col(second)])
        .agg([len().alias(COUNT_COLUMN)])
        .collect()?;

    let firsts = counted.column(first)?;
    let seconds = counted.column(second)?;
    let counts = counted.column(COUNT_COLUMN)?;
    let mut rows = Vec::with_capacity(counted.height());
    for idx in 0..counted.height() {
        let (Some(a), Some(b)) = (any_to_label(firsts.get(idx)?), any_to_label(seconds.get(idx)?))
        else {
            continue;
        };
        rows.push(((a, b), count_u64(any_to_f64(counts.get(idx)?))));
    }
    Ok(merge_by_key(rows)
        .into_iter()
        .map(|((a, b), count)| (a, b, count))
        .collect())
}

/// Number of respondents selecting each alternative, in alternative order.
pub(crate) fn selection_sums(df: &DataFrame, alternatives: &[&Alternative]) -> Result<Vec<u64>> {
    let sums: Vec<Expr> = alternatives
        .iter()
        .enumerate()
        .map(|(idx, alternative)| selection_sum(alternative, idx))
        .collect();
    let summed = df.clone().lazy().select(sums).collect()?;
    (0..alternatives.len())
        .map(|idx| {
            let column = summed.column(&alternative_alias(idx))?;
            Ok(count_u64(any_to_f64(column.get(0)?)))
        })
        .collect()
}

/// Per non-missing answer of `group`, the number of respondents in that
/// group selecting each alternative. Groups come in first-occurrence order.
pub(crate) fn grouped_selection_sums(
    df: &DataFrame,
    group: &str,
    alternatives: &[&Alternative],
) -> Result<Vec<(String, Vec<u64>)>> {
    let sums: Vec<Expr> = alternatives
        .iter()
        .enumerate()
        .map(|(idx, alternative)| selection_sum(alternative, idx))
        .collect();
    let grouped = df
        .clone()
        .lazy()
        .filter(col(group).is_not_null())
        .group_by_stable([col(group)])
        .agg(sums)
        .collect()?;

    let labels = grouped.column(group)?;
    let columns = (0..alternatives.len())
        .map(|idx| grouped.column(&alternative_alias(idx)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut merged: Vec<(String, Vec<u64>)> = Vec::with_capacity(grouped.height());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for idx in 0..grouped.height() {
        let Some(label) = any_to_label(labels.get(idx)?) else {
            continue;
        };
        let mut sums = Vec::with_capacity(columns.len());
        for column in &columns {
            sums.push(count_u64(any_to_f64(column.get(idx)?)));
        }
        match positions.get(&label) {
            Some(&position) => {
                for (total, sum) in merged[position].1.iter_mut().zip(sums) {
                    *total += sum;
                }
            }
            None => {
                positions.insert(label.clone(), merged.len());
                merged.push((label, sums));
            }
        }
    }
    Ok(merged)
}
