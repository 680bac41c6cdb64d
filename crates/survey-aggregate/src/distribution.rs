//! One-dimensional answer distributions.

use std::fmt;
use std::str::FromStr;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::{Deserialize, Serialize};
use survey_model::QuestionId;
use thiserror::Error;

/// Whether values are raw counts or percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// "Quantidade"
    #[default]
    Count,
    /// "Percentual"
    Percent,
}

impl DisplayMode {
    /// Name shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "Quantidade",
            Self::Percent => "Percentual",
        }
    }

    /// Header of the value column.
    pub fn value_header(self) -> &'static str {
        match self {
            Self::Count => "Quantidade",
            Self::Percent => "Percentual (%)",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display mode '{0}' (expected Quantidade or Percentual)")]
pub struct ParseDisplayModeError(String);

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quantidade" | "count" => Ok(Self::Count),
            "percentual" | "percent" => Ok(Self::Percent),
            _ => Err(ParseDisplayModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    pub label: String,
    pub value: f64,
}

/// Distribution of the answers to one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub question: QuestionId,
    pub title: String,
    pub mode: DisplayMode,
    /// Multi-choice values are independent per alternative: counts may add
    /// up to more than the number of respondents and percentages need not
    /// sum to 100.
    pub multi_choice: bool,
    pub rows: Vec<DistributionRow>,
}

impl Distribution {
    pub fn is_multi_choice(&self) -> bool {
        self.multi_choice
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.value).sum()
    }

    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value)
    }

    /// Two-column frame: the question title and the mode's value header.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<&str> = self.rows.iter().map(|row| row.label.as_str()).collect();
        let values: Vec<f64> = self.rows.iter().map(|row| row.value).collect();
        DataFrame::new(vec![
            Series::new(self.title.as_str().into(), labels).into_column(),
            Series::new(self.mode.value_header().into(), values).into_column(),
        ])
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a percentage rounded to two decimals; 0 when `whole` is 0.
pub(crate) fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round2(part / whole * 100.0)
}
