//! The response table wrapped for aggregation.
//!
//! [`ResponseTable`] owns the respondents' `DataFrame` and guarantees, from
//! construction on, that every column the question catalog refers to exists.
//! Aggregations only borrow it, so a single table can back any number of
//! concurrent analyses.

use polars::prelude::{Column, DataFrame, DataType, Expr, IntoLazy, any_horizontal, col};
use survey_ingest::any_to_f64;
use survey_model::{ColumnKey, QuestionCatalog};

use crate::error::{AggregateError, Result};

const ANSWERED_COLUMN: &str = "__answered";

#[derive(Debug, Clone)]
pub struct ResponseTable {
    data: DataFrame,
}

impl ResponseTable {
    /// Checks `data` against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::MissingColumn`] for the first referenced
    /// column absent from `data`.
    pub fn new(data: DataFrame, catalog: &QuestionCatalog) -> Result<Self> {
        for column in catalog.referenced_columns() {
            if data.column(column.as_str()).is_err() {
                return Err(AggregateError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }
        Ok(Self { data })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Number of respondents (rows).
    pub fn respondents(&self) -> usize {
        self.data.height()
    }

    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    pub(crate) fn column(&self, key: &ColumnKey) -> Result<&Column> {
        self.data
            .column(key.as_str())
            .map_err(|_| AggregateError::MissingColumn {
                column: key.to_string(),
            })
    }

    /// Counts respondents with at least one non-missing indicator among `columns`.
    ///
    /// Null and NaN are both non-response.
    pub(crate) fn answered_any(&self, columns: &[&ColumnKey]) -> Result<usize> {
        let answered: Vec<Expr> = columns
            .iter()
            .map(|key| {
                self.column(key)?;
                let value = col(key.as_str()).cast(DataType::Float64);
                Ok(value.clone().is_not_null().and(value.is_not_nan()))
            })
            .collect::<Result<_>>()?;
        let counted = self
            .data
            .clone()
            .lazy()
            .select([any_horizontal(answered)?
                .cast(DataType::UInt64)
                .sum()
                .alias(ANSWERED_COLUMN)])
            .collect()?;
        let total = any_to_f64(counted.column(ANSWERED_COLUMN)?.get(0)?);
        Ok(total.map_or(0, |v| v.max(0.0) as usize))
    }
}
