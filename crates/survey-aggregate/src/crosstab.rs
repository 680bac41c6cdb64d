//! Count matrices for heatmap-style views.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::Serialize;

use crate::distribution::percentage;

/// A rows × columns matrix of respondent counts.
///
/// `cells[r][c]` is the count for `rows[r]` and `columns[c]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    /// Title of the row axis (the question whose answers label the rows).
    pub row_title: String,
    /// Title of the column axis.
    pub column_title: String,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<u64>>,
}

impl CrossTab {
    pub fn new(
        row_title: impl Into<String>,
        column_title: impl Into<String>,
        rows: Vec<String>,
        columns: Vec<String>,
        cells: Vec<Vec<u64>>,
    ) -> Self {
        debug_assert_eq!(rows.len(), cells.len());
        debug_assert!(cells.iter().all(|row| row.len() == columns.len()));
        Self {
            row_title: row_title.into(),
            column_title: column_title.into(),
            rows,
            columns,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn get(&self, row: &str, column: &str) -> Option<u64> {
        let r = self.rows.iter().position(|label| label == row)?;
        let c = self.columns.iter().position(|label| label == column)?;
        Some(self.cells[r][c])
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let cells = (0..self.columns.len())
            .map(|c| self.cells.iter().map(|row| row[c]).collect())
            .collect();
        Self {
            row_title: self.column_title.clone(),
            column_title: self.row_title.clone(),
            rows: self.columns.clone(),
            columns: self.rows.clone(),
            cells,
        }
    }

    /// Each row as percentages of its own total, rounded to two decimals.
    ///
    /// This is the percent-normalised stacked bar view; rows with no
    /// respondents are all zeros.
    pub fn row_percentages(&self) -> Vec<Vec<f64>> {
        self.cells
            .iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                row.iter()
                    .map(|&count| percentage(count as f64, total as f64))
                    .collect()
            })
            .collect()
    }

    /// Frame with the row labels first, then one count column per column label.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len() + 1);
        let labels: Vec<&str> = self.rows.iter().map(String::as_str).collect();
        columns.push(Series::new(self.row_title.as_str().into(), labels).into_column());
        for (c, name) in self.columns.iter().enumerate() {
            let values: Vec<u64> = self.cells.iter().map(|row| row[c]).collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrossTab {
        CrossTab::new(
            "Cargo",
            "Linguagens",
            vec!["Analista".to_string(), "Cientista".to_string()],
            vec!["Python".to_string(), "R".to_string(), "SQL".to_string()],
            vec![vec![1, 0, 3], vec![4, 2, 2]],
        )
    }

    #[test]
    fn transpose_swaps_axes() {
        let matrix = sample();
        let transposed = matrix.transpose();
        assert_eq!(transposed.shape(), (3, 2));
        assert_eq!(transposed.row_title, "Linguagens");
        assert_eq!(transposed.get("SQL", "Analista"), Some(3));
        assert_eq!(transposed.transpose(), matrix);
    }

    #[test]
    fn totals() {
        let matrix = sample();
        assert_eq!(matrix.total(), 12);
        assert_eq!(matrix.row_totals(), vec![4, 8]);
    }

    #[test]
    fn row_percentages_sum_to_hundred() {
        let percentages = sample().row_percentages();
        assert_eq!(percentages[0], vec![25.0, 0.0, 75.0]);
        assert_eq!(percentages[1], vec![50.0, 25.0, 25.0]);
    }

    #[test]
    fn frame_has_label_column_first() {
        let frame = sample().to_frame().unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 2);
        let sql = frame.column("SQL").unwrap().u64().unwrap();
        assert_eq!(sql.get(1), Some(2));
    }
}
