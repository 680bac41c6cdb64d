//! Response table loading.
//!
//! The response table has one row per respondent and one column per
//! question or multi-choice alternative. It is read once at startup and
//! never modified afterwards.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Rows sampled by the CSV reader when inferring column types.
pub const SCHEMA_INFERENCE_ROWS: usize = 100;

/// Reads the response table, choosing the reader from the file extension.
///
/// Empty CSV fields are read as nulls, which the aggregators treat as
/// non-response.
pub fn read_responses(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let df = match extension.as_deref() {
        Some("csv") => read_csv(path)?,
        Some("parquet") => read_parquet(path)?,
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };
    if df.height() == 0 {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "response table loaded"
    );
    Ok(df)
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::ParquetParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::Builder;

    fn create_temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_responses() {
        let file = create_temp_csv("P1_a,P4_d_1\n25-29,1\n30-34,0\n,1\n");
        let df = read_responses(file.path()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 2);
        assert_eq!(df.column("P1_a").unwrap().null_count(), 1);
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        let file = create_temp_csv("P1_a,P1_b\n");
        let err = read_responses(file.path()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::EmptyTable { .. } | IngestError::CsvParse { .. }
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = read_responses(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_responses(Path::new("/nonexistent/respostas.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
