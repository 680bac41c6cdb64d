//! Error types for survey data ingestion.

use std::path::PathBuf;

use survey_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading the response table or the catalog.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Response Table Errors ===
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("failed to parse Parquet {path}: {message}")]
    ParquetParse { path: PathBuf, message: String },

    /// Only `.csv` and `.parquet` response tables are supported.
    #[error("unsupported response table format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("response table is empty: {path}")]
    EmptyTable { path: PathBuf },

    // === Catalog Errors ===
    #[error("failed to parse catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
