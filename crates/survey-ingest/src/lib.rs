//! Survey data ingestion.
//!
//! This crate loads the two inputs every analysis needs:
//!
//! - **Response table**: CSV or Parquet, read into a Polars `DataFrame`
//! - **Question catalog**: a TOML file validated into a [`QuestionCatalog`]
//!
//! It also provides the `AnyValue` helpers the aggregators use to read
//! answers and selection indicators.
//!
//! [`QuestionCatalog`]: survey_model::QuestionCatalog

mod catalog_file;
mod error;
mod polars_utils;
mod responses;

// === Error Types ===
pub use error::{IngestError, Result};

// === Response Table ===
pub use responses::{SCHEMA_INFERENCE_ROWS, read_responses};

// === Question Catalog ===
pub use catalog_file::{
    AlternativeEntry, CatalogFile, QuestionEntry, SectionEntry, load_catalog, parse_catalog,
};

// === Value Helpers ===
pub use polars_utils::{any_to_f64, any_to_label, any_to_string, format_numeric, parse_f64};
