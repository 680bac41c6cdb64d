//! Survey response aggregation.
//!
//! This crate turns the flat response table into the tables behind each
//! dashboard view:
//!
//! - **univariate**: count or percentage distribution of one question
//! - **bivariate**: cross-tabulation of two questions (single/single,
//!   single/multi, multi/single)
//! - **crosstab**: the count matrix type shared by the bivariate views
//! - **labels**: display label shortening for charts
//!
//! All functions take the [`ResponseTable`] and the
//! [`QuestionCatalog`](survey_model::QuestionCatalog) by reference and return
//! owned results; neither input is ever modified.

pub mod bivariate;
pub mod crosstab;
pub mod distribution;
pub mod error;
pub mod frame;
mod grouping;
pub mod labels;
pub mod univariate;

pub use bivariate::{
    Bivariate, PairCount, PairCounts, analyze_pair, multi_single, single_multi, single_single,
};
pub use crosstab::CrossTab;
pub use distribution::{DisplayMode, Distribution, DistributionRow, ParseDisplayModeError, round2};
pub use error::{AggregateError, Result};
pub use frame::ResponseTable;
pub use labels::{MAX_LABEL_CHARS, truncate_label};
pub use univariate::{univariate, univariate_section};
