//! CLI library components for the survey explorer.

#![allow(missing_docs)]

pub mod logging;
pub mod render;
