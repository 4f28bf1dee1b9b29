//! Terminal presentation: themes, status messages and result tables.

pub mod output_format;
pub mod report;
pub mod theme;
