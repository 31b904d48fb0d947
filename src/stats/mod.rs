//! Stats module - descriptive summaries

mod summary;

pub use summary::BoxSummary;
