//! Batch report types and helpers.

mod report;
mod result;

pub use report::{BatchReport, BatchStats};
pub use result::{RepositoryFailure, RepositoryOutcome};
