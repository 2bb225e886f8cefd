//! Workflow modules grouped by business domain.

pub mod underwriting;
