//! Loan decision orchestration library.
//!
//! The underwriting workflow accepts a loan application, obtains a
//! probability-of-default assessment from a remote scoring service, obtains
//! a best-effort narrative summary from a remote generative-text service,
//! persists the combined record, and serves it back alongside portfolio
//! aggregate statistics.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
