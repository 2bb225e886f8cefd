//! Loan underwriting intake, scoring orchestration, and portfolio reporting.
//!
//! The pipeline normalizes an inbound application, obtains a risk assessment
//! from the scoring service (fatal on failure), obtains a narrative summary
//! from the generative-text service (degrades to a fixed fallback), persists
//! the combined record, and serves it back together with aggregate
//! statistics over the persisted history.

pub mod domain;
pub mod narrative;
pub mod normalize;
pub mod record;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{ImputedValue, LoanApplication, LoanApplicationRequest, RiskAssessment};
pub use narrative::{NarrativeGenerator, OllamaNarrativeClient, NARRATIVE_FALLBACK};
pub use normalize::{normalize, validate, ValidationError};
pub use record::{
    decode_imputed_fields, encode_imputed_fields, LoanRecord, LoanRecordView, NewLoanRecord,
};
pub use repository::{LoanRepository, RepositoryError};
pub use router::loan_router;
pub use scoring::{HttpScoringClient, RiskScorer, ScoringError};
pub use service::{LoanDecisionService, ServiceError};
pub use stats::LoanStats;
