//! Decision orchestration across scoring, narrative generation, and
//! persistence.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::domain::LoanApplicationRequest;
use super::narrative::NarrativeGenerator;
use super::normalize::{normalize, validate, ValidationError};
use super::record::{LoanRecordView, NewLoanRecord};
use super::repository::{LoanRepository, RepositoryError};
use super::scoring::{RiskScorer, ScoringError};
use super::stats::LoanStats;

/// Service composing the scoring adapter, the narrative adapter, and the
/// durable store.
pub struct LoanDecisionService<S, N, R> {
    scorer: Arc<S>,
    narrator: Arc<N>,
    repository: Arc<R>,
}

impl<S, N, R> LoanDecisionService<S, N, R>
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
    R: LoanRepository + 'static,
{
    pub fn new(scorer: Arc<S>, narrator: Arc<N>, repository: Arc<R>) -> Self {
        Self {
            scorer,
            narrator,
            repository,
        }
    }

    /// Run the decision pipeline for one application.
    ///
    /// Strictly ordered: scoring first (its failure aborts the request with
    /// nothing persisted), then narrative generation with the assessment
    /// (never fails; degrades inside the adapter), then assembly and a
    /// single store write. The store assigns identity and timestamp; its
    /// failure propagates unchanged with no compensating action.
    pub async fn process(
        &self,
        request: LoanApplicationRequest,
    ) -> Result<LoanRecordView, ServiceError> {
        validate(&request)?;
        let application = normalize(request);

        let assessment = self.scorer.assess(&application).await?;
        let ai_summary = self.narrator.summarize(&application, &assessment).await;

        let record = NewLoanRecord::assemble(application, assessment, ai_summary);
        let saved = self.repository.save(record)?;

        info!(
            id = %saved.id,
            decision = saved.decision.as_deref().unwrap_or("none"),
            "loan application persisted"
        );

        Ok(LoanRecordView::from_record(&saved))
    }

    /// All persisted applications, most recent first.
    pub fn list(&self) -> Result<Vec<LoanRecordView>, ServiceError> {
        let records = self.repository.find_all_desc()?;
        Ok(records.iter().map(LoanRecordView::from_record).collect())
    }

    /// Fetch one persisted application by id.
    pub fn get(&self, id: Uuid) -> Result<LoanRecordView, ServiceError> {
        let record = self
            .repository
            .find_by_id(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(LoanRecordView::from_record(&record))
    }

    /// Portfolio aggregate statistics over the full persisted history.
    pub fn stats(&self) -> Result<LoanStats, ServiceError> {
        let total = self.repository.count()?;
        let approved = self.repository.count_by_decision("approve")?;
        let review = self.repository.count_by_decision("review")?;
        let rejected = self.repository.count_by_decision("reject")?;
        Ok(LoanStats::compute(total, approved, review, rejected))
    }
}

/// Error raised by the decision service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
