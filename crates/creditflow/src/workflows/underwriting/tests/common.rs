use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::workflows::underwriting::domain::{
    ImputedValue, LoanApplication, LoanApplicationRequest, RiskAssessment,
};
use crate::workflows::underwriting::narrative::NarrativeGenerator;
use crate::workflows::underwriting::record::{LoanRecord, NewLoanRecord};
use crate::workflows::underwriting::repository::{LoanRepository, RepositoryError};
use crate::workflows::underwriting::scoring::{RiskScorer, ScoringError};

pub(super) fn sample_request() -> LoanApplicationRequest {
    LoanApplicationRequest {
        loan_amnt: 12000.0,
        term: "36 months".to_string(),
        purpose: "debt_consolidation".to_string(),
        annual_inc: 85000.0,
        emp_length: 4.5,
        home_ownership: "RENT".to_string(),
        verification_status: "Verified".to_string(),
        application_type: "Individual".to_string(),
        addr_state: "IA".to_string(),
        dti: 18.2,
        fico_range_low: 690.0,
        fico_range_high: 694.0,
    }
}

pub(super) fn sample_application() -> LoanApplication {
    crate::workflows::underwriting::normalize::normalize(sample_request())
}

pub(super) fn sample_assessment() -> RiskAssessment {
    let mut imputed = BTreeMap::new();
    imputed.insert("emp_length".to_string(), ImputedValue::Number(4.0));
    imputed.insert(
        "verification_status".to_string(),
        ImputedValue::Text("Not Verified".to_string()),
    );

    RiskAssessment {
        pd_score: Some(0.12),
        risk_tier: Some("B".to_string()),
        decision: Some("approve".to_string()),
        fico_warning: Some(false),
        top_risk_factors: Some(vec!["dti".to_string(), "emp_length".to_string()]),
        unemployment_rate: Some(3.9),
        delinq_rate: Some(1.2),
        imputed_fields: Some(imputed),
    }
}

/// Scorer returning a fixed assessment while counting invocations.
pub(super) struct StubScorer {
    pub(super) assessment: RiskAssessment,
    pub(super) calls: AtomicU64,
}

impl StubScorer {
    pub(super) fn new(assessment: RiskAssessment) -> Self {
        Self {
            assessment,
            calls: AtomicU64::new(0),
        }
    }

    pub(super) fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RiskScorer for StubScorer {
    async fn assess(&self, _: &LoanApplication) -> Result<RiskAssessment, ScoringError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.assessment.clone())
    }
}

/// Scorer simulating an unreachable scoring service.
pub(super) struct UnavailableScorer;

#[async_trait]
impl RiskScorer for UnavailableScorer {
    async fn assess(&self, _: &LoanApplication) -> Result<RiskAssessment, ScoringError> {
        Err(ScoringError::Unavailable("connection refused".to_string()))
    }
}

/// Narrator returning a fixed summary without any remote call.
pub(super) struct StubNarrator {
    pub(super) text: String,
}

impl StubNarrator {
    pub(super) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for StubNarrator {
    async fn summarize(&self, _: &LoanApplication, _: &RiskAssessment) -> String {
        self.text.clone()
    }
}

/// In-memory store assigning identity and timestamp on save. Insertion
/// order is chronological, so descending order is the reversed log.
#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<LoanRecord>>,
}

impl MemoryRepository {
    pub(super) fn records(&self) -> Vec<LoanRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }

    pub(super) fn seed(&self, record: NewLoanRecord) -> LoanRecord {
        self.save(record).expect("seed save succeeds")
    }
}

impl LoanRepository for MemoryRepository {
    fn save(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        let saved = record.into_record(Uuid::new_v4(), Utc::now());
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(saved.clone());
        Ok(saved)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| record.id == id).cloned())
    }

    fn find_all_desc(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn count(&self) -> Result<u64, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.len() as u64)
    }

    fn count_by_decision(&self, decision: &str) -> Result<u64, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.decision.as_deref() == Some(decision))
            .count() as u64)
    }
}

/// Store whose every operation fails, for propagation tests.
pub(super) struct BrokenRepository;

impl LoanRepository for BrokenRepository {
    fn save(&self, _: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn find_by_id(&self, _: Uuid) -> Result<Option<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn find_all_desc(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn count(&self) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn count_by_decision(&self, _: &str) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }
}
