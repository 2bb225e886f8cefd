use chrono::Utc;
use creditflow::workflows::underwriting::{
    LoanRecord, LoanRepository, NewLoanRecord, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local durable store. Records are appended in creation order, so
/// the descending read is the reversed log.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanRepository {
    records: Arc<Mutex<Vec<LoanRecord>>>,
}

impl LoanRepository for InMemoryLoanRepository {
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
