use uuid::Uuid;

use super::record::{LoanRecord, NewLoanRecord};

/// Storage abstraction so the orchestration service can be exercised in
/// isolation. The store is sole owner of record identity and timestamp
/// assignment; records are immutable once saved, so no update operation
/// exists.
pub trait LoanRepository: Send + Sync {
    /// Persist a new record, assigning its id and creation timestamp.
    fn save(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<LoanRecord>, RepositoryError>;

    /// All records ordered by creation timestamp descending.
    fn find_all_desc(&self) -> Result<Vec<LoanRecord>, RepositoryError>;

    fn count(&self) -> Result<u64, RepositoryError>;

    /// Count records whose decision equals `decision` exactly
    /// (case-sensitive). Records without a decision never match.
    fn count_by_decision(&self, decision: &str) -> Result<u64, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
