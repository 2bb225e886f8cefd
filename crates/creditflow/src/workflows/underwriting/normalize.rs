//! Intake validation and normalization for submitted applications.

use super::domain::{LoanApplication, LoanApplicationRequest};

/// Validation failures raised before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
}

/// Reject submissions the pipeline cannot meaningfully score.
pub fn validate(request: &LoanApplicationRequest) -> Result<(), ValidationError> {
    require_positive(request.loan_amnt, "loanAmnt")?;
    require_positive(request.annual_inc, "annualInc")?;
    require_non_blank(&request.term, "term")?;
    require_non_blank(&request.purpose, "purpose")?;
    require_non_blank(&request.home_ownership, "homeOwnership")?;
    require_non_blank(&request.verification_status, "verificationStatus")?;
    require_non_blank(&request.application_type, "applicationType")?;
    require_non_blank(&request.addr_state, "addrState")?;
    Ok(())
}

/// Produce the canonical application consumed by both the scoring adapter
/// and the record mapper. Pure: trims free-text fields and uppercases the
/// state code; no I/O, no failure modes beyond [`validate`].
pub fn normalize(request: LoanApplicationRequest) -> LoanApplication {
    LoanApplication {
        loan_amnt: request.loan_amnt,
        term: request.term.trim().to_string(),
        purpose: request.purpose.trim().to_string(),
        annual_inc: request.annual_inc,
        emp_length: request.emp_length,
        home_ownership: request.home_ownership.trim().to_string(),
        verification_status: request.verification_status.trim().to_string(),
        application_type: request.application_type.trim().to_string(),
        addr_state: request.addr_state.trim().to_ascii_uppercase(),
        dti: request.dti,
        fico_range_low: request.fico_range_low,
        fico_range_high: request.fico_range_high,
    }
}

fn require_positive(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field })
    }
}

fn require_non_blank(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LoanApplicationRequest {
        LoanApplicationRequest {
            loan_amnt: 15000.0,
            term: " 36 months ".to_string(),
            purpose: "home_improvement".to_string(),
            annual_inc: 72000.0,
            emp_length: 6.0,
            home_ownership: "MORTGAGE".to_string(),
            verification_status: "Source Verified".to_string(),
            application_type: "Individual".to_string(),
            addr_state: "ia".to_string(),
            dti: 21.4,
            fico_range_low: 700.0,
            fico_range_high: 704.0,
        }
    }

    #[test]
    fn normalize_trims_and_uppercases_state() {
        let application = normalize(request());
        assert_eq!(application.term, "36 months");
        assert_eq!(application.addr_state, "IA");
        assert_eq!(application.loan_amnt, 15000.0);
    }

    #[test]
    fn validate_accepts_well_formed_request() {
        assert_eq!(validate(&request()), Ok(()));
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        let mut bad = request();
        bad.loan_amnt = 0.0;
        assert_eq!(
            validate(&bad),
            Err(ValidationError::NonPositive { field: "loanAmnt" })
        );
    }

    #[test]
    fn validate_rejects_blank_purpose() {
        let mut bad = request();
        bad.purpose = "   ".to_string();
        assert_eq!(
            validate(&bad),
            Err(ValidationError::Blank { field: "purpose" })
        );
    }
}
