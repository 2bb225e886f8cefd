//! Persisted record shape and the bidirectional record mapper.
//!
//! The imputed-field map travels as a text-encoded JSON value at the
//! storage boundary only; everywhere else it is the typed ordered map from
//! [`super::domain`]. Encoding failure degrades to the empty-map encoding
//! and decoding failure degrades to an empty map, so neither direction can
//! fail a request.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{ImputedValue, LoanApplication, RiskAssessment};

/// Durable loan application record, the aggregate root.
///
/// Immutable once persisted: only the store assigns `id` and `created_at`,
/// and no update path exists. `banker_notes` and `final_decision` are
/// reserved for later human review; this pipeline never writes them but
/// preserves them round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub loan_amnt: f64,
    pub term: String,
    pub purpose: String,
    pub annual_inc: f64,
    pub emp_length: f64,
    pub home_ownership: String,
    pub verification_status: String,
    pub application_type: String,
    pub addr_state: String,
    pub dti: f64,
    pub fico_range_low: f64,
    pub fico_range_high: f64,
    pub unemployment_rate: Option<f64>,
    pub delinq_rate: Option<f64>,
    pub pd_score: Option<f64>,
    pub risk_tier: Option<String>,
    pub decision: Option<String>,
    pub fico_warning: Option<bool>,
    pub top_risk_factors: Option<Vec<String>>,
    /// Text-encoded imputed-field map (JSON object).
    pub imputed_fields: Option<String>,
    pub ai_summary: String,
    pub banker_notes: Option<String>,
    pub final_decision: Option<String>,
}

/// Record assembled by the orchestrator before the store assigns identity
/// and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoanRecord {
    pub loan_amnt: f64,
    pub term: String,
    pub purpose: String,
    pub annual_inc: f64,
    pub emp_length: f64,
    pub home_ownership: String,
    pub verification_status: String,
    pub application_type: String,
    pub addr_state: String,
    pub dti: f64,
    pub fico_range_low: f64,
    pub fico_range_high: f64,
    pub unemployment_rate: Option<f64>,
    pub delinq_rate: Option<f64>,
    pub pd_score: Option<f64>,
    pub risk_tier: Option<String>,
    pub decision: Option<String>,
    pub fico_warning: Option<bool>,
    pub top_risk_factors: Option<Vec<String>>,
    pub imputed_fields: Option<String>,
    pub ai_summary: String,
}

impl NewLoanRecord {
    /// Assemble the storage-bound record from the normalized application,
    /// the assessment, and the narrative text.
    pub fn assemble(
        application: LoanApplication,
        assessment: RiskAssessment,
        ai_summary: String,
    ) -> Self {
        let imputed_fields = assessment.imputed_fields.as_ref().map(encode_imputed_fields);

        Self {
            loan_amnt: application.loan_amnt,
            term: application.term,
            purpose: application.purpose,
            annual_inc: application.annual_inc,
            emp_length: application.emp_length,
            home_ownership: application.home_ownership,
            verification_status: application.verification_status,
            application_type: application.application_type,
            addr_state: application.addr_state,
            dti: application.dti,
            fico_range_low: application.fico_range_low,
            fico_range_high: application.fico_range_high,
            unemployment_rate: assessment.unemployment_rate,
            delinq_rate: assessment.delinq_rate,
            pd_score: assessment.pd_score,
            risk_tier: assessment.risk_tier,
            decision: assessment.decision,
            fico_warning: assessment.fico_warning,
            top_risk_factors: assessment.top_risk_factors,
            imputed_fields,
            ai_summary,
        }
    }
}

impl NewLoanRecord {
    /// Materialize the persisted record once the store has assigned
    /// identity and timestamp. Review fields start unset; the pipeline
    /// never writes them.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> LoanRecord {
        LoanRecord {
            id,
            created_at,
            loan_amnt: self.loan_amnt,
            term: self.term,
            purpose: self.purpose,
            annual_inc: self.annual_inc,
            emp_length: self.emp_length,
            home_ownership: self.home_ownership,
            verification_status: self.verification_status,
            application_type: self.application_type,
            addr_state: self.addr_state,
            dti: self.dti,
            fico_range_low: self.fico_range_low,
            fico_range_high: self.fico_range_high,
            unemployment_rate: self.unemployment_rate,
            delinq_rate: self.delinq_rate,
            pd_score: self.pd_score,
            risk_tier: self.risk_tier,
            decision: self.decision,
            fico_warning: self.fico_warning,
            top_risk_factors: self.top_risk_factors,
            imputed_fields: self.imputed_fields,
            ai_summary: self.ai_summary,
            banker_notes: None,
            final_decision: None,
        }
    }
}

/// Text-encode the imputed-field map for storage. Serialization failure
/// degrades to the empty-map encoding instead of failing the request.
pub fn encode_imputed_fields(map: &BTreeMap<String, ImputedValue>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a stored imputed-field encoding. Malformed text degrades to an
/// empty map instead of failing the read.
pub fn decode_imputed_fields(encoded: &str) -> BTreeMap<String, ImputedValue> {
    serde_json::from_str(encoded).unwrap_or_default()
}

/// Externally exposed representation of a persisted record (camelCase
/// JSON), the inverse of the storage encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecordView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub loan_amnt: f64,
    pub term: String,
    pub purpose: String,
    pub annual_inc: f64,
    pub emp_length: f64,
    pub home_ownership: String,
    pub verification_status: String,
    pub application_type: String,
    pub addr_state: String,
    pub dti: f64,
    pub fico_range_low: f64,
    pub fico_range_high: f64,
    pub pd_score: Option<f64>,
    pub risk_tier: Option<String>,
    pub decision: Option<String>,
    pub fico_warning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_risk_factors: Option<Vec<String>>,
    #[serde(default)]
    pub imputed_fields: BTreeMap<String, ImputedValue>,
    pub ai_summary: String,
    pub unemployment_rate: Option<f64>,
    pub delinq_rate: Option<f64>,
}

impl LoanRecordView {
    /// Decode a stored record into the exposed representation.
    pub fn from_record(record: &LoanRecord) -> Self {
        let imputed_fields = record
            .imputed_fields
            .as_deref()
            .map(decode_imputed_fields)
            .unwrap_or_default();

        Self {
            id: record.id,
            created_at: record.created_at,
            loan_amnt: record.loan_amnt,
            term: record.term.clone(),
            purpose: record.purpose.clone(),
            annual_inc: record.annual_inc,
            emp_length: record.emp_length,
            home_ownership: record.home_ownership.clone(),
            verification_status: record.verification_status.clone(),
            application_type: record.application_type.clone(),
            addr_state: record.addr_state.clone(),
            dti: record.dti,
            fico_range_low: record.fico_range_low,
            fico_range_high: record.fico_range_high,
            pd_score: record.pd_score,
            risk_tier: record.risk_tier.clone(),
            decision: record.decision.clone(),
            fico_warning: record.fico_warning,
            top_risk_factors: record.top_risk_factors.clone(),
            imputed_fields,
            ai_summary: record.ai_summary.clone(),
            unemployment_rate: record.unemployment_rate,
            delinq_rate: record.delinq_rate,
        }
    }
}
