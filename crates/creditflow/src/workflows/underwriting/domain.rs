use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Inbound loan application as submitted over the HTTP API.
///
/// The wire format is camelCase; every field is required at intake, so a
/// missing field is rejected during deserialization before the pipeline
/// runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationRequest {
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
}

/// Canonical application shape consumed by the scoring adapter and the
/// record mapper.
///
/// The native snake_case field names double as the scoring service's wire
/// keys, so serializing this struct is the systematic re-keying transform
/// (e.g. `loanAmnt` -> `loan_amnt`) applied uniformly to every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
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
}

/// Output of the risk scoring service.
///
/// Upstream may omit any subset of fields, so every field tolerates
/// absence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(default)]
    pub pd_score: Option<f64>,
    #[serde(default)]
    pub risk_tier: Option<String>,
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub fico_warning: Option<bool>,
    #[serde(default)]
    pub top_risk_factors: Option<Vec<String>>,
    #[serde(default)]
    pub unemployment_rate: Option<f64>,
    #[serde(default)]
    pub delinq_rate: Option<f64>,
    #[serde(default)]
    pub imputed_fields: Option<BTreeMap<String, ImputedValue>>,
}

/// Scalar value the scoring service substituted for a missing or invalid
/// input field. The imputed-field map is open and dynamically shaped, so
/// values are restricted to this small union rather than an open dynamic
/// type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImputedValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}
