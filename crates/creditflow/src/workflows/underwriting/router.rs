use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use uuid::Uuid;

use super::domain::LoanApplicationRequest;
use super::narrative::NarrativeGenerator;
use super::repository::{LoanRepository, RepositoryError};
use super::scoring::RiskScorer;
use super::service::{LoanDecisionService, ServiceError};

/// Router builder exposing HTTP endpoints for intake, lookup, and
/// portfolio statistics.
pub fn loan_router<S, N, R>(service: Arc<LoanDecisionService<S, N, R>>) -> Router
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
    R: LoanRepository + 'static,
{
    Router::new()
        .route("/api/v1/loans/apply", post(apply_handler::<S, N, R>))
        .route("/api/v1/loans", get(list_handler::<S, N, R>))
        .route("/api/v1/loans/stats", get(stats_handler::<S, N, R>))
        .route("/api/v1/loans/:id", get(get_handler::<S, N, R>))
        .with_state(service)
}

pub(crate) async fn apply_handler<S, N, R>(
    State(service): State<Arc<LoanDecisionService<S, N, R>>>,
    axum::Json(request): axum::Json<LoanApplicationRequest>,
) -> Response
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
    R: LoanRepository + 'static,
{
    match service.process(request).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<S, N, R>(
    State(service): State<Arc<LoanDecisionService<S, N, R>>>,
) -> Response
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
    R: LoanRepository + 'static,
{
    match service.list() {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<S, N, R>(
    State(service): State<Arc<LoanDecisionService<S, N, R>>>,
    Path(id): Path<Uuid>,
) -> Response
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
    R: LoanRepository + 'static,
{
    match service.get(id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<S, N, R>(
    State(service): State<Arc<LoanDecisionService<S, N, R>>>,
) -> Response
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
    R: LoanRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Map service failures onto HTTP statuses: validation is the caller's
/// fault, scoring unavailability is an upstream outage, a missing record is
/// not found, and everything else is internal.
fn error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Scoring(_) => StatusCode::BAD_GATEWAY,
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
