use crate::infra::{AppState, InMemoryLoanRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use creditflow::workflows::underwriting::{
    loan_router, LoanDecisionService, NarrativeGenerator, RiskScorer,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_loan_routes<S, N>(
    service: Arc<LoanDecisionService<S, N, InMemoryLoanRepository>>,
) -> axum::Router
where
    S: RiskScorer + 'static,
    N: NarrativeGenerator + 'static,
{
    loan_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use creditflow::workflows::underwriting::{
        LoanApplication, RiskAssessment, RiskScorer, ScoringError, NARRATIVE_FALLBACK,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct OfflineScorer;

    #[async_trait::async_trait]
    impl RiskScorer for OfflineScorer {
        async fn assess(
            &self,
            _application: &LoanApplication,
        ) -> Result<RiskAssessment, ScoringError> {
            Err(ScoringError::Unavailable("offline".to_string()))
        }
    }

    struct SilentNarrator;

    #[async_trait::async_trait]
    impl NarrativeGenerator for SilentNarrator {
        async fn summarize(&self, _: &LoanApplication, _: &RiskAssessment) -> String {
            NARRATIVE_FALLBACK.to_string()
        }
    }

    fn test_app(ready: bool) -> axum::Router {
        // build_recorder avoids installing a process-global recorder,
        // which can only happen once.
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        };
        let service = Arc::new(LoanDecisionService::new(
            Arc::new(OfflineScorer),
            Arc::new(SilentNarrator),
            Arc::new(InMemoryLoanRepository::default()),
        ));
        with_loan_routes(service).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router call succeeds")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_startup_flag() {
        let response = get(test_app(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(test_app(true), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_plain_text() {
        let response = get(test_app(true), "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }
}
