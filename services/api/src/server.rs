use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLoanRepository};
use crate::routes::with_loan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use creditflow::config::AppConfig;
use creditflow::error::AppError;
use creditflow::telemetry;
use creditflow::workflows::underwriting::{
    HttpScoringClient, LoanDecisionService, OllamaNarrativeClient,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // One pooled client backs both outbound adapters.
    let http_client = reqwest::Client::new();
    let scorer = Arc::new(HttpScoringClient::with_client(
        http_client.clone(),
        config.scoring.base_url.clone(),
    ));
    let narrator = Arc::new(OllamaNarrativeClient::with_client(
        http_client,
        config.narrative.base_url.clone(),
        config.narrative.model.clone(),
    ));
    let repository = Arc::new(InMemoryLoanRepository::default());
    let loan_service = Arc::new(LoanDecisionService::new(scorer, narrator, repository));

    let app = with_loan_routes(loan_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        scoring = %config.scoring.base_url,
        narrative = %config.narrative.base_url,
        "loan decision orchestrator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
