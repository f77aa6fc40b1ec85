use crate::cli::ServeArgs;
use crate::infra::{load_scoring_service, AppState};
use crate::routes::churn_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use churn_risk::config::AppConfig;
use churn_risk::error::AppError;
use churn_risk::telemetry;
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

    // Artifacts load exactly once per process; every request shares the
    // resulting immutable scoring state.
    let scoring = Arc::new(load_scoring_service(&config.model)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        scoring,
    };

    let app = churn_router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "churn risk analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
