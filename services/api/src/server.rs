use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryChurchStore, InMemoryRatingRepository};
use crate::routes::with_rating_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use church_crm::config::AppConfig;
use church_crm::error::AppError;
use church_crm::telemetry;
use church_crm::visits::VisitRatingService;
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

    let repository = Arc::new(InMemoryRatingRepository::default());
    let churches = Arc::new(InMemoryChurchStore::default());
    let rating_service = Arc::new(VisitRatingService::new(
        repository,
        churches,
        config.rating.clone(),
    ));

    let app = with_rating_routes(rating_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        thresholds = ?config.rating.thresholds().breakpoints(),
        "church visit rating service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
