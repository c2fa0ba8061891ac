use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryLeadRepository, LoggingAlertPublisher, SeededReferenceCatalog,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use solar_ops::config::AppConfig;
use solar_ops::error::AppError;
use solar_ops::telemetry;
use solar_ops::workflows::leads::LeadQualificationService;
use solar_ops::workflows::proposals::ProposalService;
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

    let repository = Arc::new(InMemoryLeadRepository::default());
    let alerts = Arc::new(LoggingAlertPublisher::default());
    let lead_service = Arc::new(LeadQualificationService::new(repository, alerts));

    let catalog = Arc::new(SeededReferenceCatalog::default());
    let proposal_service = Arc::new(ProposalService::new(catalog));

    let app = with_service_routes(lead_service, proposal_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "solar sales platform ready");

    axum::serve(listener, app).await?;
    Ok(())
}
