use crate::cli::ServeArgs;
use crate::infra::{AppState, CannedChatBackend, InMemoryLeadStore, StaticJobBoard};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use carelead::admin::AdminService;
use carelead::config::AppConfig;
use carelead::error::AppError;
use carelead::intake::IntakeService;
use carelead::telemetry;
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

    let store = Arc::new(InMemoryLeadStore::default());
    let intake_service = Arc::new(IntakeService::new(
        store.clone(),
        Arc::new(StaticJobBoard::seeded()),
        config.intake.clone(),
    ));
    let admin_service = Arc::new(AdminService::new(store.clone(), store));
    let chat_backend = Arc::new(CannedChatBackend::default());

    let app = with_service_routes(intake_service, admin_service, chat_backend)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
