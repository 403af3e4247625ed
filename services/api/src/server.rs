use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::menu_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use macro_menu::config::AppConfig;
use macro_menu::error::AppError;
use macro_menu::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(artifact) = args.artifact.take() {
        config.menu.artifact_path = artifact;
    }

    telemetry::init(&config.telemetry)?;

    if !config.menu.artifact_path.exists() {
        warn!(
            artifact = %config.menu.artifact_path.display(),
            "web artifact not found yet; /data/items answers 404 until the runner writes it"
        );
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        artifact_path: Arc::new(config.menu.artifact_path.clone()),
    };

    let app = menu_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        artifact = %config.menu.artifact_path.display(),
        "menu viewer ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
