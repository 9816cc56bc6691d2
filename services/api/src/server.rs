use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_chart_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pie_destroyer::config::AppConfig;
use pie_destroyer::error::AppError;
use pie_destroyer::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let evaluation_config = config.evaluation.clone();
    info!(
        max_bad_choices = evaluation_config.max_bad_choices,
        slice_overload_threshold = evaluation_config.slice_overload_threshold,
        "evaluation rules loaded"
    );

    let app = with_chart_routes(evaluation_config)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pie chart destroyer listening");

    axum::serve(listener, app).await?;
    Ok(())
}
