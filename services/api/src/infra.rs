use metrics_exporter_prometheus::PrometheusHandle;
use pie_destroyer::chart::{OptionChange, OptionChangeError};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// clap value parser for `--set key=value`.
pub(crate) fn parse_change(raw: &str) -> Result<OptionChange, String> {
    raw.parse()
        .map_err(|err: OptionChangeError| format!("failed to parse '{raw}' ({err})"))
}
