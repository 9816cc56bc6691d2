use super::changes::OptionChange;
use super::domain::OptionSet;
use super::evaluation::{DerivedReport, EvaluationConfig, EvaluationEngine};
use super::export::{CaptureSettings, CapturedImage, SurfaceCapture, SvgCapture};
use super::query;
use super::render::ChartSpec;
use super::session::ChartSession;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Stateless chart endpoints. Every request carries its full option set in the query.
pub fn chart_router(config: EvaluationConfig) -> Router {
    Router::new()
        .route("/api/v1/chart/report", get(report_handler))
        .route("/api/v1/chart/spec", get(spec_handler))
        .route("/api/v1/chart/image.svg", get(image_handler))
        .route("/api/v1/chart/changes", post(changes_handler))
        .with_state(Arc::new(config))
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartReportView {
    pub options: OptionSet,
    pub query: String,
    pub report: DerivedReport,
}

impl ChartReportView {
    pub fn from_session(session: &ChartSession) -> Self {
        Self::new(session.options().clone(), session.report().clone())
    }

    fn new(options: OptionSet, report: DerivedReport) -> Self {
        Self {
            query: query::to_query_string(&options),
            options,
            report,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub changes: Vec<String>,
}

type QueryPairs = Query<Vec<(String, String)>>;

async fn report_handler(
    State(config): State<Arc<EvaluationConfig>>,
    Query(pairs): QueryPairs,
) -> axum::Json<ChartReportView> {
    let options = query::from_pairs(pairs);
    let report = EvaluationEngine::new(config.as_ref().clone()).derive(&options, Utc::now());
    axum::Json(ChartReportView::new(options, report))
}

async fn spec_handler(Query(pairs): QueryPairs) -> axum::Json<ChartSpec> {
    let options = query::from_pairs(pairs);
    let chart = ChartSpec::build(&options, &mut rand::rng());
    axum::Json(chart)
}

async fn image_handler(Query(pairs): QueryPairs) -> Response {
    let options = query::from_pairs(pairs);
    let chart = ChartSpec::build(&options, &mut rand::rng());

    match SvgCapture.capture(&chart, &CaptureSettings::default()) {
        Ok(image) => image_response(image),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn image_response(image: CapturedImage) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", image.file_name());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, image.mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes,
    )
        .into_response()
}

async fn changes_handler(
    State(config): State<Arc<EvaluationConfig>>,
    axum::Json(request): axum::Json<ChangeRequest>,
) -> Response {
    let mut session = ChartSession::from_query(config.as_ref().clone(), &request.query);

    for (index, raw) in request.changes.iter().enumerate() {
        let change = match raw.parse::<OptionChange>() {
            Ok(change) => change,
            Err(err) => {
                let payload = json!({
                    "error": err.to_string(),
                    "change_index": index,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        };

        if let Err(err) = session.apply(change) {
            info!(change = %raw, "option change rejected by budget");
            let payload = json!({
                "error": err.to_string(),
                "change_index": index,
                "current": ChartReportView::from_session(&session),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    }

    let view = ChartReportView::from_session(&session);
    (StatusCode::OK, axum::Json(view)).into_response()
}
