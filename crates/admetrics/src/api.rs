use std::sync::Arc;

use admetrics_core::bucket::Bucket;
use admetrics_core::dataset::{DateBounds, Dataset, FilterDefaults};
use admetrics_core::error::FilterError;
use admetrics_core::filter::{FilterRequest, FilterSpec};
use admetrics_core::report::{build_report, DashboardReport, ReportOptions};
use admetrics_core::summary::CampaignRanking;
use admetrics_core::Platform;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

/// Shared by every request. The dataset is never mutated after load, so no locking.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub defaults: FilterDefaults,
    pub options: ReportOptions,
}

impl AppState {
    pub fn new(dataset: Dataset, defaults: FilterDefaults, options: ReportOptions) -> Self {
        Self {
            dataset: Arc::new(dataset),
            defaults,
            options,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("invalid value '{value}' for '{name}'")]
    InvalidParameter { name: &'static str, value: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self, "rejected dashboard query");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/dashboard", get(dashboard))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// What the filter controls can offer, plus the selection used when nothing is chosen.
#[derive(Debug, Serialize)]
pub struct DashboardOptions {
    pub date_bounds: Option<DateBounds>,
    pub regions: Vec<String>,
    pub platforms: Vec<Platform>,
    pub buckets: Vec<Bucket>,
    pub default_filter: Option<FilterSpec>,
}

async fn options(State(state): State<AppState>) -> Json<DashboardOptions> {
    let dataset = &state.dataset;
    Json(DashboardOptions {
        date_bounds: dataset.date_bounds(),
        regions: dataset.regions().to_vec(),
        platforms: Platform::ALL.to_vec(),
        buckets: Bucket::ALL.to_vec(),
        default_filter: dataset.default_filter(&state.defaults),
    })
}

/// Query string of `/api/dashboard`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(flatten)]
    pub filter: FilterRequest,
    pub ranking: Option<String>,
    pub top: Option<String>,
}

impl DashboardQuery {
    fn report_options(&self, base: ReportOptions) -> Result<ReportOptions, ApiError> {
        let mut options = base;
        if let Some(value) = &self.ranking {
            options.campaign_ranking = value.parse::<CampaignRanking>()?;
        }
        if let Some(value) = &self.top {
            options.top_campaigns =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::InvalidParameter {
                        name: "top",
                        value: value.clone(),
                    })?;
        }
        Ok(options)
    }
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardReport>, ApiError> {
    let spec = query.filter.resolve(&state.dataset, &state.defaults)?;
    let options = query.report_options(state.options)?;

    let report = build_report(&state.dataset, &spec, &options);
    info!(
        start = %spec.date_start(),
        end = %spec.date_end(),
        bucket = %spec.bucket(),
        trend_rows = report.trend.len(),
        "served dashboard"
    );
    Ok(Json(report))
}
