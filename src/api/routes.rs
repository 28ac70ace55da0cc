use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::config::{DEFAULT_MAX_DISTANCE_KM, DEFAULT_TOP_N};
use crate::data::ReferenceData;
use crate::error::AppError;
use crate::location::{normalize_district, resolve_postal_code, PostalResolution, Vocabulary};
use crate::model::PriceModel;
use crate::recommender::{recommend, RecommendRequest};
use crate::sms::handler::sms_reply;
use crate::sms::SessionStore;
use crate::types::RecommendationResult;

#[derive(Clone)]
pub struct ApiState {
    pub reference: Arc<ReferenceData>,
    pub model: Arc<PriceModel>,
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
    pub sessions: Arc<SessionStore>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/pincode/:code", get(get_pincode))
        .route("/recommend", post(post_recommend))
        .route("/stats/latency", get(get_stats_latency))
        .route("/sms", post(sms_reply))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RecommendBody {
    pub commodity: String,
    pub quantity_kg: f64,
    pub origin_district: String,
    pub origin_state: String,
    /// 1-12.
    pub target_month: u32,
    /// Defaults to the current year.
    pub target_year: Option<i32>,
    pub max_distance_km: Option<f64>,
    pub top_n: Option<usize>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub price_rows: usize,
    pub commodities: usize,
    pub districts: usize,
    pub pincodes: usize,
    pub model_trees: usize,
    pub recommendations_served: u64,
    pub sms_handled: u64,
    pub registered_users: usize,
}

#[derive(Serialize)]
pub struct PincodeResponse {
    pub pincode: String,
    pub district: String,
    pub state: String,
    /// Whether the district resolves to a centroid after normalization,
    /// i.e. whether distances can be computed from it.
    pub supported: bool,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub commodity: String,
    pub origin_district: String,
    pub target_month: u32,
    pub target_year: i32,
    pub quantity_kg: f64,
    pub recommendations: Vec<RecommendationResult>,
}

#[derive(Serialize)]
pub struct LatencyResponse {
    pub samples: u64,
    pub p50_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p99_ms: Option<f64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.health.uptime_secs(),
        price_rows: state.reference.prices.len(),
        commodities: state.reference.prices.commodity_count(),
        districts: state.reference.centroids.len(),
        pincodes: state.reference.postal.len(),
        model_trees: state.model.tree_count(),
        recommendations_served: state.health.recommendations_served(),
        sms_handled: state.health.sms_handled(),
        registered_users: state.sessions.registered_count(),
    })
}

async fn get_pincode(
    State(state): State<ApiState>,
    Path(code): Path<String>,
) -> Result<Json<PincodeResponse>, AppError> {
    match resolve_postal_code(&state.reference.postal, &code) {
        PostalResolution::InvalidFormat => Err(AppError::BadRequest(format!(
            "{code} is not a 6-digit pincode"
        ))),
        PostalResolution::NotFound => {
            Err(AppError::BadRequest(format!("pincode {code} not found")))
        }
        PostalResolution::Found { district, state: st } => {
            let canonical = normalize_district(&district, Vocabulary::Centroid);
            let supported = state
                .reference
                .centroids
                .lookup(&canonical, Some(&st))
                .is_some();
            Ok(Json(PincodeResponse {
                pincode: code,
                district,
                state: st,
                supported,
            }))
        }
    }
}

async fn post_recommend(
    State(state): State<ApiState>,
    Json(body): Json<RecommendBody>,
) -> Result<Json<RecommendResponse>, AppError> {
    validate_recommend(&body)?;

    let req = RecommendRequest {
        commodity: body.commodity,
        quantity_kg: body.quantity_kg,
        origin_district: body.origin_district,
        origin_state: body.origin_state,
        target_month: body.target_month,
        target_year: body
            .target_year
            .unwrap_or_else(|| chrono::Utc::now().year()),
        max_distance_km: body.max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
        top_n: body.top_n.unwrap_or(DEFAULT_TOP_N),
    };

    let started = Instant::now();
    let recommendations = recommend(&state.reference, &state.model, &req);
    state.latency.record(started.elapsed());
    state.health.inc_recommendations();

    Ok(Json(RecommendResponse {
        commodity: req.commodity,
        origin_district: req.origin_district,
        target_month: req.target_month,
        target_year: req.target_year,
        quantity_kg: req.quantity_kg,
        recommendations,
    }))
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyResponse> {
    let (p50, p95, p99) = state.latency.percentiles();
    let ms = |us: u64| us as f64 / 1_000.0;
    Json(LatencyResponse {
        samples: state.latency.len(),
        p50_ms: p50.map(ms),
        p95_ms: p95.map(ms),
        p99_ms: p99.map(ms),
    })
}

fn validate_recommend(body: &RecommendBody) -> Result<(), AppError> {
    if body.commodity.trim().is_empty() {
        return Err(AppError::BadRequest("commodity is required".to_string()));
    }
    if body.quantity_kg <= 0.0 || !body.quantity_kg.is_finite() {
        return Err(AppError::BadRequest(format!(
            "quantity_kg must be positive, got {}",
            body.quantity_kg
        )));
    }
    if !(1..=12).contains(&body.target_month) {
        return Err(AppError::BadRequest(format!(
            "target_month must be 1-12, got {}",
            body.target_month
        )));
    }
    if body.origin_district.trim().is_empty() {
        return Err(AppError::BadRequest(
            "origin_district is required".to_string(),
        ));
    }
    Ok(())
}
