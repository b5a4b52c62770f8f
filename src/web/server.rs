use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::search::{
    dangerous_by_severity, group_symptoms, search_interactions, search_products,
    InteractionCategory,
};
use crate::catalog::store::ReferenceData;
use crate::cli::ServeArgs;
use crate::core::guide::{GuideSection, STROKE_FAST};
use crate::core::types::ConditionId;
use crate::matching::engine::{MatchingConfig, MatchingEngine, DEFAULT_MAX_RESULTS};
use crate::utils::validation::{validate_query, validate_symptom_tokens, ValidationError};

/// Largest accepted request body; triage requests are small JSON documents
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Upper bound on the `limit` field of a triage request
pub const MAX_TRIAGE_LIMIT: usize = 10;

/// Shared application state
pub struct AppState {
    pub data: ReferenceData,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Deserialize)]
pub struct TriageRequest {
    pub symptoms: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
struct CategoryParams {
    category: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Deserialize)]
struct InteractionParams {
    category: Option<String>,
    q: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    (
        status,
        Json(create_safe_error_response(error_type, message, None)),
    )
        .into_response()
}

fn not_found(what: &str, id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "not_found",
        &format!("{what} '{id}' not found"),
    )
}

fn invalid_input(err: &ValidationError) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.kind(), &err.to_string())
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs, data: ReferenceData) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, data).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting needs the peer address, so it is added by the server itself.
pub fn create_router(data: ReferenceData) -> Router {
    let state = Arc::new(AppState { data });

    Router::new()
        .route("/", get(index_handler))
        .route("/api/symptoms", get(symptoms_handler))
        .route("/api/triage", post(triage_handler))
        .route("/api/conditions", get(conditions_handler))
        .route("/api/conditions/{id}", get(condition_handler))
        .route("/api/korean-medicine", get(korean_search_handler))
        .route("/api/korean-medicine/{id}", get(korean_product_handler))
        .route("/api/interactions", get(interactions_handler))
        .route("/api/emergency", get(emergency_handler))
        .route("/api/emergency/{section}", get(emergency_section_handler))
        .route("/api/safety", get(safety_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, data: ReferenceData) -> anyhow::Result<()> {
    // IP-based rate limiting: 10 requests per second, bursts of 50
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = create_router(data).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting medlink web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!("Could not open browser: {e}");
        }
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Landing page listing the endpoints
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

async fn symptoms_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> Response {
    if let Some(category) = &params.category {
        if let Err(e) = validate_query(category) {
            return invalid_input(&e);
        }
    }

    let groups = group_symptoms(&state.data.symptoms, params.category.as_deref());
    let count: usize = groups.iter().map(|g| g.symptoms.len()).sum();

    Json(serde_json::json!({
        "count": count,
        "categories": groups,
    }))
    .into_response()
}

async fn triage_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TriageRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!("Rejected triage request: {rejection}");
            return error_response(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Request body must be JSON like {\"symptoms\": [\"fever\"]}",
            );
        }
    };

    if let Err(e) = validate_symptom_tokens(&request.symptoms) {
        return invalid_input(&e);
    }

    let data = &state.data;
    let selection = data.resolve_selection(&request.symptoms);

    let config = MatchingConfig {
        max_results: request
            .limit
            .unwrap_or(DEFAULT_MAX_RESULTS)
            .clamp(1, MAX_TRIAGE_LIMIT),
        ..MatchingConfig::default()
    };
    let engine = MatchingEngine::with_config(&data.conditions, config);
    let report = engine.triage(&selection.ids);

    let symptoms: Vec<serde_json::Value> = selection
        .resolved
        .iter()
        .filter_map(|id| data.symptom(id))
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "name_en": s.display_name_en,
                "name_ko": s.display_name_ko,
            })
        })
        .collect();

    let matches: Vec<serde_json::Value> = report
        .matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "condition": {
                    "id": m.condition.id.0,
                    "name_en": m.condition.name_en,
                    "name_ko": m.condition.name_ko,
                    "description_en": m.condition.description_en,
                    "description_ko": m.condition.description_ko,
                },
                "score": m.score.score,
                "likelihood": m.score.likelihood,
                "matched_symptoms": m.score.matched_symptoms,
                "red_flag": m.red_flag,
                "otc_options": m.condition.otc_options,
                "care_pathway": m.condition.care_pathway,
            })
        })
        .collect();

    Json(serde_json::json!({
        "symptoms": symptoms,
        "unrecognized": selection.unrecognized,
        "banner": report.banner,
        "matches": matches,
        "disclaimer": data.safety.disclaimer,
    }))
    .into_response()
}

async fn conditions_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let conditions: Vec<serde_json::Value> = state
        .data
        .conditions
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id.0,
                "name_en": c.name_en,
                "name_ko": c.name_ko,
                "category": c.category,
                "symptom_count": c.symptom_weights.len(),
                "self_care_ok": c.care_pathway.self_care_ok,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": conditions.len(),
        "conditions": conditions,
    }))
}

async fn condition_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.data.condition(&ConditionId::new(id.as_str())) {
        Some(condition) => Json(condition).into_response(),
        None => not_found("Condition", &id),
    }
}

async fn korean_search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.as_deref().unwrap_or("");
    if let Err(e) = validate_query(query) {
        return invalid_input(&e);
    }

    let products = search_products(&state.data.korean_products, query);
    Json(serde_json::json!({
        "count": products.len(),
        "products": products,
    }))
    .into_response()
}

async fn korean_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.data.korean_product(&id) {
        Some(product) => Json(product).into_response(),
        None => not_found("Korean product", &id),
    }
}

async fn interactions_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InteractionParams>,
) -> Response {
    let interactions = &state.data.interactions;

    let category = match params.category.as_deref() {
        None | Some("") => None,
        Some(raw) => match InteractionCategory::parse(raw) {
            Some(category) => Some(category),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_category",
                    "Category must be one of: dangerous, beneficial, supplements, timing",
                )
            }
        },
    };

    if let Some(query) = params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        if let Err(e) = validate_query(query) {
            return invalid_input(&e);
        }
        let mut hits = search_interactions(interactions, query);
        if let Some(category) = category {
            if category != InteractionCategory::Dangerous {
                hits.dangerous.clear();
            }
            if category != InteractionCategory::Beneficial {
                hits.beneficial.clear();
            }
            if category != InteractionCategory::Supplements {
                hits.supplements.clear();
            }
        }
        return Json(serde_json::json!({
            "query": query,
            "count": hits.len(),
            "results": hits,
        }))
        .into_response();
    }

    let body = match category {
        Some(InteractionCategory::Dangerous) => serde_json::json!({
            "category": InteractionCategory::Dangerous,
            "entries": dangerous_by_severity(interactions),
        }),
        Some(InteractionCategory::Beneficial) => serde_json::json!({
            "category": InteractionCategory::Beneficial,
            "entries": interactions.beneficial_combinations,
        }),
        Some(InteractionCategory::Supplements) => serde_json::json!({
            "category": InteractionCategory::Supplements,
            "entries": interactions.supplement_interactions,
        }),
        Some(InteractionCategory::Timing) => serde_json::json!({
            "category": InteractionCategory::Timing,
            "timing_guidelines": interactions.timing_guidelines,
            "general_timing_tips": interactions.general_timing_tips,
        }),
        None => {
            let categories: Vec<serde_json::Value> = InteractionCategory::ALL
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "category": c,
                        "title": c.title(),
                        "count": c.count(interactions),
                    })
                })
                .collect();
            serde_json::json!({
                "categories": categories,
                "quick_safety_tips": interactions.quick_safety_tips,
            })
        }
    };

    Json(body).into_response()
}

async fn emergency_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "guide": state.data.emergency,
        "stroke_fast": STROKE_FAST,
    }))
}

async fn emergency_section_handler(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Response {
    match GuideSection::parse(&section) {
        Some(s) => Json(state.data.emergency.section(s)).into_response(),
        None => not_found("Emergency guide section", &section),
    }
}

async fn safety_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.data.safety).into_response()
}
