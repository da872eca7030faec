use axum::{extract::{Path, Query, State}, http::{HeaderMap, HeaderValue, StatusCode}, routing::{get, post}, Json, Router};
use irs_core::config::{DEFAULT_TOP_N, MAX_TOP_N};
use irs_core::shared::IndexStats;
use irs_core::{DocId, IrError, SharedIrSystem};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_N }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    /// Documents matching at least one query term, before the top-k cut.
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f64,
    pub title: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: DocId,
    pub title: String,
    pub url: String,
    pub word_count: u32,
}

#[derive(Deserialize)]
pub struct IndexRequest {
    pub text: String,
    pub url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub system: SharedIrSystem,
    pub admin_token: Option<String>,
}

pub fn build_app(system: SharedIrSystem, admin_token: Option<String>) -> Router {
    let app_state = AppState { system, admin_token };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .route("/index", post(index_handler))
        .with_state(app_state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// CORS_ALLOW_ORIGIN is a comma-separated origin list; unset or unparsable means any origin.
fn cors_layer() -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, MAX_TOP_N);

    // one read guard so every returned id resolves against the same snapshot
    let sys = state.system.read();
    let (hits, total_hits) = sys.query_with_total(&params.q, k);
    let results = hits
        .into_iter()
        .filter_map(|(score, doc_id)| {
            let doc = sys.document(doc_id)?;
            Some(SearchHit { doc_id, score, title: doc.title.clone(), url: doc.url.clone() })
        })
        .collect();
    drop(sys);

    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, total_hits, took_s, "search");
    Json(SearchResponse { query: params.q, took_s, total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<DocResponse>, (StatusCode, String)> {
    match state.system.document(doc_id) {
        Some(doc) => Ok(Json(DocResponse { doc_id, title: doc.title, url: doc.url, word_count: doc.word_count })),
        None => Err((StatusCode::NOT_FOUND, format!("document {doc_id} not found"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.system.stats())
}

async fn index_handler(State(state): State<AppState>, headers: HeaderMap, Json(req): Json<IndexRequest>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    match state.system.index_document(&req.text, &req.url) {
        Ok(doc_id) => {
            tracing::info!(doc_id, url = %req.url, "indexed document via api");
            Ok(Json(serde_json::json!({ "doc_id": doc_id })))
        }
        Err(e @ IrError::MalformedDocument { .. }) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
