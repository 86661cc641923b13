use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLock};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use persona_core::{KnowledgeBase, KnowledgeStatus};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::output::{AnswerReport, Candidate};
use crate::page::{render_no_data, render_page};

const API_CANDIDATES: usize = 3;

/// Shared handle to the current knowledge base. Handlers clone the inner
/// `Arc` and match without holding the lock; reload swaps the pointer.
#[derive(Clone)]
pub struct AppState {
    kb: Arc<RwLock<Arc<KnowledgeBase>>>,
}

impl AppState {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb: Arc::new(RwLock::new(Arc::new(kb))),
        }
    }

    pub fn current(&self) -> Arc<KnowledgeBase> {
        self.kb
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, kb: KnowledgeBase) {
        *self.kb.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(kb);
    }
}

#[derive(Debug, Default, Deserialize)]
struct QueryParams {
    #[serde(default)]
    query: String,
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

async fn index(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Html<String> {
    let kb = state.current();
    let Some(matcher) = kb.matcher() else {
        return Html(render_no_data(&kb));
    };

    let query = params.query.trim();
    if query.is_empty() {
        return Html(render_page("", None));
    }
    let result = matcher.answer(query);
    Html(render_page(query, Some(&result)))
}

async fn api_answer(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Response, ApiError> {
    let kb = state.current();
    let matcher = kb.matcher().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("no data found in {}", kb.source().display()),
        )
    })?;

    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "query is required"));
    }

    let result = matcher.answer(query);
    let report = AnswerReport {
        query,
        result: &result,
        candidates: Some(Candidate::from_scored(
            matcher.top_k(query, API_CANDIDATES),
        )),
    };
    Ok(Json(report).into_response())
}

async fn api_status(State(state): State<AppState>) -> Json<KnowledgeStatus> {
    Json(state.current().status())
}

async fn api_reload(State(state): State<AppState>) -> Result<Json<KnowledgeStatus>, ApiError> {
    let current = state.current();
    let fresh = tokio::task::spawn_blocking(move || current.reload())
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            error!(error = %e, "reload failed, keeping previous knowledge base");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let status = fresh.status();
    state.replace(fresh);
    Ok(Json(status))
}

async fn healthz() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/answer", get(api_answer))
        .route("/api/status", get(api_status))
        .route("/api/reload", post(api_reload))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Binds `addr` and serves in a background task until the returned sender
/// fires or is dropped.
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
) -> anyhow::Result<(SocketAddr, oneshot::Sender<()>, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = router(state);
    let handle = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });

        if let Err(e) = server.await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!(addr = %local, "listening");
    Ok((local, shutdown_tx, handle))
}
