//! Fake completion service for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /autocomplete/tab_artist?query=...` with canned
//! replies keyed by the decoded `query` value, and records every request so
//! tests can assert on what was (or was not) sent.
//!
//! Unknown queries get `{"match": ""}`, which is what the quiz server sends
//! when nothing matches.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeCompletionApi::start().await.unwrap();
//! api.reply("Doors", Reply::json(r#"{"match": "The Doors"}"#)).await;
//! let client = HttpCompletionClient::new(&service_config(&api.base_url())).unwrap();
//! ```

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const TAB_ARTIST_PATH: &str = "/autocomplete/tab_artist";

/// What the fake answers for a given query.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a JSON body.
    Json(serde_json::Value),
    /// Bare status code with an empty body.
    Status(u16),
    /// 200 with a body that is not JSON.
    Raw(&'static str),
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Reply::Json(serde_json::from_str(body).expect("test reply must be valid JSON"))
    }
}

/// One request as the fake saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub query: Option<String>,
    pub accept: Option<String>,
    pub cookie: Option<String>,
}

#[derive(Default)]
struct ApiState {
    replies: HashMap<String, Reply>,
    requests: Vec<RecordedRequest>,
}

/// Handle to the running fake completion server.
pub struct FakeCompletionApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeCompletionApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route(TAB_ARTIST_PATH, get(tab_artist))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `query` with `reply` from now on.
    pub async fn reply(&self, query: &str, reply: Reply) {
        self.state.lock().await.replies.insert(query.to_string(), reply);
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

/// Reserve a localhost port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn tab_artist(
    State(state): State<Arc<Mutex<ApiState>>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let query = params.get("query").cloned();

    let reply = {
        let mut state = state.lock().await;
        state.requests.push(RecordedRequest {
            query: query.clone(),
            accept: header_str(header::ACCEPT),
            cookie: header_str(header::COOKIE),
        });
        query.as_deref().and_then(|q| state.replies.get(q).cloned())
    };

    match reply.unwrap_or_else(|| Reply::json(r#"{"match": ""}"#)) {
        Reply::Json(body) => axum::Json(body).into_response(),
        Reply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Reply::Raw(body) => (StatusCode::OK, body).into_response(),
    }
}
