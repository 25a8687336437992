use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::get;
use axum::Json;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::config::EndpointConfig;
use crate::protocol::{ActionResult, handle_body};

/// Shared state for the HTTP transport
#[derive(Clone)]
struct AppState {
    config: Arc<EndpointConfig>,
    /// Held for the whole of each dispatch, so the quota check and the write
    /// that follows it cannot interleave with another request
    dir_lock: Arc<Mutex<()>>,
}

pub struct Server {
    listener: TcpListener,
    config: Arc<EndpointConfig>,
}

impl Server {
    pub async fn bind(config: EndpointConfig, addr: &str) -> std::io::Result<Self> {
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("Server bound to {}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", addr, e);
                return Err(e);
            }
        };

        super::prepare_root(&config);

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    pub async fn start(self) -> std::io::Result<()> {
        info!(
            "Starting filedesk on {} (root {})",
            self.listener.local_addr()?,
            self.config.root().display()
        );

        axum::serve(self.listener, router(self.config)).await
    }
}

/// Builds the HTTP router: `GET /` and `POST /` with permissive CORS.
pub fn router(config: Arc<EndpointConfig>) -> Router {
    let state = AppState {
        config,
        dir_lock: Arc::new(Mutex::new(())),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(handle_get).post(handle_post))
        .layer(cors)
        .with_state(state)
}

/// A GET carries no request, so it resolves to the unknown task
async fn handle_get(State(state): State<AppState>) -> Json<ActionResult> {
    Json(dispatch(state, None).await)
}

async fn handle_post(State(state): State<AppState>, body: Bytes) -> Json<ActionResult> {
    Json(dispatch(state, Some(body)).await)
}

async fn dispatch(state: AppState, body: Option<Bytes>) -> ActionResult {
    let _guard = state.dir_lock.lock().await;
    let config = Arc::clone(&state.config);

    tokio::task::spawn_blocking(move || handle_body(&config, body.as_deref()))
        .await
        .unwrap_or_else(|e| {
            error!("Request handler panicked: {}", e);
            ActionResult::error(format!("Request handler failed: {e}"))
        })
}
