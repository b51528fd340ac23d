//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum app with a catch-all route into the template router
//! - Wire up middleware (tracing, timeout, request IDs)
//! - Short-circuit CORS preflight for every path
//! - Guard file routes to GET
//! - Catch every pipeline failure and render it as a structured error

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::cache::ResponseCache;
use crate::config::ProxyConfig;
use crate::github::OriginClient;
use crate::handlers;
use crate::http::error::{ErrorKind, ProxyError};
use crate::http::headers::apply_cors;
use crate::observability::metrics;
use crate::routing::{HandlerKind, RouteTable};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub routes: Arc<RouteTable>,
    pub origin: OriginClient,
    pub cache: Arc<ResponseCache>,
}

/// HTTP server for the raw-content proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::standard()),
            origin: OriginClient::new(config.github.raw_base_url.clone()),
            cache: Arc::new(ResponseCache::new()),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Top-level dispatch: preflight, template routing, method guard, error
/// boundary. Nothing escapes this function unshaped.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Preflight answers for every path, matched or not.
    if method == Method::OPTIONS {
        metrics::record_request(method.as_str(), 204, "preflight", start);
        return preflight_response();
    }

    let matched = state.routes.match_path(&path, request.uri().query());
    let route_label = match &matched {
        Some((HandlerKind::Files, _)) => "files",
        Some((HandlerKind::Favicon | HandlerKind::FaviconRedirect, _)) => "favicon",
        None => "index",
    };

    tracing::debug!(
        method = %method,
        path = %path,
        route = route_label,
        "Dispatching request"
    );

    let response = match matched {
        Some((HandlerKind::Files, params)) => {
            if method != Method::GET {
                ProxyError::with_details(ErrorKind::BadRequest, method.to_string())
                    .into_response()
            } else {
                let cache_key = request
                    .uri()
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| path.clone());
                let accept_encoding = request
                    .headers()
                    .get(header::ACCEPT_ENCODING)
                    .and_then(|v| v.to_str().ok());

                handlers::file::handle_file_request(&state, &params, cache_key, accept_encoding)
                    .await
                    .unwrap_or_else(|error| error.into_response())
            }
        }
        Some((HandlerKind::Favicon, _)) => handlers::favicon::handle_favicon(),
        Some((HandlerKind::FaviconRedirect, _)) => handlers::favicon::handle_favicon_redirect(),
        None => handlers::index::handle_index(&state.config.github),
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), route_label, start);
    response
}

/// 204 with the CORS policy and no body.
fn preflight_response() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_cors(response.headers_mut());
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
