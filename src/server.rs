use crate::app::{PriceUseCase, ScreenUseCase};
use crate::error::ScreenerError;
use crate::screener::ScreenParams;
use axum::{
    body::Bytes,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Everything the handlers share.
pub struct AppState {
    pub screen: ScreenUseCase,
    pub price: PriceUseCase,
    pub product_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PriceParams {
    url: Option<String>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "tv-screener",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Runs the screen and returns the normalized rows. A missing or unparsable
/// body means default thresholds.
async fn tradingview(Extension(state): Extension<Arc<AppState>>, body: Bytes) -> Response {
    let params: ScreenParams = serde_json::from_slice(&body).unwrap_or_default();
    let query = params.screen_query();

    match state.screen.run(&query).await {
        Ok(value) => Json(value).into_response(),
        Err(ScreenerError::Normalize(e)) => {
            error!("Screen output is malformed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string(), "content": e.raw_text() })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Screen failed: {}", e);
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

async fn price(Extension(state): Extension<Arc<AppState>>, body: Bytes) -> Response {
    let params: PriceParams = serde_json::from_slice(&body).unwrap_or_default();
    let url = params.url.unwrap_or_else(|| state.product_url.clone());

    let report = state.price.check(&url).await;
    let status = StatusCode::from_u16(report.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(report)).into_response()
}

/// Create the HTTP server with all routes
pub fn create_server(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tradingview", post(tradingview))
        .route("/price", post(price))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified address
pub async fn start_server(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_server(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("HTTP server running on http://{}", addr);
    info!("Screen: POST http://{}/tradingview", addr);

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
