//! HTTP handlers
//!
//! Bodies are taken as raw bytes and decoded by the service so that any
//! content type is accepted and decode failures surface as 400 with the
//! decoder's message.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::debug;

use crate::bridge::service::{BridgeService, IngestStatus};
use crate::common::types::{ErrorResponse, StatusResponse};

/// Service handle shared by all handlers
pub type SharedService = Arc<BridgeService>;

/// Build the bridge router
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/log_trade", post(log_trade))
        .route("/mt5/get_trade", get(get_trade))
        .route("/mt5/trade_result", post(trade_result))
        .route("/health", get(health))
        .with_state(service)
}

async fn log_trade(State(service): State<SharedService>, body: Bytes) -> Response {
    let result = service.ingest(&body);
    debug!(status = ?IngestStatus::from(&result), "POST /log_trade");

    match result {
        Ok(_) => Json(StatusResponse::success()).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_trade(State(service): State<SharedService>) -> Response {
    match service.next_trade() {
        Some(trade) => Json(trade).into_response(),
        None => Json(StatusResponse::no_trade()).into_response(),
    }
}

async fn trade_result(State(service): State<SharedService>, body: Bytes) -> Response {
    match service.record_trade_result(&body) {
        Ok(_) => Json(StatusResponse::success()).into_response(),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid JSON")),
        )
            .into_response(),
    }
}

async fn health(State(service): State<SharedService>) -> Response {
    Json(service.health()).into_response()
}
