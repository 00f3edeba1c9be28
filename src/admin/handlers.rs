use axum::{extract::State, Json};
use serde::Serialize;

use crate::cart::CartStats;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub backend_url: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let runtime = state.runtime();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.started_at.elapsed().as_secs(),
        backend_url: runtime.backend.base_url().to_string(),
    })
}

pub async fn get_carts(State(state): State<AppState>) -> Json<CartStats> {
    Json(state.carts.stats())
}
