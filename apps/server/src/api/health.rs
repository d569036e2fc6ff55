use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::{main_lib::AppState, models::HealthStatus};

async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/healthz", get(healthz))
}
