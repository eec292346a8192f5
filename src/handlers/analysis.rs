//! On-demand analysis handler (demo)
//!
//! Stands in for a real detection run: synthesizes one fresh anomaly near
//! the map center and pushes it to the front of the feed.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::demo;
use crate::models::AnomalyRecord;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub status: &'static str,
    pub anomaly: AnomalyRecord,
    pub total: usize,
    pub server_time: i64,
}

pub async fn run(State(state): State<AppState>) -> Json<AnalysisResponse> {
    let record = {
        let mut rng = rand::thread_rng();
        demo::generate_live(&mut rng)
    };
    state.store.prepend(record.clone()).await;
    let total = state.store.len().await;

    tracing::info!(
        "Analysis run flagged {} ({}, severity {}, region {}) at {:.4}, {:.4}",
        record.id,
        record.anomaly_type,
        record.severity,
        record.region.map(|r| r.as_str()).unwrap_or("unset"),
        record.latitude,
        record.longitude
    );

    Json(AnalysisResponse {
        status: "completed",
        anomaly: record,
        total,
        server_time: chrono::Utc::now().timestamp(),
    })
}
