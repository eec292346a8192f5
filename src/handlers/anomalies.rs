//! Anomaly handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use validator::Validate;

use crate::logic::{demo, filter};
use crate::models::{AnomalyQuery, AnomalyRecord};
use crate::{AppError, AppResult, AppState};

/// List anomalies matching the filter, most confident first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AnomalyQuery>,
) -> AppResult<Json<Vec<AnomalyRecord>>> {
    query.validate()?;

    let records = state.store.snapshot().await;
    let filtered = filter::filter_anomalies(&records, &query.criteria());
    Ok(Json(filter::sort_by_confidence_desc(filtered)))
}

/// Single anomaly for the detail view
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnomalyRecord>> {
    let record = state
        .store
        .find(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Anomaly not found".to_string()))?;

    Ok(Json(record))
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub count: usize,
    pub server_time: i64,
}

/// Re-seed the store from the demo data source
pub async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    let records = {
        let mut rng = rand::thread_rng();
        demo::generate(state.config.demo_anomaly_count, &mut rng)
    };
    let count = state.store.replace(records).await;
    tracing::info!("Anomaly store re-seeded with {} records", count);

    Json(RefreshResponse {
        count,
        server_time: chrono::Utc::now().timestamp(),
    })
}
