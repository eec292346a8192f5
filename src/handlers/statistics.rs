//! Statistics handlers

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::logic::{filter, stats};
use crate::models::{AnomalyQuery, Statistics};
use crate::{AppResult, AppState};

/// Dashboard counters for the filtered set
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<AnomalyQuery>,
) -> AppResult<Json<Statistics>> {
    query.validate()?;

    let records = state.store.snapshot().await;
    let filtered = filter::filter_anomalies(&records, &query.criteria());
    Ok(Json(stats::aggregate(&filtered)))
}
