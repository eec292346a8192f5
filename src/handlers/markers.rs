//! Marker projection handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use validator::Validate;

use crate::logic::{
    filter,
    marker::{self, HeatPoint, MarkerStyle},
};
use crate::models::{AnomalyQuery, AnomalyType};
use crate::{AppResult, AppState};

/// One anomaly as the map draws it
#[derive(Debug, Clone, Serialize)]
pub struct MarkerFeature {
    pub id: String,
    pub anomaly_type: AnomalyType,
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: f64,
    pub style: MarkerStyle,
    /// Present only for detections confident enough for the heat overlay
    pub heat: Option<HeatPoint>,
}

/// Markers for the filtered set, in collection order (the map clusters
/// them itself, no display sort is needed)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AnomalyQuery>,
) -> AppResult<Json<Vec<MarkerFeature>>> {
    query.validate()?;

    let records = state.store.snapshot().await;
    let features = filter::filter_anomalies(&records, &query.criteria())
        .into_iter()
        .map(|record| MarkerFeature {
            style: marker::classify_marker(&record),
            heat: marker::heat_point(&record),
            id: record.id,
            anomaly_type: record.anomaly_type,
            latitude: record.latitude,
            longitude: record.longitude,
            confidence: record.confidence,
        })
        .collect();

    Ok(Json(features))
}
