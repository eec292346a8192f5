//! CSV export handler

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::logic::{export, filter};
use crate::models::AnomalyQuery;
use crate::{AppResult, AppState};

/// Download the filtered set as a CSV document
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<AnomalyQuery>,
) -> AppResult<impl IntoResponse> {
    query.validate()?;

    let records = state.store.snapshot().await;
    let filtered = filter::filter_anomalies(&records, &query.criteria());
    let csv = export::to_csv(&filtered);
    let filename = export::export_filename(Utc::now().date_naive());

    tracing::info!("Exported {} anomalies to {}", filtered.len(), filename);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
