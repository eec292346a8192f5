//! Statistics Aggregation
//!
//! Single pass over an already-filtered set. Recomputed on every filter
//! change, never cached.

use chrono::{NaiveDate, Utc};

use crate::models::{AnomalyRecord, Severity, Statistics, TypeCounts};

/// Aggregate against the current UTC calendar day.
pub fn aggregate(records: &[AnomalyRecord]) -> Statistics {
    aggregate_at(records, Utc::now().date_naive())
}

/// Aggregate with an explicit "today", so the day boundary is testable.
///
/// An empty set produces all zeros with an average of 0, not NaN.
pub fn aggregate_at(records: &[AnomalyRecord], today: NaiveDate) -> Statistics {
    let mut today_count = 0usize;
    let mut high_risk = 0usize;
    let mut confidence_sum = 0.0f64;
    let mut by_type = TypeCounts::default();

    for record in records {
        confidence_sum += record.confidence;
        if record.detected_at.date_naive() == today {
            today_count += 1;
        }
        if record.severity == Severity::High {
            high_risk += 1;
        }
        by_type.increment(record.anomaly_type);
    }

    let total = records.len();
    let avg_confidence = if total == 0 {
        0
    } else {
        (confidence_sum / total as f64 * 100.0).round() as u32
    };

    Statistics {
        total,
        today: today_count,
        avg_confidence,
        high_risk,
        by_type,
    }
}
