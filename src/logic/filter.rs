//! Anomaly Filtering
//!
//! Pure predicate evaluation over the record collection. Input order is
//! preserved; display sorting is a separate step.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{AnomalyRecord, FilterCriteria};

/// Returns the records satisfying every active criterion.
///
/// Each predicate is independent: a start date after the end date is not
/// an error, it just admits whatever both bounds allow.
pub fn filter_anomalies(
    records: &[AnomalyRecord],
    criteria: &FilterCriteria,
) -> Vec<AnomalyRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}

fn matches(record: &AnomalyRecord, criteria: &FilterCriteria) -> bool {
    if let Some(anomaly_type) = criteria.anomaly_type {
        if record.anomaly_type != anomaly_type {
            return false;
        }
    }

    if record.confidence < criteria.min_confidence {
        return false;
    }

    // A record without a region never matches an active region filter
    if let Some(region) = criteria.region {
        if record.region != Some(region) {
            return false;
        }
    }

    if let Some(start) = criteria.date_range.start {
        if record.detected_at < start_of_day(start) {
            return false;
        }
    }

    if let Some(end) = criteria.date_range.end {
        if record.detected_at > end_of_day(end) {
            return false;
        }
    }

    true
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The end bound is inclusive of its whole calendar day
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
        .and_utc()
}

/// Stable descending sort by confidence; ties keep their original order.
/// Sorting an already sorted list is a no-op.
pub fn sort_by_confidence_desc(mut records: Vec<AnomalyRecord>) -> Vec<AnomalyRecord> {
    records.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    records
}
