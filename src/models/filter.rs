//! Filter criteria

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::anomaly::{AnomalyType, Region};

/// Inclusive calendar-date window. The end date covers its whole day:
/// it is widened to 23:59:59.999 before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// What the user currently filters by. Owned by the caller and passed
/// to the engine by reference; the default value restricts nothing.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub anomaly_type: Option<AnomalyType>,
    /// Inclusive lower bound on confidence
    pub min_confidence: f64,
    pub region: Option<Region>,
    pub date_range: DateRange,
}

/// Query parameters shared by the anomaly, marker, statistics and export
/// endpoints. Unknown `anomaly_type`/`region` values are rejected at
/// deserialization rather than treated as a silent non-match.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnomalyQuery {
    pub anomaly_type: Option<AnomalyType>,
    #[serde(default = "default_min_confidence")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_confidence: f64,
    pub region: Option<Region>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Dashboard default: the confidence slider starts at 50%
fn default_min_confidence() -> f64 {
    0.5
}

impl AnomalyQuery {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            anomaly_type: self.anomaly_type,
            min_confidence: self.min_confidence,
            region: self.region,
            date_range: DateRange {
                start: self.start_date,
                end: self.end_date,
            },
        }
    }
}
