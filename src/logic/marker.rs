//! Marker Classification
//!
//! Deterministic mapping from a record to its map presentation: color and
//! icon come from the category, size from the confidence tier. The
//! thresholds are business rules, not rendering detail; the dashboard
//! consumes the result as plain data.

use serde::Serialize;

use super::rules::{
    HEAT_OVERLAY_MIN, HEAT_RADIUS_SCALE_M, HIGH_CONFIDENCE, MARKER_SIZE_LARGE,
    MARKER_SIZE_MEDIUM, MARKER_SIZE_SMALL, MEDIUM_CONFIDENCE,
};
use crate::models::AnomalyRecord;

/// Discrete marker size tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub fn pixels(&self) -> u32 {
        match self {
            SizeTier::Small => MARKER_SIZE_SMALL,
            SizeTier::Medium => MARKER_SIZE_MEDIUM,
            SizeTier::Large => MARKER_SIZE_LARGE,
        }
    }
}

/// How a single anomaly is drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub icon: &'static str,
    pub size_tier: SizeTier,
    pub size_px: u32,
}

/// One circle of the heat overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub color: &'static str,
    pub radius_m: f64,
}

pub fn size_tier(confidence: f64) -> SizeTier {
    if confidence > HIGH_CONFIDENCE {
        SizeTier::Large
    } else if confidence > MEDIUM_CONFIDENCE {
        SizeTier::Medium
    } else {
        SizeTier::Small
    }
}

pub fn classify_marker(record: &AnomalyRecord) -> MarkerStyle {
    let tier = size_tier(record.confidence);
    MarkerStyle {
        color: record.anomaly_type.color(),
        icon: record.anomaly_type.icon(),
        size_tier: tier,
        size_px: tier.pixels(),
    }
}

/// Only sufficiently confident detections feed the heat overlay.
pub fn heat_point(record: &AnomalyRecord) -> Option<HeatPoint> {
    if record.confidence <= HEAT_OVERLAY_MIN {
        return None;
    }
    Some(HeatPoint {
        color: heat_color(record.confidence),
        radius_m: record.confidence * HEAT_RADIUS_SCALE_M,
    })
}

fn heat_color(intensity: f64) -> &'static str {
    if intensity > HIGH_CONFIDENCE {
        "#e74c3c"
    } else if intensity > MEDIUM_CONFIDENCE {
        "#f39c12"
    } else {
        "#f1c40f"
    }
}
