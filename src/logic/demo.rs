//! Demo Data Source
//!
//! Stands in for the detection backend: synthesizes plausible anomaly
//! records over the monitored territory. Callers supply the RNG so tests
//! can seed it.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use super::rules::severity_for;
use crate::models::{AnomalyRecord, AnomalyType, Region};

/// Default view center of the dashboard map (Moscow)
pub const MAP_CENTER: (f64, f64) = (55.7558, 37.6173);

/// Detections are spread over the trailing week
const DETECTION_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Generate `count` demo records across the monitored territory:
/// latitudes 45..65, longitudes 30..110, confidence 60..99%.
pub fn generate(count: usize, rng: &mut impl Rng) -> Vec<AnomalyRecord> {
    (0..count)
        .map(|i| {
            let anomaly_type = AnomalyType::ALL[rng.gen_range(0..AnomalyType::ALL.len())];
            let confidence = rng.gen_range(60..100) as f64 / 100.0;

            AnomalyRecord {
                id: format!("demo-{}", i + 1),
                anomaly_type,
                confidence,
                latitude: rng.gen_range(45.0..65.0),
                longitude: rng.gen_range(30.0..110.0),
                detected_at: Utc::now()
                    - Duration::milliseconds(rng.gen_range(0..DETECTION_WINDOW_MS)),
                description: description_for(anomaly_type).to_string(),
                severity: severity_for(confidence),
                region: Some(Region::ALL[rng.gen_range(0..Region::ALL.len())]),
                area: format!("{} ha", rng.gen_range(5..55)),
            }
        })
        .collect()
}

/// Synthesize one fresh detection near the map center, as produced by an
/// on-demand analysis run. Confidence starts at 70% so the result is
/// always visible above the default slider position.
pub fn generate_live(rng: &mut impl Rng) -> AnomalyRecord {
    let anomaly_type = AnomalyType::ALL[rng.gen_range(0..AnomalyType::ALL.len())];
    let confidence = rng.gen_range(70..100) as f64 / 100.0;
    let (center_lat, center_lng) = MAP_CENTER;

    AnomalyRecord {
        id: format!("live-{}", Uuid::new_v4()),
        anomaly_type,
        confidence,
        latitude: center_lat + rng.gen_range(-2.5..2.5),
        longitude: center_lng + rng.gen_range(-5.0..5.0),
        detected_at: Utc::now(),
        description: "Anomaly flagged by an on-demand analysis run.".to_string(),
        severity: severity_for(confidence),
        region: Some(Region::Russia),
        area: format!("{} ha", rng.gen_range(5..25)),
    }
}

fn description_for(anomaly_type: AnomalyType) -> &'static str {
    match anomaly_type {
        AnomalyType::Fire => {
            "Signs of an active wildfire. Emergency services should respond."
        }
        AnomalyType::Deforestation => {
            "Illegal logging across the forest massif. Environmental inspection required."
        }
        AnomalyType::Dump => {
            "New unauthorized waste dump has formed. Cleanup and disposal required."
        }
        AnomalyType::Construction => {
            "New construction started without a recorded permit."
        }
        AnomalyType::Flood => {
            "Flooding of agricultural land. Crop losses are possible."
        }
    }
}
