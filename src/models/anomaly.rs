//! Anomaly model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anomaly categories detected on satellite imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    Fire,
    Deforestation,
    Dump,
    Construction,
    Flood,
}

impl AnomalyType {
    /// Every known category, in legend order
    pub const ALL: [AnomalyType; 5] = [
        AnomalyType::Fire,
        AnomalyType::Deforestation,
        AnomalyType::Dump,
        AnomalyType::Construction,
        AnomalyType::Flood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::Fire => "fire",
            AnomalyType::Deforestation => "deforestation",
            AnomalyType::Dump => "dump",
            AnomalyType::Construction => "construction",
            AnomalyType::Flood => "flood",
        }
    }

    /// Human-readable name used in list cards and CSV export
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyType::Fire => "Fire",
            AnomalyType::Deforestation => "Deforestation",
            AnomalyType::Dump => "Dump",
            AnomalyType::Construction => "Construction",
            AnomalyType::Flood => "Flood",
        }
    }

    /// Marker color on the map
    pub fn color(&self) -> &'static str {
        match self {
            AnomalyType::Fire => "#e74c3c",
            AnomalyType::Deforestation => "#8b4513",
            AnomalyType::Dump => "#7f8c8d",
            AnomalyType::Construction => "#f39c12",
            AnomalyType::Flood => "#3498db",
        }
    }

    /// Marker glyph name understood by the dashboard icon set
    pub fn icon(&self) -> &'static str {
        match self {
            AnomalyType::Fire => "fas fa-fire",
            AnomalyType::Deforestation => "fas fa-tree",
            AnomalyType::Dump => "fas fa-trash",
            AnomalyType::Construction => "fas fa-hard-hat",
            AnomalyType::Flood => "fas fa-water",
        }
    }
}

impl std::fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Monitored regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Europe,
    Asia,
    Russia,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Europe, Region::Asia, Region::Russia];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Russia => "russia",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity levels, fixed at detection time from the confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected anomaly. Immutable once created; the engine only
/// reads these, it never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub id: String,
    pub anomaly_type: AnomalyType,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub detected_at: DateTime<Utc>,
    pub description: String,
    /// Derived from confidence when the record is created, not re-derived later
    pub severity: Severity,
    pub region: Option<Region>,
    /// Affected area as a unit-labeled magnitude, e.g. "12 ha"
    pub area: String,
}
