//! Aggregate statistics shown on the dashboard

use serde::Serialize;

use super::anomaly::AnomalyType;

/// Per-category counts. One field per known category so a missing
/// category is an explicit zero, never an absent map key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub fire: usize,
    pub deforestation: usize,
    pub dump: usize,
    pub construction: usize,
    pub flood: usize,
}

impl TypeCounts {
    pub fn increment(&mut self, anomaly_type: AnomalyType) {
        match anomaly_type {
            AnomalyType::Fire => self.fire += 1,
            AnomalyType::Deforestation => self.deforestation += 1,
            AnomalyType::Dump => self.dump += 1,
            AnomalyType::Construction => self.construction += 1,
            AnomalyType::Flood => self.flood += 1,
        }
    }
}

/// Recomputed from the filtered set on every pass, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Size of the filtered set
    pub total: usize,
    /// Records detected on the current UTC calendar day
    pub today: usize,
    /// Mean confidence as a rounded integer percent, 0 when empty
    pub avg_confidence: u32,
    /// Records with high severity
    pub high_risk: usize,
    pub by_type: TypeCounts,
}
