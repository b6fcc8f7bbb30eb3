use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Daily log document: append-only history of completed days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayLogBook {
    pub logs: Vec<DaySummary>,
}

/// Aggregate of one completed simulated day. This is also the sole output
/// of `LifeEngine::live_one_day`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: u32,
    pub start_happiness: f64,
    pub end_happiness: f64,
    pub total_change: f64,
    pub events: Vec<HourlyEvent>,
    pub goals_at_day_end: Vec<String>,
    pub personality_snapshot: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEvent {
    pub hour: u32,
    pub decision: String,
    pub happiness_change: f64,
    pub insight: String,
}

impl DaySummary {
    /// Hours whose happiness swing exceeded one full point.
    pub fn significant_moments(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.happiness_change.abs() > 1.0)
            .count()
    }
}
