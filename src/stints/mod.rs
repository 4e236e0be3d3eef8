// Stint average pace overlays drawn alongside the lap time series

use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::telemetry::StintSummary;

/// Flat horizontal segment from `(start_lap, avg_pace_s)` to `(end_lap, avg_pace_s)`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StintOverlay {
    pub car_id: String,
    pub tire_set: String,
    pub start_lap: u32,
    pub end_lap: u32,
    pub avg_pace_s: f64,
    /// Legend entry, "<car> <tire set>"
    pub label: String,
}

impl StintOverlay {
    pub fn segment(&self) -> [(f64, f64); 2] {
        [
            (self.start_lap as f64, self.avg_pace_s),
            (self.end_lap as f64, self.avg_pace_s),
        ]
    }
}

impl From<&StintSummary> for StintOverlay {
    fn from(stint: &StintSummary) -> Self {
        Self {
            car_id: stint.car_id.clone(),
            tire_set: stint.tire_set.clone(),
            start_lap: stint.start_lap,
            end_lap: stint.end_lap,
            avg_pace_s: stint.avg_pace_s,
            label: format!("{} {}", stint.car_id, stint.tire_set),
        }
    }
}

/// One overlay per stint, as given. Inverted lap ranges pass through untouched.
pub fn stint_overlays(stints: &[StintSummary]) -> Vec<StintOverlay> {
    stints.iter().map(StintOverlay::from).collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum StintIssue {
    /// `start_lap` is after `end_lap`
    InvertedRange {
        car_id: String,
        tire_set: String,
        start_lap: u32,
        end_lap: u32,
    },
    /// Two stints of the same car share at least one lap
    Overlap {
        car_id: String,
        first_tire_set: String,
        second_tire_set: String,
    },
}

/// Reports stints the upstream should not have produced. Never filters.
pub fn validate_stints(stints: &[StintSummary]) -> Vec<StintIssue> {
    let mut issues: Vec<StintIssue> = stints
        .iter()
        .filter(|stint| stint.start_lap > stint.end_lap)
        .map(|stint| StintIssue::InvertedRange {
            car_id: stint.car_id.clone(),
            tire_set: stint.tire_set.clone(),
            start_lap: stint.start_lap,
            end_lap: stint.end_lap,
        })
        .collect();

    for (first, second) in stints.iter().tuple_combinations() {
        if first.car_id != second.car_id {
            continue;
        }
        let (a_start, a_end) = lap_bounds(first);
        let (b_start, b_end) = lap_bounds(second);
        if a_start <= b_end && b_start <= a_end {
            issues.push(StintIssue::Overlap {
                car_id: first.car_id.clone(),
                first_tire_set: first.tire_set.clone(),
                second_tire_set: second.tire_set.clone(),
            });
        }
    }

    for issue in &issues {
        warn!("Stint summary issue: {:?}", issue);
    }
    issues
}

fn lap_bounds(stint: &StintSummary) -> (u32, u32) {
    (
        stint.start_lap.min(stint.end_lap),
        stint.start_lap.max(stint.end_lap),
    )
}
