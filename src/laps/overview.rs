// Lap overview table rows and lap time summaries

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryFrame;

/// Default number of rows shown in the lap overview
pub const DEFAULT_OVERVIEW_LIMIT: usize = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapOverviewRow {
    pub car_id: String,
    pub lap: u32,
    pub lap_time_s: Option<f64>,
    pub speed_kph: f64,
    pub throttle_pct: f64,
    pub brake_pct: f64,
}

impl From<&TelemetryFrame> for LapOverviewRow {
    fn from(frame: &TelemetryFrame) -> Self {
        Self {
            car_id: frame.car_id.clone(),
            lap: frame.lap,
            lap_time_s: frame.lap_time_s,
            speed_kph: frame.speed_kph,
            throttle_pct: frame.throttle_pct,
            brake_pct: frame.brake_pct,
        }
    }
}

/// Distinct car ids in first-appearance order.
pub fn car_ids(frames: &[TelemetryFrame]) -> Vec<String> {
    frames
        .iter()
        .map(|frame| frame.car_id.as_str())
        .unique()
        .map(str::to_string)
        .collect_vec()
}

/// Closing-sector frames for the overview table, optionally narrowed to one car.
///
/// Unlike [`super::completed_laps`] the lap time is not required; rows without
/// one are shown with an empty lap time cell.
pub fn lap_overview(
    frames: &[TelemetryFrame],
    closing_sector: u32,
    car_id: Option<&str>,
    limit: usize,
) -> Vec<LapOverviewRow> {
    frames
        .iter()
        .filter(|frame| frame.sector == closing_sector)
        .filter(|frame| car_id.is_none_or(|car| frame.car_id == car))
        .take(limit)
        .map(LapOverviewRow::from)
        .collect()
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapTimeSummary {
    pub fastest: f64,
    pub slowest: f64,
    pub average: f64,
    pub count: usize,
}

pub fn summarize_lap_times(lap_times: &[f64]) -> Option<LapTimeSummary> {
    let (fastest, slowest) = match lap_times
        .iter()
        .copied()
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(time) => (time, time),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    Some(LapTimeSummary {
        fastest,
        slowest,
        average: lap_times.iter().sum::<f64>() / lap_times.len() as f64,
        count: lap_times.len(),
    })
}
