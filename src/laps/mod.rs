// Lap completion filtering and per-car lap time series

pub mod overview;

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryFrame;

pub use overview::{
    DEFAULT_OVERVIEW_LIMIT, LapOverviewRow, LapTimeSummary, car_ids, lap_overview,
    summarize_lap_times,
};

/// Sector whose frame closes a lap on a three-sector circuit
pub const DEFAULT_CLOSING_SECTOR: u32 = 3;

/// Selects frames that close a lap: `sector == closing_sector` with a lap time attached.
///
/// Input order is preserved. Closing-sector frames without a lap time are
/// treated as instrumentation noise and dropped.
pub fn completed_laps(frames: &[TelemetryFrame], closing_sector: u32) -> Vec<&TelemetryFrame> {
    frames
        .iter()
        .filter(|frame| frame.sector == closing_sector && frame.lap_time_s.is_some())
        .collect()
}

/// Keeps only the last completed lap record for each (car, lap) pair.
///
/// Survivors stay at the stream position of the record that won.
pub fn dedupe_last_write_wins<'a>(completed: &[&'a TelemetryFrame]) -> Vec<&'a TelemetryFrame> {
    let mut last_seen: HashMap<(&str, u32), usize> = HashMap::new();
    for (idx, frame) in completed.iter().enumerate() {
        last_seen.insert((frame.car_id.as_str(), frame.lap), idx);
    }
    let deduped: Vec<&TelemetryFrame> = completed
        .iter()
        .enumerate()
        .filter(|(idx, frame)| last_seen[&(frame.car_id.as_str(), frame.lap)] == *idx)
        .map(|(_, frame)| *frame)
        .collect();
    if deduped.len() != completed.len() {
        warn!(
            "Dropped {} duplicate completed lap records",
            completed.len() - deduped.len()
        );
    }
    deduped
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapPoint {
    pub lap: u32,
    pub lap_time_s: f64,
}

/// Lap times of a single car, in the order the completed laps were received.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CarLapSeries {
    pub car_id: String,
    pub laps: Vec<LapPoint>,
}

impl CarLapSeries {
    pub fn is_lap_ascending(&self) -> bool {
        self.laps.windows(2).all(|pair| pair[0].lap <= pair[1].lap)
    }

    pub fn lap_times(&self) -> Vec<f64> {
        self.laps.iter().map(|point| point.lap_time_s).collect()
    }
}

/// Lap time series for every car, cars listed in first-appearance order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PerCarLapSeries {
    pub cars: Vec<CarLapSeries>,
}

impl PerCarLapSeries {
    pub fn get(&self, car_id: &str) -> Option<&CarLapSeries> {
        self.cars.iter().find(|series| series.car_id == car_id)
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    /// Number of lap points across all cars
    pub fn total_laps(&self) -> usize {
        self.cars.iter().map(|series| series.laps.len()).sum()
    }
}

/// Groups completed laps by exact `car_id`.
///
/// No sorting happens here: each car's laps follow the filtered input order,
/// which callers are expected to supply lap-ascending.
pub fn build_car_series(completed: &[&TelemetryFrame]) -> PerCarLapSeries {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut cars: Vec<CarLapSeries> = Vec::new();

    for frame in completed {
        let Some(lap_time_s) = frame.lap_time_s else {
            continue;
        };
        let slot = *index.entry(frame.car_id.as_str()).or_insert_with(|| {
            cars.push(CarLapSeries {
                car_id: frame.car_id.clone(),
                laps: Vec::new(),
            });
            cars.len() - 1
        });
        cars[slot].laps.push(LapPoint {
            lap: frame.lap,
            lap_time_s,
        });
    }

    for series in cars.iter().filter(|series| !series.is_lap_ascending()) {
        warn!(
            "Lap series for car {} is not in ascending lap order, keeping input order",
            series.car_id
        );
    }

    PerCarLapSeries { cars }
}
