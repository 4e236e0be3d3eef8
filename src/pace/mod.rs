// Cross-car pace statistics per lap with a one-sigma dispersion band

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryFrame;

/// Mean lap time of all cars for one lap, with a population standard deviation envelope
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaceStatistic {
    pub lap: u32,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

impl PaceStatistic {
    fn from_lap_times(lap: u32, lap_times: &[f64]) -> Self {
        let n = lap_times.len() as f64;
        let mean = lap_times.iter().sum::<f64>() / n;
        // population variance, not the sample estimator
        let variance = lap_times
            .iter()
            .map(|time| (time - mean).powi(2))
            .sum::<f64>()
            / n;
        let deviation = variance.sqrt();
        Self {
            lap,
            mean,
            lower: mean - deviation,
            upper: mean + deviation,
        }
    }

    pub fn deviation(&self) -> f64 {
        (self.upper - self.lower) / 2.
    }
}

/// Computes per-lap pace statistics from completed lap records.
///
/// Laps are emitted in ascending order no matter how they arrive. Laps without
/// any contributing car never appear in the output.
pub fn pace_statistics(completed: &[&TelemetryFrame]) -> Vec<PaceStatistic> {
    let mut per_lap: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for frame in completed {
        if let Some(lap_time_s) = frame.lap_time_s {
            per_lap.entry(frame.lap).or_default().push(lap_time_s);
        }
    }

    per_lap
        .iter()
        .filter(|(_, lap_times)| !lap_times.is_empty())
        .map(|(&lap, lap_times)| PaceStatistic::from_lap_times(lap, lap_times))
        .collect()
}

/// Closed outline of the dispersion band: upper bounds by ascending lap, then
/// lower bounds walking back.
pub fn variance_band(stats: &[PaceStatistic]) -> Vec<(f64, f64)> {
    stats
        .iter()
        .map(|stat| (stat.lap as f64, stat.upper))
        .chain(stats.iter().rev().map(|stat| (stat.lap as f64, stat.lower)))
        .collect()
}
