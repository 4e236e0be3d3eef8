pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use loader::{load_lap_response, load_session_summary};

/// One timestamped sample of a car's telemetry stream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TelemetryFrame {
    /// Milliseconds since session start, non-decreasing within a car's stream
    pub t_ms: u64,
    pub car_id: String,
    /// Lap number, starting at 1
    pub lap: u32,
    /// Sector number, 1..N as defined by the track
    pub sector: u32,
    pub speed_kph: f64,
    /// Throttle use, 0=off throttle to 100=full throttle
    #[serde(rename = "throttle", alias = "throttle_pct")]
    pub throttle_pct: f64,
    /// Brake use, 0=released to 100=max pedal force
    #[serde(rename = "brake", alias = "brake_pct")]
    pub brake_pct: f64,
    pub gear: i32,
    /// Only present on the frame that closes a lap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lap_time_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_temp_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_temp_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_state: Option<String>,
}

impl Default for TelemetryFrame {
    fn default() -> Self {
        Self {
            t_ms: 0,
            car_id: "".to_string(),
            lap: 1,
            sector: 1,
            speed_kph: 0.,
            throttle_pct: 0.,
            brake_pct: 0.,
            gear: 0,
            lap_time_s: None,
            track_temp_c: None,
            air_temp_c: None,
            flag_state: None,
        }
    }
}

/// A page of frames for one session as returned by the telemetry service.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LapResponse {
    pub session_id: String,
    pub track: String,
    pub data: Vec<TelemetryFrame>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

impl LapResponse {
    /// Wrap a bare frame stream, e.g. one loaded from a JSON-lines dump.
    pub fn from_frames(session_id: String, track: String, data: Vec<TelemetryFrame>) -> Self {
        let total = data.len();
        Self {
            session_id,
            track,
            data,
            total,
            offset: 0,
            limit: total,
        }
    }

    pub fn frames(&self) -> &[TelemetryFrame] {
        &self.data
    }

    /// Frames belonging to a single car, in stream order.
    pub fn frames_for_car<'a>(
        &'a self,
        car_id: &'a str,
    ) -> impl Iterator<Item = &'a TelemetryFrame> + Clone {
        self.data.iter().filter(move |frame| frame.car_id == car_id)
    }
}

/// A contiguous run of laps by one car on one tire set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StintSummary {
    pub car_id: String,
    pub tire_set: String,
    pub start_lap: u32,
    pub end_lap: u32,
    pub avg_pace_s: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    /// Fastest lap time in seconds keyed by car id
    pub fastest_lap: BTreeMap<String, f64>,
    pub valid_laps: u32,
    #[serde(default)]
    pub stints: Vec<StintSummary>,
}

impl SessionSummary {
    /// Car holding the quickest lap of the session. Ties go to the first car id in order.
    pub fn overall_fastest(&self) -> Option<(&str, f64)> {
        self.fastest_lap
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (car_id, &time)| match best {
                Some((_, best_time)) if best_time <= time => best,
                _ => Some((car_id.as_str(), time)),
            })
    }
}
