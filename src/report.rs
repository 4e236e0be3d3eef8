// Session report composing every derived view of a lap response

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    chart::{NormalizedSeries, normalize_series},
    config::EngineConfig,
    laps::{
        LapOverviewRow, LapTimeSummary, PerCarLapSeries, build_car_series, car_ids,
        completed_laps, dedupe_last_write_wins, lap_overview, summarize_lap_times,
    },
    pace::{PaceStatistic, pace_statistics, variance_band},
    replay::{ReplayPath, project_path},
    stints::{StintIssue, StintOverlay, stint_overlays, validate_stints},
    telemetry::{LapResponse, SessionSummary},
};

/// Everything the dashboard renders for one session, as plain data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionReport {
    pub session_id: String,
    pub track: String,
    /// Car the replay, chart and overview were narrowed to, if any
    pub selected_car: Option<String>,
    pub cars: Vec<String>,
    pub lap_series: PerCarLapSeries,
    pub pace: Vec<PaceStatistic>,
    pub variance_band: Vec<(f64, f64)>,
    pub stints: Vec<StintOverlay>,
    pub stint_issues: Vec<StintIssue>,
    pub fastest_lap: Option<(String, f64)>,
    pub lap_times: Option<LapTimeSummary>,
    pub lap_time_chart: NormalizedSeries,
    pub overview: Vec<LapOverviewRow>,
    pub replay: ReplayPath,
}

impl SessionReport {
    pub fn build(
        laps: &LapResponse,
        summary: Option<&SessionSummary>,
        config: &EngineConfig,
        selected_car: Option<&str>,
    ) -> Self {
        let frames = laps.frames();

        let mut completed = completed_laps(frames, config.closing_sector);
        if config.dedupe_laps {
            completed = dedupe_last_write_wins(&completed);
        }
        let lap_series = build_car_series(&completed);
        let pace = pace_statistics(&completed);
        let band = variance_band(&pace);

        let chart_times: Vec<f64> = completed
            .iter()
            .filter(|frame| selected_car.is_none_or(|car| frame.car_id == car))
            .filter_map(|frame| frame.lap_time_s)
            .collect();

        let replay = match selected_car {
            Some(car_id) => project_path(laps.frames_for_car(car_id), &config.projection),
            None => project_path(frames, &config.projection),
        };

        let (stints, stint_issues) = summary
            .map(|summary| (stint_overlays(&summary.stints), validate_stints(&summary.stints)))
            .unwrap_or_default();

        debug!(
            "Built report for {}: {} completed laps over {} cars, {} pace points, {} replay points",
            laps.session_id,
            completed.len(),
            lap_series.len(),
            pace.len(),
            replay.len()
        );

        Self {
            session_id: laps.session_id.clone(),
            track: laps.track.clone(),
            selected_car: selected_car.map(str::to_string),
            cars: car_ids(frames),
            lap_series,
            pace,
            variance_band: band,
            stints,
            stint_issues,
            fastest_lap: summary
                .and_then(SessionSummary::overall_fastest)
                .map(|(car_id, time)| (car_id.to_string(), time)),
            lap_times: summarize_lap_times(&chart_times),
            lap_time_chart: normalize_series(&chart_times),
            overview: lap_overview(
                frames,
                config.closing_sector,
                selected_car,
                config.overview_limit,
            ),
            replay,
        }
    }
}
