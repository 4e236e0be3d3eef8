// Integration tests for the aggregation pipeline
//
// Frames flow through the same stages the dashboard uses:
// 1. Filter completed laps
// 2. Build per-car series and pace statistics
// 3. Overlay stints from the session summary
// 4. Project the replay path and normalize the lap time chart

use paddock::{
    EngineConfig, LapResponse, SessionReport, SessionSummary, StintSummary, TelemetryFrame,
    build_car_series, completed_laps, normalize_series, pace_statistics,
    pace::variance_band,
    replay::ProjectionConfig,
    project_path,
    stints::StintIssue,
};

/// Helper building a three-sector session where every sector emits one frame
fn build_session(cars: &[(&str, &[f64])]) -> Vec<TelemetryFrame> {
    let mut frames = Vec::new();
    let laps = cars.iter().map(|(_, times)| times.len()).max().unwrap_or(0);
    for lap_idx in 0..=laps {
        for sector in 1..=3u32 {
            for (car_id, times) in cars {
                let lap = lap_idx as u32 + 1;
                let lap_time_s = if sector == 3 {
                    times.get(lap_idx).copied()
                } else {
                    None
                };
                frames.push(TelemetryFrame {
                    t_ms: (lap_idx as u64 * 3 + sector as u64) * 30_000,
                    car_id: car_id.to_string(),
                    lap,
                    sector,
                    speed_kph: 140.0 + sector as f64 * 10.0,
                    throttle_pct: 70.0,
                    brake_pct: 10.0,
                    gear: 4,
                    lap_time_s,
                    track_temp_c: Some(31.5),
                    air_temp_c: Some(24.0),
                    flag_state: Some("green".to_string()),
                });
            }
        }
    }
    frames
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_two_car_pace_scenario() {
    let frames = build_session(&[("A", &[90.0, 91.0]), ("B", &[92.0, 93.0])]);
    assert_eq!(frames.iter().map(|f| f.lap).max(), Some(3));

    let completed = completed_laps(&frames, 3);
    assert_eq!(completed.len(), 4);

    let series = build_car_series(&completed);
    assert_eq!(series.get("A").unwrap().lap_times(), vec![90.0, 91.0]);
    assert_eq!(series.get("B").unwrap().lap_times(), vec![92.0, 93.0]);

    let pace = pace_statistics(&completed);
    assert_eq!(pace.len(), 2);
    assert_eq!(pace[0].lap, 1);
    assert_close(pace[0].mean, 91.0);
    assert_close(pace[0].upper - pace[0].mean, 1.0);
    assert_eq!(pace[1].lap, 2);
    assert_close(pace[1].mean, 92.0);
    assert_close(pace[1].mean - pace[1].lower, 1.0);

    let band = variance_band(&pace);
    assert_eq!(band.len(), 4);
    assert_eq!(band[0].0, 1.0);
    assert_eq!(band[3].0, 1.0);
}

#[test]
fn test_transformations_are_idempotent() {
    let frames = build_session(&[("A", &[90.0, 91.5, 90.7]), ("B", &[92.0, 91.1])]);
    let config = ProjectionConfig::default();

    let completed = completed_laps(&frames, 3);
    assert_eq!(completed, completed_laps(&frames, 3));
    assert_eq!(build_car_series(&completed), build_car_series(&completed));
    assert_eq!(pace_statistics(&completed), pace_statistics(&completed));
    assert_eq!(project_path(&frames, &config), project_path(&frames, &config));

    let times: Vec<f64> = completed.iter().filter_map(|f| f.lap_time_s).collect();
    assert_eq!(normalize_series(&times), normalize_series(&times));
}

#[test]
fn test_session_report_for_selected_car() {
    let frames = build_session(&[("A", &[90.0, 91.0]), ("B", &[92.0, 93.0])]);
    let laps = LapResponse {
        session_id: "barber-r1".to_string(),
        track: "Barber Motorsports Park".to_string(),
        total: frames.len(),
        offset: 0,
        limit: 500,
        data: frames,
    };
    let summary = SessionSummary {
        fastest_lap: [("A".to_string(), 90.0), ("B".to_string(), 92.0)]
            .into_iter()
            .collect(),
        valid_laps: 2,
        stints: vec![
            StintSummary {
                car_id: "A".to_string(),
                tire_set: "soft".to_string(),
                start_lap: 1,
                end_lap: 2,
                avg_pace_s: 90.5,
            },
            StintSummary {
                car_id: "B".to_string(),
                tire_set: "medium".to_string(),
                start_lap: 2,
                end_lap: 1,
                avg_pace_s: 92.5,
            },
        ],
    };

    let report = SessionReport::build(&laps, Some(&summary), &EngineConfig::default(), Some("B"));

    assert_eq!(report.cars, vec!["A", "B"]);
    assert_eq!(report.selected_car.as_deref(), Some("B"));
    assert_eq!(report.lap_series.len(), 2);
    assert_eq!(report.pace.len(), 2);
    assert_eq!(report.fastest_lap, Some(("A".to_string(), 90.0)));

    // chart, overview and replay are narrowed to car B
    let lap_times = report.lap_times.unwrap();
    assert_eq!(lap_times.fastest, 92.0);
    assert_eq!(lap_times.slowest, 93.0);
    assert_eq!(report.lap_time_chart.to_polyline_points(), "0,100 100,0");
    assert!(report.overview.iter().all(|row| row.car_id == "B"));
    assert_eq!(report.overview.len(), 3);
    assert_eq!(report.replay.len(), 9);

    // stints pass through as given, the inverted one is only reported
    assert_eq!(report.stints.len(), 2);
    assert_eq!(report.stints[1].label, "B medium");
    assert_eq!(report.stint_issues.len(), 1);
    assert!(matches!(
        &report.stint_issues[0],
        StintIssue::InvertedRange { car_id, .. } if car_id == "B"
    ));
}

#[test]
fn test_session_report_dedupes_by_default() {
    let mut frames = build_session(&[("A", &[90.0, 91.0])]);
    frames.push(TelemetryFrame {
        car_id: "A".to_string(),
        lap: 2,
        sector: 3,
        lap_time_s: Some(95.0),
        ..Default::default()
    });
    let laps = LapResponse::from_frames("s".to_string(), "t".to_string(), frames);

    let deduped = SessionReport::build(&laps, None, &EngineConfig::default(), None);
    assert_eq!(deduped.lap_series.total_laps(), 2);
    assert_eq!(deduped.lap_series.get("A").unwrap().lap_times(), vec![90.0, 95.0]);
    assert_close(deduped.pace[1].mean, 95.0);
    assert!(deduped.stints.is_empty());
    assert!(deduped.fastest_lap.is_none());

    // opting out keeps every record the feed sent
    let config = EngineConfig {
        dedupe_laps: false,
        ..Default::default()
    };
    let raw = SessionReport::build(&laps, None, &config, None);
    assert_eq!(raw.lap_series.total_laps(), 3);
    assert_close(raw.pace[1].mean, 93.0);
}

#[test]
fn test_resent_lap_replaces_earlier_record() {
    let lap_one = |car_id: &str, lap_time_s: f64| TelemetryFrame {
        car_id: car_id.to_string(),
        lap: 1,
        sector: 3,
        lap_time_s: Some(lap_time_s),
        ..Default::default()
    };
    let frames = vec![lap_one("A", 90.0), lap_one("B", 92.0), lap_one("A", 94.0)];
    let laps = LapResponse::from_frames("s".to_string(), "t".to_string(), frames);

    let report = SessionReport::build(&laps, None, &EngineConfig::default(), None);

    assert_eq!(report.lap_series.get("A").unwrap().lap_times(), vec![94.0]);
    assert_eq!(report.lap_series.get("B").unwrap().lap_times(), vec![92.0]);
    assert_eq!(report.pace.len(), 1);
    assert_close(report.pace[0].mean, 93.0);
}

#[test]
fn test_empty_session_degrades_to_empty_views() {
    let laps = LapResponse::default();
    let report = SessionReport::build(&laps, None, &EngineConfig::default(), None);

    assert!(report.cars.is_empty());
    assert!(report.lap_series.is_empty());
    assert!(report.pace.is_empty());
    assert!(report.variance_band.is_empty());
    assert!(report.lap_times.is_none());
    assert!(report.lap_time_chart.is_empty());
    assert!(report.replay.is_empty());
    assert!(report.replay.ghost.is_none());
}
