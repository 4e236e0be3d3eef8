// Integration test for loading saved payloads and building a report from them

use paddock::telemetry::{load_lap_response, load_session_summary};
use paddock::{EngineConfig, SessionReport};
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_report_from_saved_payloads() {
    let temp_dir = TempDir::new().unwrap();

    let laps_path = temp_dir.path().join("laps.json");
    let mut laps_file = std::fs::File::create(&laps_path).unwrap();
    write!(
        laps_file,
        r#"{{
            "session_id": "barber-r1",
            "track": "Barber",
            "data": [
                {{"t_ms": 0, "car_id": "21", "lap": 1, "sector": 1, "speed_kph": 150.0, "throttle": 58.0, "brake": 22.0, "gear": 4}},
                {{"t_ms": 89423, "car_id": "21", "lap": 1, "sector": 3, "speed_kph": 152.2, "throttle": 58.0, "brake": 22.0, "gear": 4, "lap_time_s": 89.423, "track_temp_c": 38.5}},
                {{"t_ms": 178338, "car_id": "21", "lap": 2, "sector": 3, "speed_kph": 153.0, "throttle": 59.0, "brake": 21.0, "gear": 5, "lap_time_s": 88.915, "flag_state": "green"}}
            ],
            "total": 3,
            "offset": 0,
            "limit": 500
        }}"#
    )
    .unwrap();
    laps_file.flush().unwrap();

    let summary_path = temp_dir.path().join("summary.json");
    let mut summary_file = std::fs::File::create(&summary_path).unwrap();
    write!(
        summary_file,
        r#"{{"fastest_lap": {{"21": 88.915}}, "valid_laps": 2, "stints": [{{"car_id": "21", "tire_set": "S1", "start_lap": 1, "end_lap": 2, "avg_pace_s": 89.169}}]}}"#
    )
    .unwrap();
    summary_file.flush().unwrap();

    let laps = load_lap_response(&laps_path).unwrap();
    let summary = load_session_summary(&summary_path).unwrap();
    let report = SessionReport::build(&laps, Some(&summary), &EngineConfig::default(), None);

    assert_eq!(report.session_id, "barber-r1");
    assert_eq!(report.cars, vec!["21"]);
    assert_eq!(report.lap_series.get("21").unwrap().lap_times(), vec![89.423, 88.915]);

    let lap_times = report.lap_times.unwrap();
    assert_eq!(lap_times.fastest, 88.915);
    assert_eq!(lap_times.slowest, 89.423);
    assert_eq!(report.fastest_lap, Some(("21".to_string(), 88.915)));
    assert_eq!(report.stints[0].label, "21 S1");
    assert_eq!(report.replay.len(), 3);
    assert_eq!(report.replay.ghost, report.replay.points.last().copied());

    // the report itself round-trips through JSON for the presentation layer
    let json = serde_json::to_string(&report).unwrap();
    let reloaded: SessionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded.pace, report.pace);
}
