use std::fs;
use std::path::Path;

use log::{debug, info};

use super::{LapResponse, SessionSummary, TelemetryFrame};
use crate::PaddockError;

const JSONL_EXTENSION: &str = "jsonl";
const UNKNOWN_TRACK: &str = "Unknown";

/// Loads a lap response saved from the telemetry service.
///
/// Two layouts are accepted: a full `LapResponse` JSON document, or a `.jsonl`
/// file holding one `TelemetryFrame` per line. Frame dumps are wrapped into a
/// single-page response named after the file stem.
pub fn load_lap_response(source_file: &Path) -> Result<LapResponse, PaddockError> {
    if !source_file.is_file() {
        return Err(PaddockError::InvalidTelemetryFile {
            path: format!("{:?}", source_file),
        });
    }

    let response = if is_frame_dump(source_file) {
        let frames = serde_jsonlines::json_lines(source_file)
            .map_err(|e| PaddockError::TelemetryLoaderError { source: e })?
            .collect::<Result<Vec<TelemetryFrame>, std::io::Error>>()
            .map_err(|e| PaddockError::TelemetryLoaderError { source: e })?;
        let session_id = source_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        debug!("Wrapping {} frames from {:?} into a lap response", frames.len(), source_file);
        LapResponse::from_frames(session_id, UNKNOWN_TRACK.to_string(), frames)
    } else {
        let content = fs::read_to_string(source_file)
            .map_err(|e| PaddockError::TelemetryLoaderError { source: e })?;
        serde_json::from_str::<LapResponse>(&content)
            .map_err(|e| PaddockError::LapResponseParseError { source: e })?
    };

    info!(
        "Loaded {:?}: session {} at {} with {} frames (total {}, offset {})",
        source_file,
        response.session_id,
        response.track,
        response.data.len(),
        response.total,
        response.offset
    );
    Ok(response)
}

pub fn load_session_summary(source_file: &Path) -> Result<SessionSummary, PaddockError> {
    if !source_file.is_file() {
        return Err(PaddockError::InvalidTelemetryFile {
            path: format!("{:?}", source_file),
        });
    }
    let content = fs::read_to_string(source_file)
        .map_err(|e| PaddockError::TelemetryLoaderError { source: e })?;
    let summary = serde_json::from_str::<SessionSummary>(&content)
        .map_err(|e| PaddockError::SessionSummaryParseError { source: e })?;
    info!(
        "Loaded session summary {:?}: {} valid laps, {} stints",
        source_file,
        summary.valid_laps,
        summary.stints.len()
    );
    Ok(summary)
}

fn is_frame_dump(source_file: &Path) -> bool {
    source_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JSONL_EXTENSION))
}
