// Error types for paddock

use itertools::Itertools;
use snafu::Snafu;
use std::{error::Error, io};

#[derive(Debug, Snafu)]
pub enum PaddockError {
    // Errors while loading payloads handed over by the fetch boundary
    #[snafu(display("Invalid telemetry file: {path}"))]
    InvalidTelemetryFile { path: String },
    #[snafu(display("Error reading telemetry file"))]
    TelemetryLoaderError { source: io::Error },
    #[snafu(display("Error parsing lap response"))]
    LapResponseParseError { source: serde_json::Error },
    #[snafu(display("Error parsing session summary"))]
    SessionSummaryParseError { source: serde_json::Error },

    // Errors for the report writer
    #[snafu(display("Error writing report"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing report"))]
    ReportSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
    #[snafu(display("Invalid configuration: {field} - {reason}"))]
    InvalidConfig { field: String, reason: String },
}

impl PaddockError {
    /// Message of this error followed by every underlying cause, `: ` separated.
    pub fn chain(&self) -> String {
        std::iter::successors(Some(self as &dyn Error), |e: &&dyn Error| (*e).source()).join(": ")
    }
}
