// Library interface for paddock
// Pure transformations from telemetry frames to dashboard-ready data

pub mod chart;
pub mod config;
pub mod errors;
pub mod laps;
pub mod pace;
pub mod replay;
pub mod report;
pub mod stints;
pub mod telemetry;
pub mod writer;

// Re-export commonly used types
pub use chart::{ChartPoint, NormalizedSeries, normalize_series};
pub use config::EngineConfig;
pub use errors::PaddockError;
pub use laps::{CarLapSeries, LapPoint, PerCarLapSeries, build_car_series, completed_laps};
pub use pace::{PaceStatistic, pace_statistics};
pub use replay::{ProjectedPoint, ProjectionConfig, ReplayPath, project_path};
pub use report::SessionReport;
pub use stints::{StintOverlay, stint_overlays};
pub use telemetry::{LapResponse, SessionSummary, StintSummary, TelemetryFrame};
