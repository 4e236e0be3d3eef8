// Spatial path projection of telemetry frames for the replay view
//
// Frames are laid out on a notional circular track: angular position follows
// lap/sector progress, radius grows with speed and height encodes throttle.
// This is a visual stand-in for circuit geometry, not a reconstruction of it.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryFrame;

/// Parameters of the circular replay layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Number of sectors per lap on the circuit
    pub sector_count: u32,
    /// Radius of a stationary car
    pub base_radius: f64,
    /// Radius added per kph of speed
    pub speed_scale: f64,
    /// Height added per throttle percentage point
    pub throttle_scale: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sector_count: 3,
            base_radius: 40.0,
            speed_scale: 0.1,
            throttle_scale: 0.02,
        }
    }
}

/// Represents a 3D point of the replay scene, y pointing up
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Ground-plane bounding box of a replay path
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PathBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl PathBounds {
    fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    fn update(&mut self, point: &ProjectedPoint) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_z = self.min_z.min(point.z);
        self.max_z = self.max_z.max(point.z);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}

/// Projected polyline plus the ghost marker at its end
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReplayPath {
    pub points: Vec<ProjectedPoint>,
    /// Current car position, the last projected point
    pub ghost: Option<ProjectedPoint>,
}

impl ReplayPath {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Flat `[x0, y0, z0, x1, ...]` buffer as consumed by line geometries
    pub fn position_buffer(&self) -> Vec<f64> {
        self.points.iter().flat_map(|point| point.to_array()).collect()
    }

    pub fn bounds(&self) -> Option<PathBounds> {
        if self.points.is_empty() {
            return None;
        }
        let mut bounds = PathBounds::new();
        for point in &self.points {
            bounds.update(point);
        }
        Some(bounds)
    }
}

/// Projects every frame, one point each, in input order.
///
/// The caller picks which frames to replay; nothing is filtered here.
pub fn project_path<'a, I>(frames: I, config: &ProjectionConfig) -> ReplayPath
where
    I: IntoIterator<Item = &'a TelemetryFrame>,
    I::IntoIter: Clone,
{
    let frames = frames.into_iter();
    let Some(max_lap) = frames.clone().map(|frame| frame.lap).max() else {
        return ReplayPath::default();
    };

    let sectors = config.sector_count as f64;
    let laps_span = max_lap as f64 * sectors;
    let points: Vec<ProjectedPoint> = frames
        .map(|frame| {
            let theta = if laps_span > 0. {
                ((frame.lap as f64 * sectors + frame.sector as f64) / laps_span) * PI * 2.
            } else {
                0.
            };
            let radius = config.base_radius + frame.speed_kph * config.speed_scale;
            ProjectedPoint::new(
                theta.cos() * radius,
                frame.throttle_pct * config.throttle_scale,
                theta.sin() * radius,
            )
        })
        .collect();

    ReplayPath {
        ghost: points.last().copied(),
        points,
    }
}
