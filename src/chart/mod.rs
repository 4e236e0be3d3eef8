// Normalization of numeric series into the fixed [0,100]x[0,100] chart space

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

pub const CHART_EXTENT: f64 = 100.;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedSeries {
    pub points: Vec<ChartPoint>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `"x,y x,y ..."`, the points attribute of an SVG polyline
    pub fn to_polyline_points(&self) -> String {
        self.points
            .iter()
            .map(|point| format!("{},{}", point.x, point.y))
            .join(" ")
    }
}

/// Spreads samples evenly over x and min-max scales them over y, larger values
/// towards the top (y = 0).
///
/// A constant series has no range; it is scaled by 1 instead so every point
/// lands on y = 100. Any pair of finite samples stays finite, even when their
/// difference exceeds `f64::MAX`.
pub fn normalize_series(values: &[f64]) -> NormalizedSeries {
    let (min, max) = match values.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => return NormalizedSeries::default(),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let span = max - min;
    let range = if span == 0. { 1. } else { span };
    let scale = |value: f64| {
        if span.is_infinite() && min.is_finite() && max.is_finite() {
            // finite bounds whose difference overflows f64
            (value / 2. - min / 2.) / (max / 2. - min / 2.)
        } else {
            (value - min) / range
        }
    };
    let x_step = (values.len().saturating_sub(1)).max(1) as f64;

    let points = values
        .iter()
        .enumerate()
        .map(|(idx, value)| ChartPoint {
            x: idx as f64 / x_step * CHART_EXTENT,
            y: CHART_EXTENT - scale(*value) * CHART_EXTENT,
        })
        .collect();
    NormalizedSeries { points }
}
