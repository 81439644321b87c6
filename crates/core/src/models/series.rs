use serde::{Deserialize, Serialize};

/// An ordered numeric series, oldest value first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSeries {
    values: Vec<f64>,
}

impl NumericSeries {
    /// Build from values already ordered oldest-to-newest.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Build from API data, which lists the most recent game first.
    pub fn from_newest_first(values: &[f64]) -> Self {
        Self {
            values: values.iter().rev().copied().collect(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The most recent value.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Y-axis range for a chart, always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Pixel area a trend chart is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    /// Inset applied on every side
    pub padding: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }
}

/// A series value mapped into plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Sign of a change, used by the presentation layer for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

/// Everything a trend panel needs to draw a small series.
///
/// The core computes the numbers; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    /// Values oldest-to-newest
    pub values: Vec<f64>,

    /// Least-squares fitted value per index
    pub trend: Vec<f64>,

    pub bounds: AxisBounds,

    /// Y-axis tick values from `bounds.min` to `bounds.max`
    pub y_ticks: Vec<f64>,

    /// Values in plot coordinates
    pub points: Vec<ChartPoint>,

    /// Trend values in plot coordinates
    pub trend_points: Vec<ChartPoint>,

    /// Latest value minus the series mean
    pub delta_vs_average: f64,

    pub direction: Direction,
}

/// An observed stat next to its season average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatComparison {
    pub label: String,
    pub observed: f64,
    pub average: f64,
}

impl StatComparison {
    pub fn new(label: impl Into<String>, observed: f64, average: f64) -> Self {
        Self {
            label: label.into(),
            observed,
            average,
        }
    }
}

/// Deviation of one stat from its season average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatVariance {
    pub label: String,
    pub variance: f64,
    pub direction: Direction,
}
