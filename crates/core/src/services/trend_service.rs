use crate::errors::CoreError;
use crate::models::series::{
    ChartPoint, Direction, NumericSeries, PlotArea, StatComparison, StatVariance, TrendChart,
};
use crate::services::series_math;

/// Number of labelled ticks on a trend panel's Y axis.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Builds chart-ready trend panels from short numeric series.
///
/// The core computes all the numbers; the frontend only draws paths and
/// labels from the returned [`TrendChart`].
pub struct TrendService {
    tick_count: usize,
}

impl TrendService {
    pub fn new() -> Self {
        Self {
            tick_count: DEFAULT_TICK_COUNT,
        }
    }

    pub fn with_tick_count(tick_count: usize) -> Self {
        Self { tick_count }
    }

    /// Build a trend chart from API values (most recent game first).
    ///
    /// 1. Reorder oldest-to-newest
    /// 2. Fit the trend line
    /// 3. Derive axis bounds (with `axis_padding` each side) and ticks
    /// 4. Map values and trend into `plot`, with Y inverted
    pub fn build_chart(
        &self,
        newest_first: &[f64],
        plot: PlotArea,
        axis_padding: f64,
    ) -> Result<TrendChart, CoreError> {
        let series = NumericSeries::from_newest_first(newest_first);
        let values = series.values();

        let trend = series_math::compute_trend_line(values)?;
        let bounds = series_math::compute_axis_bounds(values, axis_padding)?;
        let y_ticks = series_math::compute_axis_ticks(bounds, self.tick_count)?;

        let last_index = (values.len() - 1) as f64;
        let x_start = plot.padding;
        let x_end = plot.width - plot.padding;
        let y_bottom = plot.height - plot.padding;
        let y_top = plot.padding;

        let project = |series: &[f64]| -> Result<Vec<ChartPoint>, CoreError> {
            series
                .iter()
                .enumerate()
                .map(|(i, &value)| {
                    Ok(ChartPoint {
                        x: series_math::scale_linear(i as f64, 0.0, last_index, x_start, x_end)?,
                        y: series_math::scale_linear(
                            value, bounds.min, bounds.max, y_bottom, y_top,
                        )?,
                        value,
                    })
                })
                .collect()
        };

        let points = project(values)?;
        let trend_points = project(&trend)?;

        let average = series_math::mean(values).unwrap_or(0.0);
        let delta_vs_average = match series.latest() {
            Some(latest) => series_math::compute_delta(latest, average),
            None => 0.0,
        };

        Ok(TrendChart {
            values: values.to_vec(),
            trend,
            bounds,
            y_ticks,
            points,
            trend_points,
            delta_vs_average,
            direction: Direction::of(delta_vs_average),
        })
    }

    /// Per-stat deviation of a single game from the season averages.
    pub fn stat_variances(&self, stats: &[StatComparison]) -> Vec<StatVariance> {
        stats
            .iter()
            .map(|s| {
                let variance = series_math::compute_variance(s.observed, s.average);
                StatVariance {
                    label: s.label.clone(),
                    variance,
                    direction: Direction::of(variance),
                }
            })
            .collect()
    }
}

impl Default for TrendService {
    fn default() -> Self {
        Self::new()
    }
}
