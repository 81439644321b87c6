//! Pure numeric helpers for small chart series.
//!
//! Series are short (tens of points) and every function is a single pass,
//! so nothing here allocates beyond its output.

use crate::errors::CoreError;
use crate::models::series::AxisBounds;

/// Fit `y = slope * x + intercept` over zero-based indices by ordinary
/// least squares and return the fitted value at each index.
///
/// Fails with `InvalidInput` for fewer than two points (the slope is
/// undefined) or for non-finite values.
pub fn compute_trend_line(values: &[f64]) -> Result<Vec<f64>, CoreError> {
    let (slope, intercept) = fit_line(values)?;
    Ok((0..values.len())
        .map(|i| slope * i as f64 + intercept)
        .collect())
}

/// Slope of the least-squares line, in value units per index step.
pub fn trend_slope(values: &[f64]) -> Result<f64, CoreError> {
    fit_line(values).map(|(slope, _)| slope)
}

fn fit_line(values: &[f64]) -> Result<(f64, f64), CoreError> {
    if values.len() < 2 {
        return Err(CoreError::InvalidInput(format!(
            "trend line needs at least 2 points, got {}",
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(CoreError::InvalidInput(format!(
            "trend line values must be finite, got {bad}"
        )));
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    // Running mean: a plain sum overflows for large finite inputs.
    let y_mean = values
        .iter()
        .enumerate()
        .fold(0.0, |m, (i, y)| m + (y - m) / (i + 1) as f64);

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    let slope = num / den;
    let intercept = y_mean - slope * x_mean;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(CoreError::InvalidInput("trend line fit overflowed".into()));
    }
    Ok((slope, intercept))
}

/// `recent - baseline`. Positive means an increase over the baseline.
pub fn compute_delta(recent: f64, baseline: f64) -> f64 {
    recent - baseline
}

/// `observed - average`: a stat's deviation from its season average.
pub fn compute_variance(observed: f64, average: f64) -> f64 {
    observed - average
}

/// Mean of the finite values, `None` if there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Integer-aligned axis range around `values` with `padding` on each side:
/// `min = floor(min(values) - padding)`, `max = ceil(max(values) + padding)`.
///
/// Non-finite values are ignored. Fails with `InvalidInput` when no finite
/// value remains, `padding` is not a positive finite number, or `padding`
/// is too small to move the bounds at the values' magnitude.
pub fn compute_axis_bounds(values: &[f64], padding: f64) -> Result<AxisBounds, CoreError> {
    if !(padding.is_finite() && padding > 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "axis padding must be positive, got {padding}"
        )));
    }

    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| {
            CoreError::InvalidInput("axis bounds need at least one finite value".into())
        })?;

    let bounds = AxisBounds {
        min: (lo - padding).floor(),
        max: (hi + padding).ceil(),
    };
    if bounds.min >= bounds.max {
        return Err(CoreError::InvalidInput(format!(
            "axis padding {padding} is below float resolution at {lo}..{hi}"
        )));
    }
    Ok(bounds)
}

/// `count` evenly spaced tick values from `bounds.min` to `bounds.max`, inclusive.
pub fn compute_axis_ticks(bounds: AxisBounds, count: usize) -> Result<Vec<f64>, CoreError> {
    if count < 2 {
        return Err(CoreError::InvalidInput(format!(
            "axis needs at least 2 ticks, got {count}"
        )));
    }
    let step = bounds.span() / (count - 1) as f64;
    Ok((0..count)
        .map(|i| {
            if i == count - 1 {
                bounds.max
            } else {
                bounds.min + step * i as f64
            }
        })
        .collect())
}

/// Affine map of `value` from `[domain_min, domain_max]` onto
/// `[range_min, range_max]`. Swap the range ends to invert an axis.
pub fn scale_linear(
    value: f64,
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
) -> Result<f64, CoreError> {
    if domain_min == domain_max {
        return Err(CoreError::InvalidInput(format!(
            "scale domain has zero width at {domain_min}"
        )));
    }
    let t = (value - domain_min) / (domain_max - domain_min);
    Ok(range_min + t * (range_max - range_min))
}
