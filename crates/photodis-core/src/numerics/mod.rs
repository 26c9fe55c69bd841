//! Grid construction and composite-rule quadrature.
//!
//! `integrate_simpson` fills the role scipy's `simps` plays in the reference
//! scripts: composite Simpson's rule on a possibly non-uniform abscissa, with
//! a trapezoid rule on a trailing odd interval.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadratureError {
    #[error("quadrature requires at least 2 sample points, got {actual}")]
    InsufficientPoints { actual: usize },
    #[error("quadrature input length mismatch: x={x}, y={y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("quadrature vector '{field}' must contain finite values, index {index} got {value}")]
    NonFiniteValue {
        field: &'static str,
        index: usize,
        value: f64,
    },
    #[error(
        "quadrature abscissa must be strictly increasing, index {index} has {current} after {previous}"
    )]
    NonIncreasingAbscissa {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Base-10 logarithmically spaced grid, endpoints inclusive (numpy `logspace`).
pub fn logspace(start_exponent: f64, end_exponent: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![10.0_f64.powf(start_exponent)];
    }
    let step = (end_exponent - start_exponent) / (count - 1) as f64;
    (0..count)
        .map(|index| 10.0_f64.powf(start_exponent + step * index as f64))
        .collect()
}

/// Linearly spaced grid, endpoints inclusive (numpy `linspace`).
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|index| start + step * index as f64).collect()
}

/// Composite Simpson's rule over samples `y` at abscissa `x`.
///
/// Interval pairs use the non-uniform Simpson weights; when the number of
/// intervals is even the final lone interval is closed with the trapezoid
/// rule. Two points degenerate to a single trapezoid.
pub fn integrate_simpson(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    validate_samples(x, y)?;

    let n = x.len();
    if n == 2 {
        return Ok(trapezoid(x[0], x[1], y[0], y[1]));
    }

    let mut integral = 0.0;
    let mut index = 0;
    while index + 2 < n {
        let h0 = x[index + 1] - x[index];
        let h1 = x[index + 2] - x[index + 1];
        let span = h0 + h1;
        integral += span / 6.0
            * ((2.0 - h1 / h0) * y[index]
                + span * span / (h0 * h1) * y[index + 1]
                + (2.0 - h0 / h1) * y[index + 2]);
        index += 2;
    }
    if index + 1 < n {
        integral += trapezoid(x[n - 2], x[n - 1], y[n - 2], y[n - 1]);
    }

    Ok(integral)
}

fn trapezoid(x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    (x1 - x0) * (y0 + y1) / 2.0
}

fn validate_samples(x: &[f64], y: &[f64]) -> Result<(), QuadratureError> {
    if x.len() < 2 {
        return Err(QuadratureError::InsufficientPoints { actual: x.len() });
    }
    if x.len() != y.len() {
        return Err(QuadratureError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    for (index, value) in x.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(QuadratureError::NonFiniteValue {
                field: "x",
                index,
                value,
            });
        }
        if index > 0 {
            let previous = x[index - 1];
            if value <= previous {
                return Err(QuadratureError::NonIncreasingAbscissa {
                    index,
                    previous,
                    current: value,
                });
            }
        }
    }
    for (index, value) in y.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(QuadratureError::NonFiniteValue {
                field: "y",
                index,
                value,
            });
        }
    }

    Ok(())
}
