//! Statistical helpers for the cross-sectional analysis.

use ndarray::Array1;

/// Whether a sum of squared deviations is zero up to rounding, relative to
/// the sum of squares of the values themselves.
fn is_degenerate(variance: f64, sum_sq: f64) -> bool {
    variance <= f64::EPSILON * sum_sq
}

/// Pearson correlation coefficient between `x` and `y`.
///
/// Pairs where either value is not finite are ignored.
///
/// # Returns
///
/// `None` when the inputs differ in length, fewer than two finite pairs
/// remain, or either side has zero variance.
///
/// # Examples
///
/// ```
/// use dailyprice_traits::stats::pearson;
/// use ndarray::array;
///
/// let volume = array![1000.0, 2000.0, 3000.0];
/// let close = array![10.0, 20.0, 30.0];
/// let r = pearson(&volume, &close).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &Array1<f64>, y: &Array1<f64>) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;

    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
        sum_sq_x += a * a;
        sum_sq_y += b * b;
    }

    if is_degenerate(var_x, sum_sq_x) || is_degenerate(var_y, sum_sq_y) {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
