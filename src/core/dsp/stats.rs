//! Statistical helpers shared by the forensic probes.
//!
//! All accumulation happens in f64 regardless of input type so results are
//! identical across platforms and repeat runs.

/// Mean of a byte slice.
pub fn mean_u8(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().map(|&v| v as f64).sum();
    sum / data.len() as f64
}

/// Population variance of a byte slice.
pub fn variance_u8(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean = mean_u8(data);
    let sum_sq: f64 = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();
    sum_sq / data.len() as f64
}

/// Population variance of an f64 slice.
pub fn variance_f64(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean: f64 = data.iter().sum::<f64>() / data.len() as f64;
    data.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / data.len() as f64
}

/// Pearson correlation between two equal-length series.
///
/// Near-constant inputs make the coefficient meaningless, so they are
/// treated as fully correlated rather than producing a 0/0.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 1.0;
    }
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let std_a = (var_a / n).sqrt();
    let std_b = (var_b / n).sqrt();
    if std_a < 1e-5 || std_b < 1e-5 {
        return 1.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Median of a value slice (sorts a copy).
pub fn median_f64(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Mean absolute difference between two equal-length byte buffers.
pub fn mean_abs_diff(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (x as i16 - y as i16).unsigned_abs() as f64)
        .sum();
    sum / a.len() as f64
}
