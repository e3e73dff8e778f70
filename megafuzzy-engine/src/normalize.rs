/// Value every entry takes when all raw values are equal.
pub const DEGENERATE_VALUE: f64 = 50.0;

/// Min-max rescaling to [0, 100]. When max == min there is no spread to
/// rescale and every value maps to `DEGENERATE_VALUE`.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.is_nan() || range <= 0.0 {
        if !values.is_empty() {
            tracing::warn!(value = min, "degenerate normalization, all values equal");
        }
        return vec![DEGENERATE_VALUE; values.len()];
    }

    values.iter().map(|v| (v - min) / range * 100.0).collect()
}
