//! The five per-number calculators. Each returns one value per number 1..=60,
//! at index `n - 1`, and depends only on the immutable history.

use megafuzzy_db::appearance::AppearanceIndex;
use megafuzzy_db::models::{PICK_COUNT, POOL_SIZE};
use megafuzzy_db::repository::DrawRepository;

/// Absence reported for a number that never appeared.
pub const ABSENCE_SENTINEL_DAYS: i64 = 999;
/// Draws considered by the parity balance.
pub const PARITY_WINDOW: usize = 20;
/// Draws considered by the sum tendency.
pub const SUM_WINDOW: usize = 50;

fn numbers() -> impl Iterator<Item = u8> {
    1..=POOL_SIZE
}

/// Raw appearance count.
pub fn frequencies(index: &AppearanceIndex) -> Vec<u32> {
    numbers().map(|n| index.count_of(n) as u32).collect()
}

/// Days between the latest draw and the number's last appearance.
pub fn absence_days(repository: &DrawRepository, index: &AppearanceIndex) -> Vec<i64> {
    let latest = repository.latest_date();
    numbers()
        .map(|n| match index.last_seen(n) {
            Some(seen) => (latest - seen).num_days(),
            None => ABSENCE_SENTINEL_DAYS,
        })
        .collect()
}

/// 100 minus the coefficient of variation (in %) of the six slot counts.
pub fn positional_uniformity(index: &AppearanceIndex) -> Vec<f64> {
    numbers()
        .map(|n| {
            let counts = index.slot_counts(n).map(|c| c as f64);
            let mean = counts.iter().sum::<f64>() / PICK_COUNT as f64;
            if mean > 0.0 {
                let cv = sample_std(&counts, mean) / mean;
                (100.0 - cv * 100.0).max(0.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Rewards the parity class under-represented in the last `PARITY_WINDOW` draws.
pub fn parity_balance(repository: &DrawRepository) -> Vec<f64> {
    let recent = repository.most_recent(PARITY_WINDOW);
    let even: usize = recent.iter().map(|d| d.even_count()).sum();
    let total = recent.len() * PICK_COUNT;
    let proportion_even = if total > 0 {
        even as f64 / total as f64
    } else {
        0.5
    };

    numbers()
        .map(|n| {
            if n % 2 == 0 {
                (1.0 - proportion_even) * 100.0
            } else {
                proportion_even * 100.0
            }
        })
        .collect()
}

/// Closeness of each number to the mean per-slot contribution of recent draw sums.
pub fn sum_tendency(repository: &DrawRepository) -> Vec<f64> {
    let recent = repository.most_recent(SUM_WINDOW);
    if recent.is_empty() {
        return vec![0.0; POOL_SIZE as usize];
    }
    let mean_sum = recent.iter().map(|d| d.sum() as f64).sum::<f64>() / recent.len() as f64;
    let ideal = mean_sum / PICK_COUNT as f64;
    let max_distance = (1.0 - ideal).abs().max((POOL_SIZE as f64 - ideal).abs());

    numbers()
        .map(|n| {
            let distance = (n as f64 - ideal).abs();
            (100.0 * (1.0 - distance / max_distance)).max(0.0)
        })
        .collect()
}

/// Standard deviation with divisor n - 1.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
