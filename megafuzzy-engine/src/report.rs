use serde::Serialize;

use crate::error::ValidationError;
use crate::features::compute::sample_std;
use crate::weights::Weights;

pub const DEFAULT_TOP_N: usize = 6;
pub const DEFAULT_POOL_N: usize = 12;
pub const MAX_TOP_N: usize = 20;
pub const MAX_POOL_N: usize = 30;

pub const DECADE_LABELS: [&str; 6] = ["1-10", "11-20", "21-30", "31-40", "41-50", "51-60"];
pub const SCORE_BUCKET_LABELS: [&str; 5] = ["very_low", "low", "mid", "mid_high", "high"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub weights: Weights,
    pub top_n: usize,
    pub pool_n: usize,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            top_n: DEFAULT_TOP_N,
            pool_n: DEFAULT_POOL_N,
        }
    }
}

impl RecommendationRequest {
    pub fn new(weights: Weights, top_n: usize, pool_n: usize) -> Self {
        Self {
            weights,
            top_n,
            pool_n,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.weights.validate()?;
        check_count("top_n", self.top_n, MAX_TOP_N)?;
        check_count("pool_n", self.pool_n, MAX_POOL_N)?;
        if self.pool_n < self.top_n {
            return Err(ValidationError::PoolSmallerThanTop {
                top_n: self.top_n,
                pool_n: self.pool_n,
            });
        }
        Ok(())
    }
}

fn check_count(name: &'static str, value: usize, max: usize) -> Result<(), ValidationError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::CountOutOfRange {
            name,
            value,
            min: 1,
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberScore {
    pub number: u8,
    pub score: f64,
    /// True when no rule fired and the score is the 0.0 fallback.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub sum: u32,
    pub even_count: usize,
    pub odd_count: usize,
    pub mean_score: f64,
    pub std_dev: f64,
    pub decades: [usize; 6],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// All 60 numbers, in ranking order.
    pub all_scores: Vec<NumberScore>,
    pub score_distribution: [usize; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub principal: Vec<NumberScore>,
    pub pool: Vec<u8>,
    pub statistics: Statistics,
    pub chart_data: ChartData,
    pub fallback_count: usize,
}

/// Descending score, ties by ascending number.
pub fn rank(mut scores: Vec<NumberScore>) -> Vec<NumberScore> {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.number.cmp(&b.number)));
    scores
}

pub fn decade_histogram(numbers: &[u8]) -> [usize; 6] {
    let mut counts = [0usize; 6];
    for &n in numbers {
        if (1..=60).contains(&n) {
            counts[((n - 1) / 10) as usize] += 1;
        }
    }
    counts
}

/// Buckets [0,2), [2,4), [4,6), [6,8), [8,10]. Out-of-range scores land in the
/// nearest end bucket.
pub fn score_histogram(scores: &[f64]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for &s in scores {
        let bucket = if s >= 8.0 {
            4
        } else if s >= 6.0 {
            3
        } else if s >= 4.0 {
            2
        } else if s >= 2.0 {
            1
        } else {
            0
        };
        counts[bucket] += 1;
    }
    counts
}

pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (mean, sample_std(values, mean))
}

/// Builds the response from the 60 ranked scores. `top_n <= pool_n <= ranked.len()`.
pub fn assemble(ranked: Vec<NumberScore>, top_n: usize, pool_n: usize) -> Recommendation {
    let top_n = top_n.min(ranked.len());
    let pool_n = pool_n.min(ranked.len());

    let principal: Vec<NumberScore> = ranked[..top_n].to_vec();
    let pool: Vec<u8> = ranked[..pool_n].iter().map(|s| s.number).collect();

    let top_numbers: Vec<u8> = principal.iter().map(|s| s.number).collect();
    let even_count = top_numbers.iter().filter(|&&n| n % 2 == 0).count();

    let all: Vec<f64> = ranked.iter().map(|s| s.score).collect();
    let (mean_score, std_dev) = mean_and_std(&all);

    let statistics = Statistics {
        sum: top_numbers.iter().map(|&n| n as u32).sum(),
        even_count,
        odd_count: top_n - even_count,
        mean_score,
        std_dev,
        decades: decade_histogram(&top_numbers),
    };

    let fallback_count = ranked.iter().filter(|s| s.fallback).count();

    Recommendation {
        principal,
        pool,
        statistics,
        chart_data: ChartData {
            score_distribution: score_histogram(&all),
            all_scores: ranked,
        },
        fallback_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(number: u8, score: f64) -> NumberScore {
        NumberScore {
            number,
            score,
            fallback: false,
        }
    }

    #[test]
    fn test_rank_ties_by_number() {
        let ranked = rank(vec![ns(9, 1.0), ns(3, 5.0), ns(2, 1.0), ns(40, 5.0), ns(1, 0.0)]);
        let order: Vec<u8> = ranked.iter().map(|s| s.number).collect();
        assert_eq!(order, vec![3, 40, 2, 9, 1]);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(RecommendationRequest::default().validate().is_ok());
        assert!(RecommendationRequest::new(Weights::default(), 20, 30).validate().is_ok());
        assert!(RecommendationRequest::new(Weights::default(), 1, 1).validate().is_ok());

        assert_eq!(
            RecommendationRequest::new(Weights::default(), 0, 12).validate(),
            Err(ValidationError::CountOutOfRange {
                name: "top_n",
                value: 0,
                min: 1,
                max: 20
            })
        );
        assert!(RecommendationRequest::new(Weights::default(), 21, 30).validate().is_err());
        assert!(RecommendationRequest::new(Weights::default(), 6, 31).validate().is_err());
        assert_eq!(
            RecommendationRequest::new(Weights::default(), 10, 8).validate(),
            Err(ValidationError::PoolSmallerThanTop { top_n: 10, pool_n: 8 })
        );
    }

    #[test]
    fn test_validate_checks_weights() {
        let mut weights = Weights::default();
        weights.tempo_ausencia = 150.0;
        assert!(matches!(
            RecommendationRequest::new(weights, 6, 12).validate(),
            Err(ValidationError::WeightOutOfRange { name: "tempo_ausencia", .. })
        ));
    }

    #[test]
    fn test_decade_histogram() {
        assert_eq!(decade_histogram(&[1, 10, 11, 25, 60, 51]), [2, 1, 1, 0, 0, 2]);
    }

    #[test]
    fn test_score_histogram_edges() {
        assert_eq!(
            score_histogram(&[0.0, 1.99, 2.0, 3.99, 4.0, 6.0, 7.999, 8.0, 10.0]),
            [2, 2, 1, 2, 2]
        );
    }

    #[test]
    fn test_mean_and_std() {
        let (mean, std) = mean_and_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mean, 5.0);
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(mean_and_std(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_assemble() {
        let scores: Vec<NumberScore> = (1..=60u8)
            .map(|n| NumberScore {
                number: n,
                score: if n % 7 == 0 { 0.0 } else { (n % 11) as f64 * 0.9 },
                fallback: n % 7 == 0,
            })
            .collect();
        let ranked = rank(scores);
        let rec = assemble(ranked.clone(), 6, 12);

        assert_eq!(rec.principal.len(), 6);
        assert_eq!(rec.pool.len(), 12);
        for (p, q) in rec.principal.iter().zip(&rec.pool) {
            assert_eq!(p.number, *q);
        }
        // n % 11 == 10 scores highest (21 is a multiple of 7), then n % 11 == 9.
        let principal: Vec<u8> = rec.principal.iter().map(|s| s.number).collect();
        assert_eq!(principal, vec![10, 32, 43, 54, 9, 20]);
        assert_eq!(rec.statistics.sum, 168);
        assert_eq!(rec.statistics.even_count, 4);
        assert_eq!(rec.statistics.odd_count, 2);
        assert_eq!(rec.statistics.decades, [2, 1, 0, 1, 1, 1]);
        assert_eq!(rec.chart_data.all_scores.len(), 60);
        assert_eq!(rec.chart_data.score_distribution.iter().sum::<usize>(), 60);
        assert_eq!(rec.fallback_count, 8);
    }
}
