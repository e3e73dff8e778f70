use proptest::prelude::*;

use megafuzzy_db::models::DrawRecord;
use megafuzzy_engine::normalize::min_max;
use megafuzzy_engine::report::RecommendationRequest;
use megafuzzy_engine::weights::Weights;
use megafuzzy_engine::ScoringEngine;

/// Six distinct numbers in 1..=60.
fn draw_numbers() -> impl Strategy<Value = Vec<u8>> {
    proptest::sample::subsequence((1..=60u8).collect::<Vec<_>>(), 6).prop_shuffle()
}

fn history(max_draws: usize) -> impl Strategy<Value = Vec<DrawRecord>> {
    prop::collection::vec((draw_numbers(), 1u64..10), 1..max_draws).prop_map(|rows| {
        let mut day = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        rows.into_iter()
            .enumerate()
            .map(|(i, (numbers, gap))| {
                day = day + chrono::Days::new(gap);
                DrawRecord {
                    draw_id: i as u32 + 1,
                    date: day.format("%Y-%m-%d").to_string(),
                    numbers,
                }
            })
            .collect()
    })
}

fn weight() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(100.0), 0.0..=100.0f64]
}

fn weights() -> impl Strategy<Value = Weights> {
    (weight(), weight(), weight(), weight(), weight()).prop_map(|(f, a, p, e, s)| Weights {
        frequencia_historica: f,
        tempo_ausencia: a,
        distribuicao_posicional: p,
        equilibrio_par_impar: e,
        tendencia_soma: s,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn statistics_are_consistent(
        records in history(30),
        weights in weights(),
        top_n in 1usize..=20,
        extra in 0usize..=10,
    ) {
        let engine = ScoringEngine::from_records(records).unwrap();
        let pool_n = top_n + extra;
        let rec = engine
            .compute_recommendations(&RecommendationRequest::new(weights, top_n, pool_n))
            .unwrap();

        prop_assert_eq!(rec.principal.len(), top_n);
        prop_assert_eq!(rec.pool.len(), pool_n);
        prop_assert_eq!(rec.statistics.even_count + rec.statistics.odd_count, top_n);
        prop_assert_eq!(rec.statistics.decades.iter().sum::<usize>(), top_n);
        prop_assert_eq!(rec.chart_data.score_distribution.iter().sum::<usize>(), 60);
        prop_assert_eq!(rec.chart_data.all_scores.len(), 60);

        for (p, n) in rec.principal.iter().zip(&rec.pool) {
            prop_assert_eq!(p.number, *n);
        }
        for pair in rec.chart_data.all_scores.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].number < pair[1].number)
            );
        }
        for s in &rec.chart_data.all_scores {
            prop_assert!((0.0..=10.0).contains(&s.score));
            if s.fallback {
                prop_assert_eq!(s.score, 0.0);
            }
        }
    }

    #[test]
    fn frequency_sums_to_six_per_draw(records in history(40)) {
        let draws = records.len() as u32;
        let engine = ScoringEngine::from_records(records).unwrap();
        let total: u32 = engine.features().iter().map(|v| v.frequency_raw).sum();
        prop_assert_eq!(total, 6 * draws);
        prop_assert_eq!(engine.features().len(), 60);
    }

    #[test]
    fn features_stay_in_universe(records in history(25)) {
        let engine = ScoringEngine::from_records(records).unwrap();
        for v in engine.features().iter() {
            for x in v.values() {
                prop_assert!((0.0..=100.0).contains(&x), "number {} value {}", v.number, x);
            }
        }
    }

    #[test]
    fn normalizer_hits_both_ends(values in prop::collection::vec(-1000.0..1000.0f64, 2..60)) {
        let out = min_max(&values);
        prop_assert_eq!(out.len(), values.len());
        prop_assert!(out.iter().all(|v| (0.0..=100.0).contains(v)));

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if max > min {
            prop_assert!(out.iter().any(|&v| v == 0.0));
            prop_assert!(out.iter().any(|&v| v == 100.0));
        } else {
            prop_assert!(out.iter().all(|&v| v == 50.0));
        }
    }
}
