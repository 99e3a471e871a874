use super::common::*;
use crate::workflows::awards::domain::Metric;
use crate::workflows::awards::scoring::{ScoringEngine, WeightConfig};
use proptest::{prelude::prop, prop_assert, proptest};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn worked_example_composites() {
    let scores = ScoringEngine::new(weights())
        .score(&worked_example_cohort())
        .expect("valid cohort");

    assert_close(scores[0].composite_score, 60.0);
    assert_close(scores[1].composite_score, 40.0);
}

#[test]
fn components_add_up_to_composite() {
    let scores = ScoringEngine::new(weights())
        .score(&repeat_winner_cohort())
        .expect("valid cohort");

    for score in scores {
        let total: f64 = score.components.iter().map(|c| c.contribution).sum();
        assert_close(total, score.composite_score);
        assert_eq!(score.components.len(), Metric::ALL.len());
    }
}

#[test]
fn unweighted_metric_contributes_nothing() {
    let weights = WeightConfig::new([("performance_score", 1.0)]).expect("valid weights");
    let scores = ScoringEngine::new(weights)
        .score(&worked_example_cohort())
        .expect("valid cohort");

    assert_close(scores[0].composite_score, 100.0);
    assert_close(scores[1].composite_score, 0.0);

    let peer = scores[1]
        .components
        .iter()
        .find(|component| component.metric == Metric::PeerNominations)
        .expect("peer component present");
    assert_eq!(peer.normalized, 100.0);
    assert_eq!(peer.contribution, 0.0);
}

#[test]
fn weights_need_not_sum_to_one() {
    let doubled = WeightConfig::new([
        ("performance_score", 4.0),
        ("peer_nominations", 3.0),
        ("attendance_pct", 2.0),
        ("manager_rating", 1.0),
    ])
    .expect("valid weights");

    let scores = ScoringEngine::new(doubled)
        .score(&worked_example_cohort())
        .expect("valid cohort");
    assert_close(scores[0].composite_score, 60.0);
}

#[test]
fn scoring_is_deterministic() {
    let engine = ScoringEngine::new(weights());
    let first = engine.score(&repeat_winner_cohort()).expect("valid cohort");
    let second = engine.score(&repeat_winner_cohort()).expect("valid cohort");
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn scaling_all_weights_leaves_composites_unchanged(
        perf in 0.01f64..10.0,
        peer in 0.01f64..10.0,
        att in 0.01f64..10.0,
        mgr in 0.01f64..10.0,
        factor in 0.01f64..100.0,
    ) {
        let base = WeightConfig::from_metrics([
            (Metric::PerformanceScore, perf),
            (Metric::PeerNominations, peer),
            (Metric::AttendancePct, att),
            (Metric::ManagerRating, mgr),
        ]).expect("valid weights");
        let scaled = WeightConfig::from_metrics([
            (Metric::PerformanceScore, perf * factor),
            (Metric::PeerNominations, peer * factor),
            (Metric::AttendancePct, att * factor),
            (Metric::ManagerRating, mgr * factor),
        ]).expect("valid weights");

        let cohort = repeat_winner_cohort();
        let left = ScoringEngine::new(base).score(&cohort).expect("valid cohort");
        let right = ScoringEngine::new(scaled).score(&cohort).expect("valid cohort");

        for (a, b) in left.iter().zip(right.iter()) {
            prop_assert!((a.composite_score - b.composite_score).abs() < 1e-9);
        }
    }

    #[test]
    fn composites_stay_within_scale(
        rows in prop::collection::vec(
            (0.0f64..=100.0, 0u32..=40, 0.0f64..=100.0, 0.0f64..=10.0),
            1..25,
        ),
        perf in 0.0f64..5.0,
        peer in 0.0f64..5.0,
        att in 0.0f64..5.0,
        mgr in 0.01f64..5.0,
    ) {
        let cohort: Vec<_> = rows
            .into_iter()
            .enumerate()
            .map(|(index, (p, n, a, m))| employee(&format!("E-{index:03}"), p, n, a, m, 12))
            .collect();
        let weights = WeightConfig::from_metrics([
            (Metric::PerformanceScore, perf),
            (Metric::PeerNominations, peer),
            (Metric::AttendancePct, att),
            (Metric::ManagerRating, mgr),
        ]).expect("valid weights");

        let scores = ScoringEngine::new(weights).score(&cohort).expect("valid cohort");
        for score in scores {
            prop_assert!((0.0..=100.0).contains(&score.composite_score));
        }
    }
}
