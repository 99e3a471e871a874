use super::common::*;
use crate::workflows::awards::domain::EmployeeId;
use crate::workflows::awards::eligibility::EligibilityPolicy;
use crate::workflows::awards::ranking::{SelectionError, WinnerSelection};
use crate::workflows::awards::service::evaluate_cohort;

#[test]
fn worked_example_ranks_and_selects_a() {
    let leaderboard = evaluate_cohort(
        &worked_example_cohort(),
        &weights(),
        &EligibilityPolicy::default(),
        None,
    )
    .expect("valid cohort");

    let entries = leaderboard.entries();
    assert_eq!(entries[0].record.employee_id, EmployeeId::from("A"));
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[1].record.employee_id, EmployeeId::from("B"));
    assert_eq!(entries[1].rank, 2);
    assert!(entries[1].eligibility.has("ineligible_tenure"));

    let winner = leaderboard.winner().expect("winner");
    assert_eq!(winner.record.employee_id, EmployeeId::from("A"));
    assert_eq!(leaderboard.eligible_count(), 1);
}

#[test]
fn ties_share_a_rank_and_break_on_employee_id() {
    let cohort = vec![
        employee("E-2", 90.0, 4, 95.0, 8.0, 24),
        employee("E-1", 90.0, 4, 95.0, 8.0, 24),
        employee("E-3", 50.0, 1, 70.0, 5.0, 24),
    ];

    let leaderboard = evaluate_cohort(&cohort, &weights(), &EligibilityPolicy::default(), None)
        .expect("valid cohort");

    let ranks: Vec<_> = leaderboard
        .entries()
        .iter()
        .map(|entry| (entry.record.employee_id.as_str().to_string(), entry.rank))
        .collect();
    assert_eq!(
        ranks,
        vec![
            ("E-1".to_string(), 1),
            ("E-2".to_string(), 1),
            ("E-3".to_string(), 3),
        ]
    );

    let winner = leaderboard.winner().expect("winner");
    assert_eq!(winner.record.employee_id, EmployeeId::from("E-1"));
}

#[test]
fn input_order_does_not_change_the_winner() {
    let mut reversed = repeat_winner_cohort();
    reversed.reverse();

    let forward = evaluate_cohort(
        &repeat_winner_cohort(),
        &weights(),
        &EligibilityPolicy::default(),
        None,
    )
    .expect("valid cohort");
    let backward = evaluate_cohort(&reversed, &weights(), &EligibilityPolicy::default(), None)
        .expect("valid cohort");

    assert_eq!(forward.entries(), backward.entries());
}

#[test]
fn top_scorer_who_won_last_month_is_skipped() {
    let last = history_entry("2026-04", "E");
    let leaderboard = evaluate_cohort(
        &repeat_winner_cohort(),
        &weights(),
        &EligibilityPolicy::default(),
        Some(last),
    )
    .expect("valid cohort");

    assert_eq!(
        leaderboard.entries()[0].record.employee_id,
        EmployeeId::from("E")
    );
    let winner = leaderboard.winner().expect("winner");
    assert_eq!(winner.record.employee_id, EmployeeId::from("F"));
}

#[test]
fn all_ineligible_yields_no_winner() {
    let cohort = vec![
        employee("N-1", 90.0, 4, 95.0, 8.0, 2),
        employee("N-2", 70.0, 2, 85.0, 6.0, 4),
    ];

    let leaderboard = evaluate_cohort(&cohort, &weights(), &EligibilityPolicy::default(), None)
        .expect("valid cohort");

    assert_eq!(leaderboard.entries().len(), 2);
    assert_eq!(
        leaderboard.winner(),
        Err(SelectionError::NoEligibleCandidate { cohort_size: 2 })
    );

    let selection = WinnerSelection::from_leaderboard(&leaderboard);
    assert!(selection.winner.is_none());
    assert!(selection
        .no_winner_reason
        .expect("reason present")
        .contains("no eligible candidate"));
}
