//! Unit tests for candidate scoring.
#![expect(clippy::float_arithmetic, reason = "tests compare computed scores")]

use rstest::{fixture, rstest};
use shiftplan_core::geometry::lat_lng;
use shiftplan_core::test_support::FixedDemand;
use shiftplan_core::{BreakWindow, Candidate, Reference, StopKind, TimeOfDay, haversine_km};

use super::*;

#[fixture]
fn scorer() -> CandidateScorer<FixedDemand> {
    CandidateScorer::new(FixedDemand(1.0))
}

#[fixture]
fn reference() -> Reference {
    Reference {
        location: lat_lng(1.3521, 103.8198),
        time: TimeOfDay::from_hm(11, 50),
    }
}

fn lunch() -> Vec<BreakWindow> {
    vec![BreakWindow::new(12, 13)]
}

fn scored(score: Option<f64>, label: &str) -> Candidate {
    let mut candidate = Candidate::at(lat_lng(0.0, 0.0), label);
    candidate.score = score;
    candidate
}

#[rstest]
fn arrival_inside_break_halves_the_score(
    scorer: CandidateScorer<FixedDemand>,
    reference: Reference,
) {
    let candidate = Candidate::at(lat_lng(1.36, 103.83), "Toa Payoh").with_duration_sec(1200);
    let penalised = scorer.score(&reference, &candidate, StopKind::Dropoff, &lunch());
    let free = scorer.score(&reference, &candidate, StopKind::Dropoff, &[]);

    assert!(penalised.crosses_break);
    assert!(!free.crosses_break);
    let (Some(half), Some(full)) = (penalised.score, free.score) else {
        panic!("both candidates should be scored");
    };
    assert!((half - full * 0.5).abs() < 1e-12);
}

#[rstest]
fn arrival_at_break_end_is_not_penalised(
    scorer: CandidateScorer<FixedDemand>,
    reference: Reference,
) {
    // 11:50 plus 70 minutes lands exactly on 13:00.
    let candidate = Candidate::at(lat_lng(1.36, 103.83), "Novena").with_duration_sec(4200);
    let result = scorer.score(&reference, &candidate, StopKind::Pickup, &lunch());
    assert!(!result.crosses_break);
}

#[rstest]
fn dropoff_score_uses_fare(scorer: CandidateScorer<FixedDemand>, reference: Reference) {
    let destination = lat_lng(1.30, 103.85);
    let distance = haversine_km(reference.location, destination);
    let result = scorer.score(
        &reference,
        &Candidate::at(destination, "Marina"),
        StopKind::Dropoff,
        &[],
    );

    let fare = 4.5 + distance * 0.7;
    assert_eq!(result.revenue, Some(fare));
    let expected = fare - distance * 0.5;
    assert!(result.score.is_some_and(|s| (s - expected).abs() < 1e-9));
}

#[rstest]
fn pickup_score_uses_demand(scorer: CandidateScorer<FixedDemand>, reference: Reference) {
    let destination = lat_lng(1.30, 103.85);
    let distance = haversine_km(reference.location, destination);
    let result = scorer.score(
        &reference,
        &Candidate::at(destination, "Marina"),
        StopKind::Pickup,
        &[],
    );

    assert_eq!(result.revenue, None);
    assert_eq!(result.demand_signal, Some(1.0));
    let expected = 1.0 - distance * 0.5;
    assert!(result.score.is_some_and(|s| (s - expected).abs() < 1e-9));
}

#[rstest]
fn missing_duration_is_estimated_from_distance(
    scorer: CandidateScorer<FixedDemand>,
    reference: Reference,
) {
    let destination = lat_lng(1.30, 103.85);
    let result = scorer.score(
        &reference,
        &Candidate::at(destination, "Marina"),
        StopKind::Pickup,
        &[],
    );
    let expected = shiftplan_core::travel_seconds(haversine_km(reference.location, destination), 60.0);
    assert_eq!(result.duration_sec, Some(expected));
}

#[rstest]
fn demand_is_clamped_before_use(reference: Reference) {
    let scorer = CandidateScorer::new(FixedDemand(10.0));
    let result = scorer.score(
        &reference,
        &Candidate::at(reference.location, "here"),
        StopKind::Pickup,
        &[],
    );
    assert_eq!(result.demand_signal, Some(2.0));
}

#[rstest]
fn score_all_preserves_order(scorer: CandidateScorer<FixedDemand>, reference: Reference) {
    let candidates = vec![
        Candidate::at(lat_lng(1.44, 103.78), "far"),
        Candidate::at(lat_lng(1.35, 103.82), "near"),
    ];
    let results = scorer.score_all(&reference, &candidates, StopKind::Pickup, &[]);
    let labels: Vec<&str> = results.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["far", "near"]);
}

#[rstest]
#[case(vec![Some(1.0), Some(3.0), Some(3.0)], Some(1))]
#[case(vec![None, Some(-1.0)], Some(1))]
#[case(vec![None, None], None)]
#[case(vec![Some(f64::NAN), Some(0.0)], Some(1))]
#[case(vec![], None)]
fn recommended_prefers_first_maximum(#[case] scores: Vec<Option<f64>>, #[case] expected: Option<usize>) {
    let candidates: Vec<Candidate> = scores
        .into_iter()
        .enumerate()
        .map(|(i, s)| scored(s, &i.to_string()))
        .collect();
    assert_eq!(recommended(&candidates), expected);
}

#[rstest]
fn rank_is_stable_and_descending() {
    let ranked = rank(vec![
        scored(Some(1.0), "a"),
        scored(None, "b"),
        scored(Some(2.0), "c"),
        scored(Some(1.0), "d"),
    ]);
    let labels: Vec<&str> = ranked.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["c", "a", "d", "b"]);
}

#[rstest]
#[case(ScoreWeights { speed_kmh: 0.0, ..ScoreWeights::default() }, "speed_kmh")]
#[case(ScoreWeights { break_penalty_factor: 1.5, ..ScoreWeights::default() }, "break_penalty_factor")]
#[case(ScoreWeights { per_km_rate: f64::NAN, ..ScoreWeights::default() }, "per_km_rate")]
fn invalid_weights_are_rejected(#[case] weights: ScoreWeights, #[case] expected: &str) {
    let result = CandidateScorer::with_weights(FixedDemand(0.0), weights);
    assert!(matches!(
        result,
        Err(ScorerError::InvalidWeights { field, .. }) if field == expected
    ));
}
