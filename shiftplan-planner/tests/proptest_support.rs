//! Proptest strategies for route-building property tests.
//!
//! The strategies only produce inputs that pass shift validation, so property
//! bodies can focus on the builder's invariants.

use proptest::prelude::*;
use shiftplan_core::test_support::shift_with_breaks;
use shiftplan_core::{BreakWindow, ShiftParameters};
use shiftplan_planner::test_support::candidate;
use shiftplan_core::Candidate;

/// Strategy for a valid shift with up to three breaks inside it.
pub fn shift_strategy() -> impl Strategy<Value = ShiftParameters> {
    (0_u32..20, 2_u32..24).prop_flat_map(|(start, length)| {
        let end = start + length;
        let window = (start..end).prop_flat_map(move |s| {
            ((s + 1)..=end).prop_map(move |e| BreakWindow::new(s, e))
        });
        proptest::collection::vec(window, 0..3).prop_filter_map(
            "shift must validate",
            move |breaks| shift_with_breaks(start, end, &breaks).ok(),
        )
    })
}

/// Strategy for a sequence of candidates with known travel times and fares.
///
/// Fares are whole quarters so sums are exact in any order.
pub fn candidates_strategy(max_len: usize) -> impl Strategy<Value = Vec<Candidate>> {
    proptest::collection::vec(
        (0_u32..7200, 1_u32..400, 1.25_f64..1.45, 103.7_f64..103.95),
        1..=max_len,
    )
    .prop_map(|steps| {
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (duration, quarters, lat, lng))| {
                candidate(&format!("step {i}"), lat, lng, duration)
                    .with_revenue(f64::from(quarters) * 0.25)
            })
            .collect()
    })
}
