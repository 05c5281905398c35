//! Scenario: budget too small for a single lot anywhere
//!
//! # Invariants under test
//!
//! 1. Every raw lot floors to zero -> loss + fee denominator is exactly zero.
//! 2. No division happens: `adjustment_factor` is `None`, no NaN leaks out.
//! 3. Final lots and losses are all zero; the result is Ok, not an error.
//! 4. A partial shortfall (some entries zero, others not) is NOT degenerate.

use lsz_sizing::*;

#[test]
fn tiny_budget_returns_all_zero_lots() {
    // Budget 500, one lot at gap 10 costs 1,000 of risk.
    let req = SizingRequest::new(50_000.0, 0.01, 100.0, 0.001, vec![110.0]);
    let plan = PositionSizer::default().plan(&req).unwrap();

    assert_eq!(plan.adjustment_factor, None);
    assert_eq!(plan.raw_total_loss, 0.0);
    assert_eq!(plan.raw_total_fee, 0.0);
    assert!(plan.is_flat());
    assert_eq!(plan.results[0].lots, 0);
    assert_eq!(plan.results[0].loss, 0.0);
}

#[test]
fn degenerate_ladder_keeps_shape_and_order() {
    let ladder = vec![150.0, 120.0, 200.0];
    let req = SizingRequest::new(10_000.0, 0.05, 100.0, 0.001, ladder.clone());
    let out = size_positions(&req).unwrap();

    assert_eq!(out.len(), 3);
    for (r, p) in out.iter().zip(&ladder) {
        assert_eq!(r.entry_price, *p);
        assert_eq!(r.lots, 0);
        assert_eq!(r.loss, 0.0);
        assert!(!r.loss.is_nan());
    }
}

#[test]
fn partial_shortfall_still_normalizes() {
    // Per-entry budget 1,500: gap 10 affords 1 lot, gap 100 affords none.
    let req = SizingRequest::new(300_000.0, 0.01, 100.0, 0.001, vec![110.0, 200.0]);
    let plan = PositionSizer::default().plan(&req).unwrap();

    assert_eq!(plan.raw[0].lots, 1);
    assert_eq!(plan.raw[1].lots, 0);
    assert!(plan.adjustment_factor.is_some());
    assert_eq!(plan.results[1].lots, 0);
    assert!(plan.total_loss() <= plan.risk_budget);
}
