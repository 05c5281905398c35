//! Scenario: malformed requests fail fast
//!
//! The presentation layer validates first, but the sizer never trusts it.
//!
//! # Invariants under test
//!
//! 1. Each precondition maps to its own `SizingError` variant.
//! 2. Boundary values (fraction == 1) are accepted; zero is not.
//! 3. Non-finite inputs are rejected, never sized.
//! 4. Error messages identify the offending entry by 1-based position.

use lsz_sizing::*;

fn base() -> SizingRequest {
    SizingRequest::new(1_000_000.0, 0.01, 100.0, 0.001, vec![110.0])
}

fn sized(req: SizingRequest) -> Result<Vec<PerEntryResult>, SizingError> {
    size_positions(&req)
}

#[test]
fn non_positive_balance() {
    let mut r = base();
    r.balance = 0.0;
    assert_eq!(sized(r.clone()), Err(SizingError::InvalidBalance(0.0)));
    r.balance = -5.0;
    assert_eq!(sized(r), Err(SizingError::InvalidBalance(-5.0)));
}

#[test]
fn risk_fraction_out_of_range() {
    for bad in [0.0, -0.1, 1.0001, f64::INFINITY] {
        let mut r = base();
        r.risk_fraction = bad;
        assert!(matches!(sized(r), Err(SizingError::InvalidRiskFraction(_))));
    }
}

#[test]
fn non_positive_stop_loss() {
    let mut r = base();
    r.stop_loss = 0.0;
    assert_eq!(sized(r), Err(SizingError::InvalidStopLoss(0.0)));
}

#[test]
fn fee_fraction_out_of_range() {
    for bad in [0.0, 1.5, f64::NAN] {
        let mut r = base();
        r.fee_fraction = bad;
        assert!(matches!(sized(r), Err(SizingError::InvalidFeeFraction(_))));
    }
}

#[test]
fn empty_ladder() {
    let mut r = base();
    r.entry_prices.clear();
    assert_eq!(sized(r), Err(SizingError::NoEntryPrices));
}

#[test]
fn entry_below_stop_names_position() {
    let mut r = base();
    r.entry_prices = vec![110.0, 120.0, 95.0];
    let err = sized(r).unwrap_err();
    assert_eq!(
        err,
        SizingError::EntryNotAboveStop {
            index: 2,
            price: 95.0,
            stop_loss: 100.0,
        }
    );
    assert_eq!(
        err.to_string(),
        "entry price #3 (95) must be greater than stop loss (100)"
    );
}

#[test]
fn nan_entry_is_rejected() {
    let mut r = base();
    r.entry_prices = vec![f64::NAN];
    assert!(matches!(
        sized(r),
        Err(SizingError::EntryNotAboveStop { index: 0, .. })
    ));
}

#[test]
fn plan_validates_too() {
    let mut r = base();
    r.balance = f64::NAN;
    assert!(PositionSizer::default().plan(&r).is_err());
}
