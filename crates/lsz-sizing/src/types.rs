use serde::{Deserialize, Serialize};

use crate::SizingError;

/// One sizing invocation: account, risk appetite, stop and the entry ladder.
///
/// Fractions are plain ratios (0.01 = 1 %), not percentages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// Account balance in currency units.
    pub balance: f64,

    /// Fraction of balance the trader is willing to lose, in (0, 1].
    pub risk_fraction: f64,

    /// Price at which the whole position is assumed closed.
    pub stop_loss: f64,

    /// Fee charged per entry as a fraction of notional, in (0, 1].
    pub fee_fraction: f64,

    /// Entry ladder in caller order. Every price must sit above `stop_loss`.
    pub entry_prices: Vec<f64>,
}

impl SizingRequest {
    pub fn new(
        balance: f64,
        risk_fraction: f64,
        stop_loss: f64,
        fee_fraction: f64,
        entry_prices: Vec<f64>,
    ) -> Self {
        Self {
            balance,
            risk_fraction,
            stop_loss,
            fee_fraction,
            entry_prices,
        }
    }

    /// Total monetary risk authorised for the whole position.
    pub fn risk_budget(&self) -> f64 {
        self.balance * self.risk_fraction
    }

    /// Check every precondition of the sizing algorithm.
    ///
    /// Checks run in a fixed order (balance, risk, stop, fee, entries) so the
    /// first reported problem is deterministic. Non-finite values are rejected
    /// alongside out-of-range ones.
    pub fn validate(&self) -> Result<(), SizingError> {
        if !self.balance.is_finite() || self.balance <= 0.0 {
            return Err(SizingError::InvalidBalance(self.balance));
        }
        if !self.risk_fraction.is_finite() || self.risk_fraction <= 0.0 || self.risk_fraction > 1.0
        {
            return Err(SizingError::InvalidRiskFraction(self.risk_fraction));
        }
        if !self.stop_loss.is_finite() || self.stop_loss <= 0.0 {
            return Err(SizingError::InvalidStopLoss(self.stop_loss));
        }
        if !self.fee_fraction.is_finite() || self.fee_fraction <= 0.0 || self.fee_fraction > 1.0 {
            return Err(SizingError::InvalidFeeFraction(self.fee_fraction));
        }
        if self.entry_prices.is_empty() {
            return Err(SizingError::NoEntryPrices);
        }
        for (index, &price) in self.entry_prices.iter().enumerate() {
            if !price.is_finite() || price <= self.stop_loss {
                return Err(SizingError::EntryNotAboveStop {
                    index,
                    price,
                    stop_loss: self.stop_loss,
                });
            }
        }
        Ok(())
    }
}

/// Final sizing for a single entry price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerEntryResult {
    /// Echo of the requested entry price.
    pub entry_price: f64,

    /// Whole lots to buy at this entry.
    pub lots: u64,

    /// Loss if stopped out from this entry, excluding fee.
    pub loss: f64,
}

/// First-pass sizing for one entry, before the fee-aware rescale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSizing {
    pub entry_price: f64,
    pub price_gap: f64,
    pub lots: u64,
    pub loss: f64,
    pub fee: f64,
}

/// Everything one sizing pass produced, including the intermediate numbers
/// that drove the normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizingPlan {
    pub lot_multiplier: u32,
    pub fee_fraction: f64,
    pub risk_budget: f64,
    pub risk_per_entry: f64,
    pub raw: Vec<RawSizing>,
    pub raw_total_loss: f64,
    pub raw_total_fee: f64,

    /// `None` when no entry could afford a single lot (nothing to rescale).
    pub adjustment_factor: Option<f64>,

    pub results: Vec<PerEntryResult>,
}

impl SizingPlan {
    /// Sum of final per-entry losses.
    pub fn total_loss(&self) -> f64 {
        self.results.iter().map(|r| r.loss).sum()
    }

    /// Fees charged on the final lot counts.
    pub fn total_fee(&self) -> f64 {
        let m = f64::from(self.lot_multiplier);
        self.results
            .iter()
            .map(|r| r.lots as f64 * r.entry_price * m * self.fee_fraction)
            .sum()
    }

    /// Summed in `u128` so many near-`u64::MAX` entries cannot overflow.
    pub fn total_lots(&self) -> u128 {
        self.results.iter().map(|r| u128::from(r.lots)).sum()
    }

    /// True when every final lot count is zero.
    pub fn is_flat(&self) -> bool {
        self.results.iter().all(|r| r.lots == 0)
    }

    pub fn into_results(self) -> Vec<PerEntryResult> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SizingRequest {
        SizingRequest::new(10_000_000.0, 0.01, 100.0, 0.001, vec![110.0, 120.0])
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn risk_budget_is_balance_times_fraction() {
        assert!((valid().risk_budget() - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn fraction_of_exactly_one_is_allowed() {
        let mut r = valid();
        r.risk_fraction = 1.0;
        r.fee_fraction = 1.0;
        assert_eq!(r.validate(), Ok(()));
    }

    #[test]
    fn nan_balance_is_rejected() {
        let mut r = valid();
        r.balance = f64::NAN;
        assert!(matches!(r.validate(), Err(SizingError::InvalidBalance(_))));
    }

    #[test]
    fn first_failing_check_wins() {
        let r = SizingRequest::new(0.0, 2.0, -1.0, 0.0, vec![]);
        assert!(matches!(r.validate(), Err(SizingError::InvalidBalance(_))));
    }

    #[test]
    fn entry_equal_to_stop_is_rejected_with_index() {
        let mut r = valid();
        r.entry_prices = vec![110.0, 100.0];
        assert_eq!(
            r.validate(),
            Err(SizingError::EntryNotAboveStop {
                index: 1,
                price: 100.0,
                stop_loss: 100.0,
            })
        );
    }
}
