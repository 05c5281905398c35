use tracing::debug;

use crate::{
    PerEntryResult, RawSizing, SizingError, SizingPlan, SizingRequest, DEFAULT_LOT_MULTIPLIER,
};

/// Sizes an entry ladder against a risk budget using a fixed lot multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSizer {
    lot_multiplier: u32,
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self {
            lot_multiplier: DEFAULT_LOT_MULTIPLIER,
        }
    }
}

impl PositionSizer {
    pub fn new(lot_multiplier: u32) -> Result<Self, SizingError> {
        if lot_multiplier == 0 {
            return Err(SizingError::InvalidMultiplier);
        }
        Ok(Self { lot_multiplier })
    }

    pub fn lot_multiplier(&self) -> u32 {
        self.lot_multiplier
    }

    /// Final per-entry sizing, in input order.
    pub fn size(&self, req: &SizingRequest) -> Result<Vec<PerEntryResult>, SizingError> {
        self.plan(req).map(SizingPlan::into_results)
    }

    /// Run both sizing passes and keep the intermediate figures.
    ///
    /// Pass 1 splits the budget evenly across entries and floors each entry to
    /// whole lots while ignoring fees. Pass 2 computes one adjustment factor
    /// `budget / (raw_loss + raw_fee)` and floors `raw_lots * factor` again.
    /// Both floors are intentional; never round up into risk.
    pub fn plan(&self, req: &SizingRequest) -> Result<SizingPlan, SizingError> {
        req.validate()?;

        let m = f64::from(self.lot_multiplier);
        let risk_budget = req.risk_budget();
        let risk_per_entry = risk_budget / req.entry_prices.len() as f64;

        debug!(
            risk_budget,
            risk_per_entry,
            entries = req.entry_prices.len(),
            lot_multiplier = self.lot_multiplier,
            "sizing: budget split"
        );

        // Pass 1: raw sizing, fee-blind.
        let raw = req
            .entry_prices
            .iter()
            .map(|&entry_price| -> Result<RawSizing, SizingError> {
                let price_gap = entry_price - req.stop_loss;
                let lots = floor_lots(entry_price, risk_per_entry / (price_gap * m))?;
                let lots_f = lots as f64;
                Ok(RawSizing {
                    entry_price,
                    price_gap,
                    lots,
                    loss: price_gap * lots_f * m,
                    fee: lots_f * entry_price * m * req.fee_fraction,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let raw_total_loss: f64 = raw.iter().map(|r| r.loss).sum();
        let raw_total_fee: f64 = raw.iter().map(|r| r.fee).sum();
        let denom = raw_total_loss + raw_total_fee;

        // Zero denominator means every entry floored to zero lots.
        let adjustment_factor = if denom > 0.0 {
            Some(risk_budget / denom)
        } else {
            debug!(risk_per_entry, "sizing: no entry affords one lot");
            None
        };

        debug!(
            raw_total_loss,
            raw_total_fee,
            adjustment_factor = ?adjustment_factor,
            "sizing: fee-aware normalization"
        );

        // Pass 2: one shared factor for every entry.
        let results = raw
            .iter()
            .map(|r| -> Result<PerEntryResult, SizingError> {
                let lots = match adjustment_factor {
                    Some(f) => floor_lots(r.entry_price, r.lots as f64 * f)?,
                    None => 0,
                };
                Ok(PerEntryResult {
                    entry_price: r.entry_price,
                    lots,
                    loss: r.price_gap * lots as f64 * m,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SizingPlan {
            lot_multiplier: self.lot_multiplier,
            fee_fraction: req.fee_fraction,
            risk_budget,
            risk_per_entry,
            raw,
            raw_total_loss,
            raw_total_fee,
            adjustment_factor,
            results,
        })
    }
}

/// Size `req` with the default 100-unit lot.
pub fn size_positions(req: &SizingRequest) -> Result<Vec<PerEntryResult>, SizingError> {
    PositionSizer::default().size(req)
}

/// Whole lots in `x`. Counts at or above 2^64 would saturate under `as`.
fn floor_lots(entry_price: f64, x: f64) -> Result<u64, SizingError> {
    let lots = x.floor();
    if !lots.is_finite() || lots >= u64::MAX as f64 {
        return Err(SizingError::LotCountOverflow { entry_price, lots });
    }
    Ok(lots as u64)
}
