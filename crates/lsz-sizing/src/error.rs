use thiserror::Error;

/// Invalid-argument conditions raised when a request breaks a sizing
/// precondition. Messages follow the prompts an operator sees on bad input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("invalid balance {0}: balance must be a positive amount")]
    InvalidBalance(f64),

    #[error("invalid risk fraction {0}: risk must be within (0, 100%]")]
    InvalidRiskFraction(f64),

    #[error("invalid stop loss {0}: stop loss must be a positive price")]
    InvalidStopLoss(f64),

    #[error("invalid fee fraction {0}: fee must be within (0, 100%]")]
    InvalidFeeFraction(f64),

    #[error("at least one entry price is required")]
    NoEntryPrices,

    #[error("entry price #{} ({price}) must be greater than stop loss ({stop_loss})", .index + 1)]
    EntryNotAboveStop {
        index: usize,
        price: f64,
        stop_loss: f64,
    },

    #[error("lot multiplier must be greater than zero")]
    InvalidMultiplier,

    #[error("entry price {entry_price}: {lots} lots exceeds the largest representable lot count")]
    LotCountOverflow { entry_price: f64, lots: f64 },
}
