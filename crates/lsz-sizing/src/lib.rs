//! lsz-sizing
//!
//! Multi-entry lot sizing under a single stop-loss.
//!
//! Goals:
//! - Equal risk budget per entry price
//! - Whole-lot quantization (floor, never round up)
//! - Fee-aware normalization so loss + fee fits the budget
//! - Fail-fast input validation for callers that skip their own
//!
//! Deterministic, pure logic. No IO, no time, no shared state.

mod engine;
mod error;
mod types;

pub use engine::{size_positions, PositionSizer};
pub use error::SizingError;
pub use types::*;

/// Units per lot in the reference market (one lot = 100 shares).
pub const DEFAULT_LOT_MULTIPLIER: u32 = 100;
