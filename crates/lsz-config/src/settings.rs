use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MAX_FRACTION_DIGITS: u32 = 9;

/// Values a sizing profile may pre-fill. Every field is optional; the CLI
/// overlays its own flags and decides what is still missing.
///
/// Percent fields stay percentages here (1.0 = 1 %). Conversion to fractions
/// happens where the request is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizingDefaults {
    pub balance: Option<f64>,
    pub risk_pct: Option<f64>,
    pub fee_pct: Option<f64>,
    pub multiplier: Option<u32>,
    pub stop_loss: Option<f64>,
    pub entries: Option<Vec<f64>>,
    pub currency: CurrencySettings,
}

/// Display overrides under `/display/currency`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    pub symbol: Option<String>,
    pub thousands_sep: Option<String>,
    pub decimal_sep: Option<String>,
    pub max_fraction_digits: Option<u8>,
}

impl SizingDefaults {
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        Ok(Self {
            balance: opt_f64(cfg, "/account/balance")?,
            risk_pct: opt_f64(cfg, "/risk/risk_pct")?,
            fee_pct: opt_f64(cfg, "/fees/fee_pct")?,
            multiplier: opt_u32(cfg, "/lots/multiplier")?,
            stop_loss: opt_f64(cfg, "/position/stop_loss")?,
            entries: opt_f64_list(cfg, "/position/entries")?,
            currency: CurrencySettings {
                symbol: opt_string(cfg, "/display/currency/symbol")?,
                thousands_sep: opt_string(cfg, "/display/currency/thousands_sep")?,
                decimal_sep: opt_string(cfg, "/display/currency/decimal_sep")?,
                max_fraction_digits: opt_fraction_digits(
                    cfg,
                    "/display/currency/max_fraction_digits",
                )?,
            },
        })
    }
}

/// Missing and explicit `null` both mean "not set".
fn present<'a>(cfg: &'a Value, ptr: &str) -> Option<&'a Value> {
    cfg.pointer(ptr).filter(|v| !v.is_null())
}

fn opt_f64(cfg: &Value, ptr: &str) -> Result<Option<f64>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(v) => match v.as_f64() {
            Some(n) => Ok(Some(n)),
            None => bail!("CONFIG_INVALID_VALUE leaf={ptr}: expected a number, got {v}"),
        },
    }
}

fn opt_u32(cfg: &Value, ptr: &str) -> Result<Option<u32>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(v) => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Ok(Some(n)),
            None => bail!("CONFIG_INVALID_VALUE leaf={ptr}: expected a non-negative integer, got {v}"),
        },
    }
}

/// At most 9; the renderer scales amounts by 10^digits.
fn opt_fraction_digits(cfg: &Value, ptr: &str) -> Result<Option<u8>> {
    match opt_u32(cfg, ptr)? {
        None => Ok(None),
        Some(d) if d <= MAX_FRACTION_DIGITS => Ok(Some(d as u8)),
        Some(d) => bail!(
            "CONFIG_INVALID_VALUE leaf={ptr}: expected at most {MAX_FRACTION_DIGITS} digits, got {d}"
        ),
    }
}

fn opt_string(cfg: &Value, ptr: &str) -> Result<Option<String>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v) => bail!("CONFIG_INVALID_VALUE leaf={ptr}: expected a string, got {v}"),
    }
}

fn opt_f64_list(cfg: &Value, ptr: &str) -> Result<Option<Vec<f64>>> {
    match present(cfg, ptr) {
        None => Ok(None),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item.as_f64() {
                    Some(n) => out.push(n),
                    None => bail!("CONFIG_INVALID_VALUE leaf={ptr}/{i}: expected a number, got {item}"),
                }
            }
            Ok(Some(out))
        }
        Some(v) => bail!("CONFIG_INVALID_VALUE leaf={ptr}: expected a list of prices, got {v}"),
    }
}
