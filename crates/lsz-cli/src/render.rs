//! Text rendering for sizing results.
//!
//! Amounts default to Indonesian Rupiah in the id-ID style: `Rp 1.100.000`,
//! `.` for thousands, `,` for decimals, no trailing fraction zeros.

use lsz_config::CurrencySettings;
use lsz_sizing::{PerEntryResult, SizingPlan};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_sep: String,
    pub decimal_sep: String,
    pub max_fraction_digits: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "Rp".to_string(),
            thousands_sep: ".".to_string(),
            decimal_sep: ",".to_string(),
            max_fraction_digits: 2,
        }
    }
}

impl CurrencyFormat {
    /// IDR defaults with any profile overrides applied.
    pub fn from_settings(s: &CurrencySettings) -> Self {
        let d = Self::default();
        Self {
            symbol: s.symbol.clone().unwrap_or(d.symbol),
            thousands_sep: s.thousands_sep.clone().unwrap_or(d.thousands_sep),
            decimal_sep: s.decimal_sep.clone().unwrap_or(d.decimal_sep),
            max_fraction_digits: s.max_fraction_digits.unwrap_or(d.max_fraction_digits),
        }
    }

    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return amount.to_string();
        }

        let scale = 10u128.pow(u32::from(self.max_fraction_digits));
        let units = (amount.abs() * scale as f64).round() as u128;
        let whole = units / scale;
        let frac = units % scale;

        let mut out = String::new();
        // Rounds to zero -> no sign.
        if amount < 0.0 && units > 0 {
            out.push('-');
        }
        if !self.symbol.is_empty() {
            out.push_str(&self.symbol);
            out.push(' ');
        }
        out.push_str(&group_digits(whole, &self.thousands_sep));

        if frac > 0 {
            let width = usize::from(self.max_fraction_digits);
            let digits = format!("{frac:0width$}");
            out.push_str(&self.decimal_sep);
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }
}

fn group_digits(n: u128, sep: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Entry Price")]
    entry_price: String,
    #[tabled(rename = "Lots")]
    lots: u64,
    #[tabled(rename = "Loss")]
    loss: String,
}

/// One row per entry, in input order, with a trailing newline.
pub fn results_table(results: &[PerEntryResult], currency: &CurrencyFormat) -> String {
    let rows: Vec<ResultRow> = results
        .iter()
        .map(|r| ResultRow {
            entry_price: currency.format(r.entry_price),
            lots: r.lots,
            loss: currency.format(r.loss),
        })
        .collect();

    let mut table = Table::new(rows).to_string();
    table.push('\n');
    table
}

/// `key=value` lines describing the whole plan.
pub fn summary_lines(plan: &SizingPlan, config_hash: Option<&str>) -> Vec<String> {
    let factor = plan
        .adjustment_factor
        .map(|f| format!("{f:.6}"))
        .unwrap_or_else(|| "none".to_string());

    let mut lines = vec![
        format!("risk_budget={:.2}", plan.risk_budget),
        format!("risk_per_entry={:.2}", plan.risk_per_entry),
        format!("adjustment_factor={factor}"),
        format!("total_lots={}", plan.total_lots()),
        format!("total_loss={:.2}", plan.total_loss()),
        format!("total_fee={:.2}", plan.total_fee()),
    ];
    if let Some(h) = config_hash {
        lines.push(format!("config_hash={h}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsz_sizing::{PositionSizer, SizingRequest};

    #[test]
    fn idr_groups_thousands_with_dots() {
        let f = CurrencyFormat::default();
        assert_eq!(f.format(98_000.0), "Rp 98.000");
        assert_eq!(f.format(1_100_000.0), "Rp 1.100.000");
        assert_eq!(f.format(110.0), "Rp 110");
        assert_eq!(f.format(0.0), "Rp 0");
    }

    #[test]
    fn fraction_uses_comma_and_drops_trailing_zeros() {
        let f = CurrencyFormat::default();
        assert_eq!(f.format(110.5), "Rp 110,5");
        assert_eq!(f.format(1_234.25), "Rp 1.234,25");
        assert_eq!(f.format(0.004), "Rp 0");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        let f = CurrencyFormat::default();
        assert_eq!(f.format(-2_500.0), "-Rp 2.500");
        assert_eq!(f.format(-0.001), "Rp 0");
    }

    #[test]
    fn overrides_apply() {
        let f = CurrencyFormat::from_settings(&CurrencySettings {
            symbol: Some("$".into()),
            thousands_sep: Some(",".into()),
            decimal_sep: Some(".".into()),
            max_fraction_digits: Some(0),
        });
        assert_eq!(f.format(1_234_567.4), "$ 1,234,567");
    }

    #[test]
    fn empty_symbol_has_no_leading_space() {
        let f = CurrencyFormat {
            symbol: String::new(),
            ..CurrencyFormat::default()
        };
        assert_eq!(f.format(1_000.0), "1.000");
    }

    #[test]
    fn table_lists_each_entry() {
        let req = SizingRequest::new(10_000_000.0, 0.01, 100.0, 0.001, vec![110.0, 120.0]);
        let plan = PositionSizer::default().plan(&req).unwrap();
        let table = results_table(&plan.results, &CurrencyFormat::default());

        assert!(table.contains("Entry Price"));
        assert!(table.contains("Rp 49.000"));
        assert!(table.contains("Rp 48.000"));
        let first = table.find("Rp 110").unwrap();
        let second = table.find("Rp 120").unwrap();
        assert!(first < second);
    }

    #[test]
    fn summary_marks_degenerate_factor() {
        let req = SizingRequest::new(50_000.0, 0.01, 100.0, 0.001, vec![110.0]);
        let plan = PositionSizer::default().plan(&req).unwrap();
        let lines = summary_lines(&plan, Some("abc"));

        assert!(lines.contains(&"adjustment_factor=none".to_string()));
        assert!(lines.contains(&"total_lots=0".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("config_hash=abc"));
    }
}
