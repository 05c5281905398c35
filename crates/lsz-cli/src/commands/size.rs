//! `lsz size`: the input/validation/display shell around the sizing core.
//!
//! Flags override profile values. Risk and fee are entered as percentages and
//! converted to fractions here; the core only ever sees fractions.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use lsz_config::SizingDefaults;
use lsz_sizing::{PositionSizer, SizingPlan, SizingRequest, DEFAULT_LOT_MULTIPLIER};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::render::{self, CurrencyFormat};

#[derive(Args, Debug, Clone, Default)]
pub struct SizeArgs {
    /// Layered sizing profiles in merge order (later files override earlier)
    #[arg(long = "config")]
    pub config_paths: Vec<PathBuf>,

    /// Account balance in currency units
    #[arg(long)]
    pub balance: Option<f64>,

    /// Risk as a percent of balance (1 = 1 %)
    #[arg(long = "risk-pct")]
    pub risk_pct: Option<f64>,

    /// Stop-loss price shared by every entry
    #[arg(long = "stop-loss")]
    pub stop_loss: Option<f64>,

    /// Fee per entry as a percent of notional (0.1 = 0.1 %)
    #[arg(long = "fee-pct")]
    pub fee_pct: Option<f64>,

    /// Entry price; repeat for each entry, in order. Replaces profile entries.
    #[arg(long = "entry")]
    pub entries: Vec<f64>,

    /// Units per lot
    #[arg(long)]
    pub multiplier: Option<u32>,

    /// Print the full sizing plan as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Treat unknown profile keys as an error
    #[arg(long = "strict-config", default_value_t = false)]
    pub strict_config: bool,
}

/// Fully resolved inputs after overlaying flags on profile defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    pub request: SizingRequest,
    pub multiplier: u32,
}

pub fn run(args: SizeArgs) -> Result<()> {
    let loaded = super::load_profile(&args.config_paths, args.strict_config)?;
    let defaults = SizingDefaults::from_config_json(&loaded.config_json)?;

    let inputs = resolve(&args, &defaults)?;
    inputs
        .request
        .validate()
        .context("invalid sizing input")?;

    let sizer = PositionSizer::new(inputs.multiplier).context("invalid sizing input")?;
    let plan = sizer.plan(&inputs.request)?;

    info!(
        entries = plan.results.len(),
        total_lots = %plan.total_lots(),
        "sizing complete"
    );
    if plan.is_flat() {
        warn!(
            risk_per_entry = plan.risk_per_entry,
            "risk budget cannot afford one lot at any entry"
        );
    }

    let config_hash = (!args.config_paths.is_empty()).then_some(loaded.config_hash.as_str());

    if args.json {
        let report = JsonReport {
            config_hash,
            plan: &plan,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize sizing plan failed")?
        );
        return Ok(());
    }

    let currency = CurrencyFormat::from_settings(&defaults.currency);
    print!("{}", render::results_table(&plan.results, &currency));
    for line in render::summary_lines(&plan, config_hash) {
        println!("{line}");
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_hash: Option<&'a str>,
    #[serde(flatten)]
    plan: &'a SizingPlan,
}

/// Overlay flags on profile defaults and convert percentages to fractions.
pub fn resolve(args: &SizeArgs, defaults: &SizingDefaults) -> Result<ResolvedInputs> {
    let balance = args
        .balance
        .or(defaults.balance)
        .ok_or_else(|| missing("balance", "--balance", "/account/balance"))?;
    let risk_pct = args
        .risk_pct
        .or(defaults.risk_pct)
        .ok_or_else(|| missing("risk", "--risk-pct", "/risk/risk_pct"))?;
    let stop_loss = args
        .stop_loss
        .or(defaults.stop_loss)
        .ok_or_else(|| missing("stop loss", "--stop-loss", "/position/stop_loss"))?;
    let fee_pct = args
        .fee_pct
        .or(defaults.fee_pct)
        .ok_or_else(|| missing("fee", "--fee-pct", "/fees/fee_pct"))?;

    let entries = if !args.entries.is_empty() {
        args.entries.clone()
    } else {
        defaults.entries.clone().unwrap_or_default()
    };

    let multiplier = args
        .multiplier
        .or(defaults.multiplier)
        .unwrap_or(DEFAULT_LOT_MULTIPLIER);

    Ok(ResolvedInputs {
        request: SizingRequest::new(
            balance,
            risk_pct / 100.0,
            stop_loss,
            fee_pct / 100.0,
            entries,
        ),
        multiplier,
    })
}

fn missing(what: &str, flag: &str, pointer: &str) -> anyhow::Error {
    anyhow!("missing {what}: pass {flag} or set {pointer} in a --config profile")
}
