//! Command handler modules for lsz.
//!
//! Shared utilities used by multiple command paths live here.

pub mod size;

use anyhow::{Context, Result};
use lsz_config::{report_unused_keys, LoadedConfig, UnusedKeyPolicy};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Load layered profiles (or an empty one) and run the unused-key guard.
///
/// `strict` turns unused keys into an error; otherwise each one is logged.
pub fn load_profile(paths: &[PathBuf], strict: bool) -> Result<LoadedConfig> {
    let loaded = if paths.is_empty() {
        LoadedConfig::empty()?
    } else {
        lsz_config::load_layered_yaml(paths).context("failed to load sizing profile")?
    };

    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    for ptr in &report.unused_leaf_pointers {
        warn!(pointer = %ptr, "unused config key (ignored)");
    }

    debug!(
        config_hash = %loaded.config_hash,
        layers = paths.len(),
        "sizing profile loaded"
    );
    Ok(loaded)
}
