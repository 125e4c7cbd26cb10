//! Subcommand implementations.

pub mod checkout;
pub mod intervals;
pub mod plan;
pub mod plans;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use billing_kit::{BillingConfig, Config};

/// The file argument if given, else the configured catalogue path.
pub fn catalogue_path(config: &Config, file: Option<PathBuf>) -> Result<PathBuf> {
    file.or_else(|| config.billing.config_path.clone()).context(
        "No catalogue file given and BILLING_KIT_BILLING_CONFIG_PATH is not set",
    )
}

/// Load and validate a catalogue, attaching the path to any error.
pub fn load(path: &Path) -> Result<BillingConfig> {
    BillingConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}
