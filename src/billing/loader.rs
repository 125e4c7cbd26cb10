//! Loading catalogues from JSON and TOML.
//!
//! Every entry point validates before returning, so a `BillingConfig`
//! obtained here always satisfies the catalogue rules.

use std::path::Path;

use super::schema::BillingConfig;
use super::validation;
use crate::error::{KitError, Result};

impl BillingConfig {
    /// Validate an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config = validation::validate(value)?;
        tracing::debug!(
            target: "billing_kit::loader",
            provider = %config.provider,
            products = config.products.len(),
            "Billing config validated"
        );
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse and validate a TOML document.
    ///
    /// The document uses the same field names as JSON, with products as an
    /// array of tables (`[[products]]`).
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(source)?;
        let value = serde_json::to_value(value)?;
        Self::from_value(value)
    }

    /// Load a catalogue from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let source = std::fs::read_to_string(path)?;

        let result = match format {
            ConfigFormat::Json => Self::from_json_str(&source),
            #[cfg(feature = "toml")]
            ConfigFormat::Toml => Self::from_toml_str(&source),
        };

        match &result {
            Ok(config) => tracing::info!(
                target: "billing_kit::loader",
                path = %path.display(),
                provider = %config.provider,
                products = config.products.len(),
                plans = config.plans().count(),
                "Billing config loaded"
            ),
            Err(e) => tracing::error!(
                target: "billing_kit::loader",
                path = %path.display(),
                error = %e,
                "Billing config rejected"
            ),
        }

        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    #[cfg(feature = "toml")]
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            #[cfg(feature = "toml")]
            Some("toml") => Ok(Self::Toml),
            _ => Err(KitError::config(format!(
                "Unsupported billing config format: {} (expected .json{})",
                path.display(),
                if cfg!(feature = "toml") { " or .toml" } else { "" }
            ))),
        }
    }
}
