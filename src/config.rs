use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::billing::{BillingConfig, BillingProvider, CheckoutConfig};
use crate::error::{KitError, Result};
use crate::utils::{get_env_bool_with_prefix, get_env_list_with_prefix, get_env_with_prefix};

/// Main configuration for a billing-kit application
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub billing: BillingSettings,
    #[serde(default)]
    pub checkout: CheckoutSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

/// Where the catalogue lives and which provider it must be for.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BillingSettings {
    /// Path to a `.json` or `.toml` catalogue.
    pub config_path: Option<PathBuf>,
    /// Reject catalogues for any other provider.
    pub provider: Option<BillingProvider>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckoutSettings {
    /// Domains return URLs may point at (empty = any HTTPS URL).
    #[serde(default)]
    pub allowed_domains: Vec<String>,
    /// Default return URL for checkouts.
    pub return_url: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

impl CheckoutSettings {
    /// Redirect policy for a [`CheckoutManager`](crate::billing::CheckoutManager).
    #[must_use]
    pub fn checkout_config(&self) -> CheckoutConfig {
        CheckoutConfig::new().allowed_redirect_domains(self.allowed_domains.iter().cloned())
    }
}

impl Config {
    /// Load the catalogue from `billing.config_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured, the file cannot be read or
    /// parsed, the catalogue is invalid, or it is for another provider than
    /// `billing.provider`.
    pub fn load_billing(&self) -> Result<BillingConfig> {
        let path = self.billing.config_path.as_ref().ok_or_else(|| {
            KitError::config("No billing config path set (BILLING_KIT_BILLING_CONFIG_PATH)")
        })?;

        let config = BillingConfig::load(path)?;

        if let Some(expected) = self.billing.provider {
            if config.provider != expected {
                return Err(KitError::config(format!(
                    "Billing config {} is for {} but {} is configured",
                    path.display(),
                    config.provider,
                    expected
                )));
            }
        }

        Ok(config)
    }
}

/// Builder for Config with environment variable support
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
    provider: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            provider: None,
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.config.logging.json = enabled;
        self
    }

    pub fn with_billing_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.billing.config_path = Some(path.into());
        self
    }

    /// Expected provider, by wire name (`stripe`, `paddle`, `lemon-squeezy`).
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.checkout.allowed_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.config.checkout.return_url = Some(url.into());
        self
    }

    /// Load configuration from environment variables with BILLING_KIT_ prefix
    pub fn from_env(mut self) -> Self {
        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            self.config.logging.level = level;
        }
        if let Some(json) = get_env_bool_with_prefix("LOG_JSON") {
            self.config.logging.json = json;
        }
        if let Some(path) = get_env_with_prefix("BILLING_CONFIG_PATH") {
            self.config.billing.config_path = Some(PathBuf::from(path));
        }
        if let Some(provider) = get_env_with_prefix("BILLING_PROVIDER") {
            self.provider = Some(provider);
        }
        if let Some(domains) = get_env_list_with_prefix("CHECKOUT_ALLOWED_DOMAINS") {
            self.config.checkout.allowed_domains = domains;
        }
        if let Some(url) = get_env_with_prefix("CHECKOUT_RETURN_URL") {
            self.config.checkout.return_url = Some(url);
        }

        self
    }

    /// Build the configuration, validating all settings
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration is invalid:
    /// - Invalid log level
    /// - Unknown billing provider
    /// - Default return URL rejected by the redirect policy
    pub fn build(mut self) -> Result<Config> {
        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.config.logging.level.to_lowercase().as_str()) {
            return Err(KitError::config(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.config.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        if let Some(provider) = self.provider.take() {
            let provider = provider
                .trim()
                .parse::<BillingProvider>()
                .map_err(|e| KitError::config(e.to_string()))?;
            self.config.billing.provider = Some(provider);
        }

        if let Some(url) = &self.config.checkout.return_url {
            self.config
                .checkout
                .checkout_config()
                .validate_redirect_url(url)
                .map_err(|e| KitError::config(format!("Invalid checkout return URL: {}", e)))?;
        }

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
