//! billing-kit - Billing catalogues for SaaS applications
//!
//! billing-kit validates the catalogue an application sells from (products,
//! their plans and the line items of each plan), answers the lookups pricing
//! pages and webhooks need, and plans checkout sessions for the configured
//! billing provider.
//!
//! # Features
//!
//! - **Validation**: Every catalogue rule checked at load, with all violations reported
//! - **Resolution**: Plan, product and line item lookups by id or provider variant
//! - **Pricing**: Pricing table and plan picker views
//! - **Checkout**: Provider-neutral checkout session parameters behind a gateway trait
//! - **Loading**: JSON and TOML catalogues
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use billing_kit::{self, ConfigBuilder};
//!
//! fn main() -> billing_kit::Result<()> {
//!     // Initialize logging
//!     billing_kit::init_tracing();
//!
//!     let config = ConfigBuilder::new()
//!         .from_env()
//!         .build()?;
//!
//!     // Fails at startup if the catalogue is invalid
//!     let billing = config.load_billing()?;
//!
//!     let pair = billing.product_plan_pair("pro_monthly")?;
//!     println!("{} / {}", pair.product.name, pair.plan.name);
//!     Ok(())
//! }
//! ```

pub mod billing;
mod config;
mod error;
pub mod utils;

// Re-exports for public API
pub use billing::{
    BillingConfig, BillingError, BillingInterval, BillingProvider, LineItem, LineItemType,
    PaymentType, Plan, Product, ValidationError,
};
pub use config::{BillingSettings, CheckoutSettings, Config, ConfigBuilder, LoggingConfig};
pub use error::{KitError, Result};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::utils::get_env_bool_with_prefix;

/// Same lookup `ConfigBuilder::from_env` uses for `logging.json`.
fn json_logs_from_env() -> bool {
    get_env_bool_with_prefix("LOG_JSON").unwrap_or(false)
}

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, typically in main()
/// before loading the catalogue.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "billing_kit=debug")
/// - `BILLING_KIT_LOG_JSON` (or `LOG_JSON`): Set to "true", "1" or "yes" for
///   JSON formatted logs
///
/// # Example
///
/// ```rust,no_run
/// billing_kit::init_tracing();
/// ```
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs_from_env() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Initialize tracing with a custom configuration
///
/// `RUST_LOG`, when set, takes precedence over `config.logging.level`.
/// Logs go to stderr so command output on stdout stays parseable.
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
