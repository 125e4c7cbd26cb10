//! Billing catalogue: schema, validation and plan resolution.
//!
//! A catalogue lists the products an application sells at one billing
//! provider, the plans of each product and the line items of each plan.
//! It is validated once when loaded and then only read.
//!
//! # Example
//!
//! ```rust,no_run
//! use billing_kit::billing::{BillingConfig, BillingInterval, CheckoutRequest, build_session_request};
//!
//! # fn main() -> billing_kit::Result<()> {
//! let config = BillingConfig::load("billing.json")?;
//!
//! // Pricing table for the first interval the catalogue offers
//! let interval = config.plan_intervals().first().copied().unwrap_or(BillingInterval::Month);
//! for pair in billing_kit::billing::plans_for_interval(&config, interval) {
//!     let item = config.primary_line_item(&pair.plan.id)?;
//!     println!("{}: {}", pair.product.name, item.cost);
//! }
//!
//! // Provider-neutral checkout parameters for a picked plan
//! let request = CheckoutRequest::new("pro_monthly", "org_42", "https://app.example.com/billing")
//!     .with_seats(3);
//! let session = build_session_request(&config, &request)?;
//! println!("{:?}", session.mode);
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod error;
pub mod loader;
pub mod pricing;
pub mod resolver;
pub mod schema;
pub mod validation;

// Schema exports
pub use schema::{
    BillingConfig, BillingInterval, BillingProvider, LineItem, LineItemType, ParseEnumError,
    PaymentType, Plan, Product, Tier,
};

// Validation exports
pub use validation::{
    ConfigInvariant, FieldPath, Invariant, PathSegment, Rule, ValidationError, ValidationIssue,
    validate,
};

// Resolver exports
pub use resolver::{
    ProductPlanPair, get_base_line_item, get_line_item_type_by_id, get_plan_intervals,
    get_primary_line_item, get_product, get_product_plan_pair, get_product_plan_pair_by_variant_id,
};

// Pricing exports
pub use pricing::{
    LineItemSummary, PickerOption, display_cost, format_currency, line_item_summary,
    picker_options, plans_for_interval, select_plan,
};

// Checkout exports
pub use checkout::{
    CheckoutConfig, CheckoutGateway, CheckoutLineItem, CheckoutManager, CheckoutMetadata,
    CheckoutMode, CheckoutRequest, CheckoutSession, CreateCheckoutSessionRequest, UiMode,
    build_session_request,
};

// Error exports
pub use error::BillingError;
