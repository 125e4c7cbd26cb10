//! Billing catalogue model.
//!
//! A catalogue is a tree of products, each offering one or more plans, each
//! plan billing one or more line items:
//!
//! ```text
//! BillingConfig (provider)
//! └── Product (currency, features)
//!     └── Plan (interval, payment type, trial)
//!         └── LineItem (base | per-seat | metered)
//! ```
//!
//! The serde representation uses the same camelCase field names and
//! kebab-case enum values as the application's `billing.config` files, so a
//! catalogue can be moved between the frontend and this crate unchanged.
//! Optional fields may be omitted but not set to `null`, and whole-number
//! amounts are written back as integers (`49`, not `49.0`).
//!
//! Values of these types are only handed out by entry points that validate
//! them first (see [`validate`](super::validation::validate) and the
//! loaders in [`loader`](super::loader)). Code that builds a catalogue by hand
//! should finish with [`BillingConfig::validated`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{self, ValidationError};

/// Payment provider the catalogue's ids belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingProvider {
    /// Stripe.
    Stripe,
    /// Paddle.
    Paddle,
    /// Lemon Squeezy. Plans may only carry a single line item.
    LemonSqueezy,
}

impl BillingProvider {
    /// Wire name of the provider.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paddle => "paddle",
            Self::LemonSqueezy => "lemon-squeezy",
        }
    }
}

/// Billing cadence of a recurring plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    /// Billed monthly.
    Month,
    /// Billed yearly.
    Year,
}

impl BillingInterval {
    /// Wire name of the interval.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Whether a plan is bought once or renews.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    /// Single payment, no interval.
    OneTime,
    /// Subscription renewing every interval.
    Recurring,
}

impl PaymentType {
    /// Wire name of the payment type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "one-time",
            Self::Recurring => "recurring",
        }
    }
}

/// How a line item is charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineItemType {
    /// Flat fee; the plan's headline price.
    Base,
    /// Charged per team member.
    PerSeat,
    /// Charged on reported usage.
    Metered,
}

impl LineItemType {
    /// Wire name of the line item type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::PerSeat => "per-seat",
            Self::Metered => "metered",
        }
    }
}

macro_rules! wire_enum_impls {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == Self::$variant.as_str() {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseEnumError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

wire_enum_impls!(BillingProvider, "billing provider", [Stripe, Paddle, LemonSqueezy]);
wire_enum_impls!(BillingInterval, "billing interval", [Month, Year]);
wire_enum_impls!(PaymentType, "payment type", [OneTime, Recurring]);
wire_enum_impls!(LineItemType, "line item type", [Base, PerSeat, Metered]);

/// Error returned when parsing one of the catalogue enums from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

/// Serde helpers for the catalogue's wire format.
mod wire {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Largest integer an `f64` holds exactly.
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    /// Deserialize a field that may be absent but never `null`.
    pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        T::deserialize(deserializer).map(Some)
    }

    pub fn amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn optional_amount<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => amount(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Volume tier of a line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Upper bound (inclusive) of units billed at this tier's cost.
    #[serde(serialize_with = "wire::amount")]
    pub up_to: f64,
    /// Cost per unit within the tier.
    #[serde(serialize_with = "wire::amount")]
    pub cost: f64,
}

/// A single billable component of a plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Provider price/variant id.
    pub id: String,
    /// Name displayed to the user.
    pub name: String,
    /// Replaces the description inferred from the line item when set.
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cost in the product's currency.
    #[serde(serialize_with = "wire::amount")]
    pub cost: f64,
    /// How the line item is charged.
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    /// Unit of usage, e.g. "seat" or "GB". Required for metered items.
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Units included before charging. Required for metered items.
    #[serde(
        default,
        deserialize_with = "wire::present",
        serialize_with = "wire::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub included: Option<f64>,
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<Tier>>,
}

impl LineItem {
    /// Create a flat `base` line item.
    #[must_use]
    pub fn base(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self::new(id, name, cost, LineItemType::Base)
    }

    /// Create a line item of the given type with no optional fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost: f64,
        item_type: LineItemType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            cost,
            item_type,
            unit: None,
            included: None,
            tiers: None,
        }
    }

    /// Set the usage unit and included amount (metered items).
    #[must_use]
    pub fn with_usage(mut self, unit: impl Into<String>, included: f64) -> Self {
        self.unit = Some(unit.into());
        self.included = Some(included);
        self
    }

    #[must_use]
    pub fn is_base(&self) -> bool {
        self.item_type == LineItemType::Base
    }

    #[must_use]
    pub fn is_per_seat(&self) -> bool {
        self.item_type == LineItemType::PerSeat
    }

    #[must_use]
    pub fn is_metered(&self) -> bool {
        self.item_type == LineItemType::Metered
    }
}

/// A purchasable billing cadence bundling one or more line items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Plan id, unique across the catalogue.
    pub id: String,
    /// Name displayed to the user.
    pub name: String,
    /// Renewal interval. Set for recurring plans only.
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub interval: Option<BillingInterval>,
    pub payment_type: PaymentType,
    /// Trial length in days. `None` means no trial.
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub trial_period: Option<u32>,
    pub line_items: Vec<LineItem>,
}

impl Plan {
    /// Create a recurring plan billed every `interval`.
    #[must_use]
    pub fn recurring(
        id: impl Into<String>,
        name: impl Into<String>,
        interval: BillingInterval,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interval: Some(interval),
            payment_type: PaymentType::Recurring,
            trial_period: None,
            line_items,
        }
    }

    /// Create a one-time plan.
    #[must_use]
    pub fn one_time(
        id: impl Into<String>,
        name: impl Into<String>,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interval: None,
            payment_type: PaymentType::OneTime,
            trial_period: None,
            line_items,
        }
    }

    /// Set the trial period in days.
    #[must_use]
    pub fn with_trial_period(mut self, days: u32) -> Self {
        self.trial_period = Some(days);
        self
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.payment_type == PaymentType::Recurring
    }

    #[must_use]
    pub fn is_one_time(&self) -> bool {
        self.payment_type == PaymentType::OneTime
    }

    /// The first `base` line item, if any.
    #[must_use]
    pub fn base_line_item(&self) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.is_base())
    }

    /// Get a line item by id.
    #[must_use]
    pub fn line_item(&self, id: &str) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }
}

/// A marketing-level grouping of plans sharing features and description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// ISO 4217 currency code, e.g. "USD".
    pub currency: String,
    /// Badge shown on the pricing card, e.g. "Popular".
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "wire::present", skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    pub plans: Vec<Plan>,
}

impl Product {
    /// Whether the pricing card should be emphasised.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted.unwrap_or(false)
    }

    /// Get a plan of this product by id.
    #[must_use]
    pub fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.id == plan_id)
    }
}

/// The complete billing catalogue for one provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    pub provider: BillingProvider,
    pub products: Vec<Product>,
}

impl BillingConfig {
    /// Check every catalogue rule against this value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_config(self)
    }

    /// Validate and return the catalogue, for configs assembled in code.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated rule.
    pub fn validated(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }

    /// Iterate over every `(product, plan)` pair in catalogue order.
    pub fn plans(&self) -> impl Iterator<Item = (&Product, &Plan)> {
        self.products
            .iter()
            .flat_map(|product| product.plans.iter().map(move |plan| (product, plan)))
    }

    /// Iterate over every line item in catalogue order.
    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.plans().flat_map(|(_, plan)| plan.line_items.iter())
    }
}
