//! Catalogue validation.
//!
//! A catalogue is checked in two passes per object, deepest first
//! (line item → plan → product → config):
//!
//! 1. **Field rules** - non-empty ids and names, three-letter currency codes,
//!    non-negative costs, positive trial periods, non-empty lists.
//! 2. **Invariants** - the ordered tables below ([`LINE_ITEM_INVARIANTS`],
//!    [`PLAN_INVARIANTS`], [`PRODUCT_INVARIANTS`], [`CONFIG_INVARIANTS`]).
//!    Each entry names its [`Rule`], the fields it relates and the message
//!    reported when it does not hold.
//!
//! Every violation is collected, in evaluation order, so the first issue of
//! a [`ValidationError`] is always the first rule that failed.
//!
//! # Example
//!
//! ```rust
//! use billing_kit::billing::validate;
//! use serde_json::json;
//!
//! let result = validate(json!({
//!     "provider": "stripe",
//!     "products": [{
//!         "id": "starter",
//!         "name": "Starter",
//!         "description": "For individuals",
//!         "currency": "USD",
//!         "features": ["Reports"],
//!         "plans": [{
//!             "id": "starter_monthly",
//!             "name": "Starter Monthly",
//!             "paymentType": "recurring",
//!             "lineItems": [{ "id": "price_1", "name": "Base", "cost": 9.99, "type": "base" }]
//!         }]
//!     }]
//! }));
//!
//! let err = result.unwrap_err();
//! assert_eq!(err.first().message, "Recurring plans must have an interval");
//! assert_eq!(err.first().path.to_string(), "products.0.plans.0.paymentType.interval");
//! ```

use std::collections::HashSet;
use std::fmt;

use serde_path_to_error::Segment;

use super::schema::{BillingConfig, BillingProvider, LineItem, PaymentType, Plan, Product};

/// Required length of a currency code.
const CURRENCY_CODE_LENGTH: usize = 3;

/// Validate an untyped catalogue.
///
/// Shape errors (wrong JSON types, unknown enum values, missing required
/// fields, explicit nulls) are reported as a single [`Rule::Schema`] issue
/// at the offending field; a well-shaped catalogue is then checked against
/// every field rule and invariant.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the catalogue is malformed or violates
/// any rule.
pub fn validate(raw: serde_json::Value) -> Result<BillingConfig, ValidationError> {
    let config: BillingConfig = serde_path_to_error::deserialize(raw).map_err(shape_error)?;
    config.validated()
}

fn shape_error(err: serde_path_to_error::Error<serde_json::Error>) -> ValidationError {
    let path = err.path().iter().fold(FieldPath::root(), |path, segment| match segment {
        Segment::Seq { index } => path.index(*index),
        Segment::Map { key } => path.key(key.clone()),
        Segment::Enum { variant } => path.key(variant.clone()),
        Segment::Unknown => path,
    });

    let message = err.into_inner().to_string();
    // serde reports a missing field on the object that lacks it
    let path = match missing_field(&message) {
        Some(field) => path.key(field),
        None => path,
    };

    ValidationError::schema(path, message)
}

fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.strip_suffix('`')
}

/// Check a typed catalogue against every field rule and invariant.
pub(crate) fn validate_config(config: &BillingConfig) -> Result<(), ValidationError> {
    let mut validator = Validator::default();
    validator.check_config(config);
    validator.finish()
}

// =============================================================================
// Rules
// =============================================================================

/// Identifies which rule an issue violates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The input does not have the catalogue's shape.
    Schema,
    /// A string or list that must not be empty is empty.
    NonEmpty,
    /// A currency code is not exactly three characters.
    CurrencyCode,
    /// A cost or tier bound is negative or not a finite number.
    NonNegative,
    /// A trial period is zero.
    PositiveTrialPeriod,
    /// A metered line item lacks its unit or included amount.
    MeteredUnitAndIncluded,
    /// A plan has no line items.
    PlanHasLineItems,
    /// A one-time plan declares an interval.
    OneTimeWithoutInterval,
    /// A recurring plan has no interval.
    RecurringRequiresInterval,
    /// Two line items of one plan share an id.
    UniqueLineItemIdsInPlan,
    /// A one-time plan has a line item that is not `base`.
    OneTimeBaseItemsOnly,
    /// A product has no plans.
    ProductHasPlans,
    /// Two plans of one product share an id.
    UniquePlanIdsInProduct,
    /// Two line items anywhere in the catalogue share an id.
    UniqueLineItemIds,
    /// Two plans anywhere in the catalogue share an id.
    UniquePlanIds,
    /// Two products share an id.
    UniqueProductIds,
    /// A Lemon Squeezy plan has more than one line item.
    LemonSqueezySingleLineItem,
}

impl Rule {
    /// Stable name of the rule, suitable for logs and metrics labels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::NonEmpty => "non-empty",
            Self::CurrencyCode => "currency-code",
            Self::NonNegative => "non-negative",
            Self::PositiveTrialPeriod => "positive-trial-period",
            Self::MeteredUnitAndIncluded => "metered-unit-and-included",
            Self::PlanHasLineItems => "plan-has-line-items",
            Self::OneTimeWithoutInterval => "one-time-without-interval",
            Self::RecurringRequiresInterval => "recurring-requires-interval",
            Self::UniqueLineItemIdsInPlan => "unique-line-item-ids-in-plan",
            Self::OneTimeBaseItemsOnly => "one-time-base-items-only",
            Self::ProductHasPlans => "product-has-plans",
            Self::UniquePlanIdsInProduct => "unique-plan-ids-in-product",
            Self::UniqueLineItemIds => "unique-line-item-ids",
            Self::UniquePlanIds => "unique-plan-ids",
            Self::UniqueProductIds => "unique-product-ids",
            Self::LemonSqueezySingleLineItem => "lemon-squeezy-single-line-item",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cross-field rule over a single catalogue object.
pub struct Invariant<T> {
    pub rule: Rule,
    /// Fields the rule relates, appended to the object's path on failure.
    pub fields: &'static [&'static str],
    pub message: &'static str,
    pub holds: fn(&T) -> bool,
}

/// A rule over the whole catalogue.
///
/// `violation` returns the path of the first offending location, or `None`
/// when the rule holds.
pub struct ConfigInvariant {
    pub rule: Rule,
    pub message: &'static str,
    pub violation: fn(&BillingConfig) -> Option<FieldPath>,
}

pub const LINE_ITEM_INVARIANTS: &[Invariant<LineItem>] = &[Invariant {
    rule: Rule::MeteredUnitAndIncluded,
    fields: &["type", "unit", "included"],
    message: "Metered line items must have a unit and included amount",
    holds: |item| {
        !item.is_metered()
            || (item.unit.as_deref().is_some_and(|unit| !unit.is_empty())
                && item.included.is_some())
    },
}];

pub const PLAN_INVARIANTS: &[Invariant<Plan>] = &[
    Invariant {
        rule: Rule::PlanHasLineItems,
        fields: &["lineItems"],
        message: "Plans must have at least one line item",
        holds: |plan| !plan.line_items.is_empty(),
    },
    Invariant {
        rule: Rule::OneTimeWithoutInterval,
        fields: &["paymentType", "interval"],
        message: "One-time plans must not have an interval",
        holds: |plan| plan.payment_type != PaymentType::OneTime || plan.interval.is_none(),
    },
    Invariant {
        rule: Rule::RecurringRequiresInterval,
        fields: &["paymentType", "interval"],
        message: "Recurring plans must have an interval",
        holds: |plan| plan.payment_type != PaymentType::Recurring || plan.interval.is_some(),
    },
    Invariant {
        rule: Rule::UniqueLineItemIdsInPlan,
        fields: &["lineItems"],
        message: "Line item IDs must be unique",
        holds: |plan| all_unique(plan.line_items.iter().map(|item| item.id.as_str())),
    },
    Invariant {
        rule: Rule::OneTimeBaseItemsOnly,
        fields: &["paymentType", "lineItems"],
        message: "One-time plans must not have non-base line items",
        holds: |plan| {
            plan.payment_type != PaymentType::OneTime
                || plan.line_items.iter().all(|item| item.is_base())
        },
    },
];

pub const PRODUCT_INVARIANTS: &[Invariant<Product>] = &[
    Invariant {
        rule: Rule::ProductHasPlans,
        fields: &["plans"],
        message: "Products must have at least one plan",
        holds: |product| !product.plans.is_empty(),
    },
    Invariant {
        rule: Rule::UniquePlanIdsInProduct,
        fields: &["plans"],
        message: "Plan IDs must be unique",
        holds: |product| all_unique(product.plans.iter().map(|plan| plan.id.as_str())),
    },
];

pub const CONFIG_INVARIANTS: &[ConfigInvariant] = &[
    ConfigInvariant {
        rule: Rule::UniqueLineItemIds,
        message: "Line item IDs must be unique",
        violation: |config| {
            (!all_unique(config.line_items().map(|item| item.id.as_str())))
                .then(|| FieldPath::root().key("products"))
        },
    },
    ConfigInvariant {
        rule: Rule::UniquePlanIds,
        message: "Plan IDs must be unique",
        violation: |config| {
            (!all_unique(config.plans().map(|(_, plan)| plan.id.as_str())))
                .then(|| FieldPath::root().key("products"))
        },
    },
    ConfigInvariant {
        rule: Rule::UniqueProductIds,
        message: "Product IDs must be unique",
        violation: |config| {
            (!all_unique(config.products.iter().map(|product| product.id.as_str())))
                .then(|| FieldPath::root().key("products"))
        },
    },
    ConfigInvariant {
        rule: Rule::LemonSqueezySingleLineItem,
        message: "Only one line item is allowed for Lemon Squeezy",
        violation: lemon_squeezy_violation,
    },
];

fn lemon_squeezy_violation(config: &BillingConfig) -> Option<FieldPath> {
    if config.provider != BillingProvider::LemonSqueezy {
        return None;
    }

    config
        .products
        .iter()
        .enumerate()
        .find_map(|(product_index, product)| {
            product
                .plans
                .iter()
                .position(|plan| plan.line_items.len() > 1)
                .map(|plan_index| {
                    FieldPath::root()
                        .key("products")
                        .index(product_index)
                        .key("plans")
                        .index(plan_index)
                        .key("lineItems")
                })
        })
}

/// Returns true if no id occurs twice.
fn all_unique<'a>(ids: impl IntoIterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    ids.into_iter().all(|id| seen.insert(id))
}

// =============================================================================
// Validator
// =============================================================================

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn check_config(&mut self, config: &BillingConfig) {
        let root = FieldPath::root();
        let products_path = root.clone().key("products");

        if config.products.is_empty() {
            self.push(Rule::NonEmpty, products_path.clone(), "Array must contain at least 1 element(s)");
        }

        for (index, product) in config.products.iter().enumerate() {
            self.check_product(product, &products_path.clone().index(index));
        }

        for invariant in CONFIG_INVARIANTS {
            if let Some(path) = (invariant.violation)(config) {
                self.push(invariant.rule, path, invariant.message);
            }
        }
    }

    fn check_product(&mut self, product: &Product, path: &FieldPath) {
        self.non_empty_string(&product.id, path, "id");
        self.non_empty_string(&product.name, path, "name");
        self.non_empty_string(&product.description, path, "description");

        if product.currency.chars().count() != CURRENCY_CODE_LENGTH {
            self.push(
                Rule::CurrencyCode,
                path.clone().key("currency"),
                format!("String must contain exactly {} character(s)", CURRENCY_CODE_LENGTH),
            );
        }

        if product.features.is_empty() {
            self.push(
                Rule::NonEmpty,
                path.clone().key("features"),
                "Array must contain at least 1 element(s)",
            );
        }

        let plans_path = path.clone().key("plans");
        for (index, plan) in product.plans.iter().enumerate() {
            self.check_plan(plan, &plans_path.clone().index(index));
        }

        self.apply(PRODUCT_INVARIANTS, product, path);
    }

    fn check_plan(&mut self, plan: &Plan, path: &FieldPath) {
        self.non_empty_string(&plan.id, path, "id");
        self.non_empty_string(&plan.name, path, "name");

        if plan.trial_period == Some(0) {
            self.push(
                Rule::PositiveTrialPeriod,
                path.clone().key("trialPeriod"),
                "Number must be greater than 0",
            );
        }

        let items_path = path.clone().key("lineItems");
        for (index, item) in plan.line_items.iter().enumerate() {
            self.check_line_item(item, &items_path.clone().index(index));
        }

        self.apply(PLAN_INVARIANTS, plan, path);
    }

    fn check_line_item(&mut self, item: &LineItem, path: &FieldPath) {
        self.non_empty_string(&item.id, path, "id");
        self.non_empty_string(&item.name, path, "name");
        self.non_negative(item.cost, path.clone().key("cost"));

        if let Some(tiers) = &item.tiers {
            for (index, tier) in tiers.iter().enumerate() {
                let tier_path = path.clone().key("tiers").index(index);
                self.non_negative(tier.up_to, tier_path.clone().key("upTo"));
                self.non_negative(tier.cost, tier_path.key("cost"));
            }
        }

        self.apply(LINE_ITEM_INVARIANTS, item, path);
    }

    fn apply<T>(&mut self, invariants: &[Invariant<T>], value: &T, path: &FieldPath) {
        for invariant in invariants {
            if !(invariant.holds)(value) {
                let issue_path = invariant
                    .fields
                    .iter()
                    .fold(path.clone(), |path, field| path.key(*field));
                self.push(invariant.rule, issue_path, invariant.message);
            }
        }
    }

    fn non_empty_string(&mut self, value: &str, path: &FieldPath, field: &'static str) {
        if value.is_empty() {
            self.push(
                Rule::NonEmpty,
                path.clone().key(field),
                "String must contain at least 1 character(s)",
            );
        }
    }

    fn non_negative(&mut self, value: f64, path: FieldPath) {
        if !value.is_finite() || value < 0.0 {
            self.push(Rule::NonNegative, path, "Number must be greater than or equal to 0");
        }
    }

    fn push(&mut self, rule: Rule, path: FieldPath, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            rule,
            path,
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues: self.issues })
        }
    }
}

// =============================================================================
// Paths and errors
// =============================================================================

/// One step of a [`FieldPath`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a field inside the catalogue, e.g.
/// `products.0.plans.1.lineItems.0.type.unit.included`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path (the catalogue itself).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether the path names `key` anywhere.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0
            .iter()
            .any(|segment| matches!(segment, PathSegment::Key(k) if k == key))
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

/// A single violated rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub rule: Rule,
    pub path: FieldPath,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A catalogue was rejected.
///
/// Always holds at least one issue. The application must not start with an
/// invalid catalogue, so this error is meant to propagate to bootstrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// An error for input that does not have the catalogue's shape at `path`.
    #[must_use]
    pub fn schema(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue {
                rule: Rule::Schema,
                path,
                message: message.into(),
            }],
        }
    }

    /// The first violated rule.
    #[must_use]
    pub fn first(&self) -> &ValidationIssue {
        // constructed with at least one issue
        &self.issues[0]
    }

    /// Every violated rule, in evaluation order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Whether `rule` is among the violations.
    #[must_use]
    pub fn has_rule(&self, rule: Rule) -> bool {
        self.issues.iter().any(|issue| issue.rule == rule)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid billing config: {}", self.first())?;
        if self.issues.len() > 1 {
            write!(f, " (and {} more)", self.issues.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::schema::{BillingInterval, LineItemType};

    fn product(plans: Vec<Plan>) -> Product {
        Product {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            description: "For teams".to_string(),
            currency: "USD".to_string(),
            badge: None,
            features: vec!["Reports".to_string()],
            highlighted: None,
            plans,
        }
    }

    fn config(provider: BillingProvider, plans: Vec<Plan>) -> BillingConfig {
        BillingConfig {
            provider,
            products: vec![product(plans)],
        }
    }

    fn monthly(id: &str, items: Vec<LineItem>) -> Plan {
        Plan::recurring(id, "Monthly", BillingInterval::Month, items)
    }

    #[test]
    fn test_valid_config() {
        let config = config(
            BillingProvider::Stripe,
            vec![monthly(
                "pro_monthly",
                vec![
                    LineItem::base("price_base", "Base", 10.0),
                    LineItem::new("price_seat", "Seat", 5.0, LineItemType::PerSeat),
                ],
            )],
        );

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_metered_requires_unit_and_included() {
        let config = config(
            BillingProvider::Stripe,
            vec![monthly(
                "pro_monthly",
                vec![LineItem::new("price_api", "API", 0.1, LineItemType::Metered)],
            )],
        );

        let err = config.validate().unwrap_err();
        assert_eq!(err.first().rule, Rule::MeteredUnitAndIncluded);
        assert_eq!(
            err.first().path.to_string(),
            "products.0.plans.0.lineItems.0.type.unit.included"
        );
    }

    #[test]
    fn test_metered_with_empty_unit_fails() {
        let config = config(
            BillingProvider::Stripe,
            vec![monthly(
                "pro_monthly",
                vec![LineItem::new("price_api", "API", 0.1, LineItemType::Metered).with_usage("", 10.0)],
            )],
        );

        assert!(config.validate().unwrap_err().has_rule(Rule::MeteredUnitAndIncluded));
    }

    #[test]
    fn test_metered_with_zero_included_is_valid() {
        let config = config(
            BillingProvider::Stripe,
            vec![monthly(
                "pro_monthly",
                vec![LineItem::new("price_api", "API", 0.1, LineItemType::Metered).with_usage("call", 0.0)],
            )],
        );

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_one_time_rules() {
        let mut plan = Plan::one_time(
            "lifetime",
            "Lifetime",
            vec![
                LineItem::base("price_base", "Base", 299.0),
                LineItem::new("price_seat", "Seat", 5.0, LineItemType::PerSeat),
            ],
        );
        plan.interval = Some(BillingInterval::Year);

        let err = config(BillingProvider::Stripe, vec![plan]).validate().unwrap_err();
        let rules: Vec<Rule> = err.issues().iter().map(|issue| issue.rule).collect();
        assert_eq!(
            rules,
            vec![Rule::OneTimeWithoutInterval, Rule::OneTimeBaseItemsOnly]
        );
    }

    #[test]
    fn test_issue_order_follows_invariant_table() {
        let mut plan = monthly("pro_monthly", vec![]);
        plan.interval = None;
        plan.trial_period = Some(0);

        let err = config(BillingProvider::Stripe, vec![plan]).validate().unwrap_err();
        let rules: Vec<Rule> = err.issues().iter().map(|issue| issue.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::PositiveTrialPeriod,
                Rule::PlanHasLineItems,
                Rule::RecurringRequiresInterval,
            ]
        );
    }

    #[test]
    fn test_field_rules() {
        let mut product = product(vec![monthly(
            "",
            vec![LineItem::base("price_base", "", -1.0)],
        )]);
        product.currency = "US".to_string();
        product.features.clear();

        let config = BillingConfig {
            provider: BillingProvider::Paddle,
            products: vec![product],
        };

        let err = config.validate().unwrap_err();
        let paths: Vec<String> = err.issues().iter().map(|issue| issue.path.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "products.0.currency",
                "products.0.features",
                "products.0.plans.0.id",
                "products.0.plans.0.lineItems.0.name",
                "products.0.plans.0.lineItems.0.cost",
            ]
        );
    }

    #[test]
    fn test_nan_cost_rejected() {
        let config = config(
            BillingProvider::Stripe,
            vec![monthly("pro_monthly", vec![LineItem::base("price_base", "Base", f64::NAN)])],
        );

        assert!(config.validate().unwrap_err().has_rule(Rule::NonNegative));
    }

    #[test]
    fn test_empty_products() {
        let config = BillingConfig {
            provider: BillingProvider::Stripe,
            products: vec![],
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.first().rule, Rule::NonEmpty);
        assert_eq!(err.first().path.to_string(), "products");
    }

    #[test]
    fn test_lemon_squeezy_single_line_item() {
        let config = config(
            BillingProvider::LemonSqueezy,
            vec![
                monthly("ok", vec![LineItem::base("variant_1", "Base", 10.0)]),
                monthly(
                    "too_many",
                    vec![
                        LineItem::base("variant_2", "Base", 10.0),
                        LineItem::new("variant_3", "Seat", 5.0, LineItemType::PerSeat),
                    ],
                ),
            ],
        );

        let err = config.validate().unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.first().rule, Rule::LemonSqueezySingleLineItem);
        assert_eq!(err.first().message, "Only one line item is allowed for Lemon Squeezy");
        assert_eq!(err.first().path.to_string(), "products.0.plans.1.lineItems");
    }

    fn raw_catalogue() -> serde_json::Value {
        serde_json::json!({
            "provider": "stripe",
            "products": [{
                "id": "pro",
                "name": "Pro",
                "description": "For teams",
                "currency": "USD",
                "features": ["Reports"],
                "plans": [{
                    "id": "pro_monthly",
                    "name": "Pro Monthly",
                    "interval": "month",
                    "paymentType": "recurring",
                    "lineItems": [
                        { "id": "price_base", "name": "Base", "cost": 10, "type": "base" },
                        { "id": "price_seat", "name": "Seat", "cost": 5, "type": "per-seat" }
                    ]
                }]
            }]
        })
    }

    fn schema_issue(raw: serde_json::Value) -> ValidationIssue {
        let err = validate(raw).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.first().rule, Rule::Schema);
        err.first().clone()
    }

    #[test]
    fn test_schema_error_locates_negative_trial_period() {
        let mut raw = raw_catalogue();
        raw["products"][0]["plans"][0]["trialPeriod"] = serde_json::json!(-1);

        let issue = schema_issue(raw);
        assert_eq!(issue.path.to_string(), "products.0.plans.0.trialPeriod");
        assert!(issue.message.contains("-1"));
    }

    #[test]
    fn test_schema_error_locates_unknown_line_item_type() {
        let mut raw = raw_catalogue();
        raw["products"][0]["plans"][0]["lineItems"][1]["type"] = serde_json::json!("flat");

        let issue = schema_issue(raw);
        assert_eq!(issue.path.to_string(), "products.0.plans.0.lineItems.1.type");
        assert!(issue.message.contains("flat"));
    }

    #[test]
    fn test_schema_error_locates_missing_cost() {
        let mut raw = raw_catalogue();
        raw["products"][0]["plans"][0]["lineItems"][0]
            .as_object_mut()
            .unwrap()
            .remove("cost");

        let issue = schema_issue(raw);
        assert_eq!(issue.path.to_string(), "products.0.plans.0.lineItems.0.cost");
        assert_eq!(issue.message, "missing field `cost`");
    }

    #[test]
    fn test_schema_error_locates_missing_provider() {
        let mut raw = raw_catalogue();
        raw.as_object_mut().unwrap().remove("provider");

        assert_eq!(schema_issue(raw).path.to_string(), "provider");
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(missing_field("missing field `cost`"), Some("cost"));
        assert_eq!(missing_field("unknown variant `flat`"), None);
    }

    #[test]
    fn test_all_unique() {
        assert!(all_unique(["a", "b", "c"]));
        assert!(!all_unique(["a", "b", "a"]));
        assert!(all_unique(std::iter::empty()));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::schema(FieldPath::root(), "invalid type: string, expected a map");
        assert_eq!(err.to_string(), "Invalid billing config: invalid type: string, expected a map");

        let config = config(BillingProvider::Stripe, vec![monthly("p", vec![])]);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid billing config: products.0.plans.0.lineItems: Plans must have at least one line item"
        );
    }
}
