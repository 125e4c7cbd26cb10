//! Plan resolution.
//!
//! Pure lookups over a validated [`BillingConfig`]. Each is a linear scan in
//! catalogue order; catalogues are small and read far more often than they
//! are built, so no index is kept.
//!
//! The functions are also available as methods on [`BillingConfig`].
//!
//! ```rust
//! # use billing_kit::billing::{BillingConfig, BillingInterval};
//! # fn example(config: &BillingConfig) -> Result<(), billing_kit::billing::BillingError> {
//! let intervals = config.plan_intervals();
//! let pair = config.product_plan_pair("pro_monthly")?;
//! let base = config.base_line_item(&pair.plan.id)?;
//! println!("{} costs {} {}", pair.product.name, base.cost, pair.product.currency);
//! # Ok(())
//! # }
//! ```

use super::error::BillingError;
use super::schema::{BillingConfig, BillingInterval, LineItem, LineItemType, Plan, Product};

/// A plan together with the product offering it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProductPlanPair<'a> {
    pub product: &'a Product,
    pub plan: &'a Plan,
}

/// Every interval used by a plan, deduplicated, in first-seen order.
///
/// One-time plans have no interval and are skipped.
#[must_use]
pub fn get_plan_intervals(config: &BillingConfig) -> Vec<BillingInterval> {
    let mut intervals = Vec::new();
    for interval in config.plans().filter_map(|(_, plan)| plan.interval) {
        if !intervals.contains(&interval) {
            intervals.push(interval);
        }
    }
    intervals
}

/// Find the plan with the given id and the product offering it.
///
/// # Errors
///
/// Returns [`BillingError::PlanNotFound`] if no plan has the id.
pub fn get_product_plan_pair<'a>(
    config: &'a BillingConfig,
    plan_id: &str,
) -> Result<ProductPlanPair<'a>, BillingError> {
    config
        .plans()
        .find(|(_, plan)| plan.id == plan_id)
        .map(|(product, plan)| ProductPlanPair { product, plan })
        .ok_or_else(|| BillingError::PlanNotFound {
            plan_id: plan_id.to_string(),
        })
}

/// Find the plan containing the line item with the given id.
///
/// Providers report purchases by price/variant id, which is the line item
/// id in the catalogue.
///
/// # Errors
///
/// Returns [`BillingError::VariantNotFound`] if no line item has the id.
pub fn get_product_plan_pair_by_variant_id<'a>(
    config: &'a BillingConfig,
    line_item_id: &str,
) -> Result<ProductPlanPair<'a>, BillingError> {
    config
        .plans()
        .find(|(_, plan)| plan.line_items.iter().any(|item| item.id == line_item_id))
        .map(|(product, plan)| ProductPlanPair { product, plan })
        .ok_or_else(|| BillingError::VariantNotFound {
            line_item_id: line_item_id.to_string(),
        })
}

/// The `base` line item of the plan with the given id.
///
/// # Errors
///
/// Returns [`BillingError::BaseLineItemNotFound`] if the plan does not exist
/// or has no `base` line item.
pub fn get_base_line_item<'a>(
    config: &'a BillingConfig,
    plan_id: &str,
) -> Result<&'a LineItem, BillingError> {
    config
        .plans()
        .filter(|(_, plan)| plan.id == plan_id)
        .find_map(|(_, plan)| plan.base_line_item())
        .ok_or_else(|| BillingError::BaseLineItemNotFound {
            plan_id: plan_id.to_string(),
        })
}

/// The line item a pricing table shows as the plan's price.
///
/// This is the plan's `base` item when it has one, otherwise its first line
/// item (e.g. a plan priced purely per seat).
///
/// # Errors
///
/// Returns [`BillingError::PlanNotFound`] if no plan has the id.
pub fn get_primary_line_item<'a>(
    config: &'a BillingConfig,
    plan_id: &str,
) -> Result<&'a LineItem, BillingError> {
    let pair = get_product_plan_pair(config, plan_id)?;
    pair.plan
        .base_line_item()
        .or_else(|| pair.plan.line_items.first())
        .ok_or_else(|| BillingError::PlanNotFound {
            plan_id: plan_id.to_string(),
        })
}

/// Look up a line item type.
///
/// Matches line items whose **type** equals `value` (not their id) and
/// returns that type, so this answers "does the catalogue use this line item
/// type?". Callers that need a line item by id should use
/// [`get_product_plan_pair_by_variant_id`] and [`Plan::line_item`].
///
/// # Errors
///
/// Returns [`BillingError::LineItemNotFound`] if no line item has that type,
/// including when `value` is not a type name at all.
pub fn get_line_item_type_by_id(
    config: &BillingConfig,
    value: &str,
) -> Result<LineItemType, BillingError> {
    config
        .line_items()
        .map(|item| item.item_type)
        .find(|item_type| item_type.as_str() == value)
        .ok_or_else(|| BillingError::LineItemNotFound {
            id: value.to_string(),
        })
}

/// Find a product by id.
///
/// # Errors
///
/// Returns [`BillingError::ProductNotFound`] if no product has the id.
pub fn get_product<'a>(
    config: &'a BillingConfig,
    product_id: &str,
) -> Result<&'a Product, BillingError> {
    config
        .products
        .iter()
        .find(|product| product.id == product_id)
        .ok_or_else(|| BillingError::ProductNotFound {
            product_id: product_id.to_string(),
        })
}

impl BillingConfig {
    /// See [`get_plan_intervals`].
    #[must_use]
    pub fn plan_intervals(&self) -> Vec<BillingInterval> {
        get_plan_intervals(self)
    }

    /// See [`get_product_plan_pair`].
    pub fn product_plan_pair(&self, plan_id: &str) -> Result<ProductPlanPair<'_>, BillingError> {
        get_product_plan_pair(self, plan_id)
    }

    /// See [`get_product_plan_pair_by_variant_id`].
    pub fn product_plan_pair_by_variant_id(
        &self,
        line_item_id: &str,
    ) -> Result<ProductPlanPair<'_>, BillingError> {
        get_product_plan_pair_by_variant_id(self, line_item_id)
    }

    /// See [`get_base_line_item`].
    pub fn base_line_item(&self, plan_id: &str) -> Result<&LineItem, BillingError> {
        get_base_line_item(self, plan_id)
    }

    /// See [`get_primary_line_item`].
    pub fn primary_line_item(&self, plan_id: &str) -> Result<&LineItem, BillingError> {
        get_primary_line_item(self, plan_id)
    }

    /// See [`get_product`].
    pub fn product(&self, product_id: &str) -> Result<&Product, BillingError> {
        get_product(self, product_id)
    }
}
