//! Pricing views.
//!
//! Read-only projections of a [`BillingConfig`] for pricing tables and plan
//! pickers: which plan each product offers at an interval, the cost to show
//! for it, and a label per line item.

use super::error::BillingError;
use super::resolver::{ProductPlanPair, get_product_plan_pair};
use super::schema::{BillingConfig, BillingInterval, LineItem, LineItemType, Plan, Product};

/// The plan each product shows in a pricing table at `interval`.
///
/// For every product, in catalogue order, this is the first plan that is
/// either recurring at `interval` or one-time. Products with no such plan
/// are left out.
#[must_use]
pub fn plans_for_interval(
    config: &BillingConfig,
    interval: BillingInterval,
) -> Vec<ProductPlanPair<'_>> {
    config
        .products
        .iter()
        .filter_map(|product| {
            product
                .plans
                .iter()
                .find(|plan| {
                    plan.is_one_time() || (plan.is_recurring() && plan.interval == Some(interval))
                })
                .map(|plan| ProductPlanPair { product, plan })
        })
        .collect()
}

/// One selectable entry of a plan picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickerOption<'a> {
    pub product: &'a Product,
    pub plan: &'a Plan,
    /// The line item whose cost the picker shows.
    pub base_line_item: &'a LineItem,
    pub trial_period: Option<u32>,
}

/// The options a plan picker offers once `interval` is selected.
///
/// Unlike [`plans_for_interval`], one-time plans are never offered here.
/// Products whose matching plan has no `base` line item are skipped.
#[must_use]
pub fn picker_options(config: &BillingConfig, interval: BillingInterval) -> Vec<PickerOption<'_>> {
    config
        .products
        .iter()
        .filter_map(|product| {
            let plan = product
                .plans
                .iter()
                .find(|plan| plan.interval == Some(interval))?;
            let base_line_item = plan.base_line_item()?;
            Some(PickerOption {
                product,
                plan,
                base_line_item,
                trial_period: plan.trial_period,
            })
        })
        .collect()
}

/// Validate a plan picker submission.
///
/// Besides existence, the plan must be billed at `interval`: the picker only
/// offers those plans (see [`picker_options`]), so one-time plans and plans
/// of the other interval are rejected.
///
/// # Errors
///
/// Returns [`BillingError::PlanNotSelected`] if `plan_id` is empty or
/// unknown, and [`BillingError::IntervalMismatch`] if the plan is not billed
/// at `interval`.
pub fn select_plan<'a>(
    config: &'a BillingConfig,
    plan_id: &str,
    interval: BillingInterval,
) -> Result<ProductPlanPair<'a>, BillingError> {
    if plan_id.trim().is_empty() {
        return Err(BillingError::PlanNotSelected);
    }

    let pair = get_product_plan_pair(config, plan_id).map_err(|_| BillingError::PlanNotSelected)?;

    if pair.plan.interval != Some(interval) {
        return Err(BillingError::IntervalMismatch {
            plan_id: plan_id.to_string(),
            interval: interval.to_string(),
        });
    }

    Ok(pair)
}

/// The cost to display for a line item.
///
/// Yearly prices shown as a monthly figure are divided by twelve and
/// rounded to cents.
#[must_use]
pub fn display_cost(item: &LineItem, interval: Option<BillingInterval>, always_monthly: bool) -> f64 {
    match interval {
        Some(BillingInterval::Year) if always_monthly => round_cents(item.cost / 12.0),
        _ => item.cost,
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A line of the plan details panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItemSummary {
    pub label: String,
    pub price: String,
}

/// Describe a line item for the plan details panel.
///
/// Base items use their own name, per-seat items read "Per team member" and
/// metered items read "Per {unit}", followed by the included amount when it
/// is non-zero.
#[must_use]
pub fn line_item_summary(item: &LineItem, currency: &str) -> LineItemSummary {
    let label = match item.item_type {
        LineItemType::Base => item.name.clone(),
        LineItemType::PerSeat => "Per team member".to_string(),
        LineItemType::Metered => {
            let unit = item.unit.as_deref().unwrap_or_default();
            match item.included {
                Some(included) if included != 0.0 => format!("Per {} ({} included)", unit, included),
                _ => format!("Per {}", unit),
            }
        }
    };

    LineItemSummary {
        label,
        price: format_currency(currency, item.cost),
    }
}

/// Format an amount in a currency, e.g. `$10.00` or `CHF 10.00`.
#[must_use]
pub fn format_currency(currency: &str, amount: f64) -> String {
    let code = currency.to_ascii_uppercase();
    match currency_symbol(&code) {
        Some(symbol) => format!("{}{:.2}", symbol, amount),
        None => format!("{} {:.2}", code, amount),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" | "CNY" => Some("¥"),
        "INR" => Some("₹"),
        "AUD" => Some("A$"),
        "CAD" => Some("CA$"),
        _ => None,
    }
}
