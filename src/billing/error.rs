//! Billing-specific error types.
//!
//! Lookups against the catalogue and checkout planning fail with a
//! [`BillingError`]. Catalogue validation has its own error type,
//! [`ValidationError`](super::validation::ValidationError), because it is
//! fatal to startup while these are recoverable by the caller.

use std::fmt;

/// Billing-specific errors.
///
/// These errors provide more context than generic errors and can be
/// converted to `KitError` at the application boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    // Lookup errors
    /// No plan has the given id.
    PlanNotFound { plan_id: String },
    /// No product has the given id.
    ProductNotFound { product_id: String },
    /// No line item (provider variant) has the given id.
    VariantNotFound { line_item_id: String },
    /// The plan is missing or has no `base` line item.
    BaseLineItemNotFound { plan_id: String },
    /// No line item matched the lookup value.
    LineItemNotFound { id: String },

    // Selection errors
    /// No plan was picked, or the picked id is unknown.
    PlanNotSelected,
    /// The plan exists but belongs to another product.
    PlanNotInProduct { plan_id: String, product_id: String },
    /// The plan does not bill at the selected interval.
    IntervalMismatch { plan_id: String, interval: String },

    // Checkout errors
    /// Seat count must be positive.
    InvalidSeatCount { message: String },
    /// Invalid redirect URL provided.
    InvalidRedirectUrl { url: String, reason: String },
    /// Redirect URL domain not in allowed list.
    RedirectDomainNotAllowed { domain: String },
    /// The checkout gateway rejected or failed the request.
    Gateway { provider: String, message: String },
}

impl fmt::Display for BillingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlanNotFound { plan_id } => {
                write!(f, "Plan not found: {}", plan_id)
            }
            Self::ProductNotFound { product_id } => {
                write!(f, "Product not found: {}", product_id)
            }
            Self::VariantNotFound { line_item_id } => {
                write!(f, "No plan contains line item: {}", line_item_id)
            }
            Self::BaseLineItemNotFound { plan_id } => {
                write!(f, "Base line item not found for plan: {}", plan_id)
            }
            Self::LineItemNotFound { id } => {
                write!(f, "Line Item with ID {} not found", id)
            }
            Self::PlanNotSelected => write!(f, "Please pick a plan to continue"),
            Self::PlanNotInProduct { plan_id, product_id } => {
                write!(f, "Plan '{}' does not belong to product '{}'", plan_id, product_id)
            }
            Self::IntervalMismatch { plan_id, interval } => {
                write!(f, "Plan '{}' is not billed per {}", plan_id, interval)
            }
            Self::InvalidSeatCount { message } => {
                write!(f, "Invalid seat count: {}", message)
            }
            Self::InvalidRedirectUrl { url, reason } => {
                write!(f, "Invalid redirect URL '{}': {}", url, reason)
            }
            Self::RedirectDomainNotAllowed { domain } => {
                write!(f, "Redirect domain '{}' is not allowed", domain)
            }
            Self::Gateway { provider, message } => {
                write!(f, "Checkout failed at {}: {}", provider, message)
            }
        }
    }
}

impl std::error::Error for BillingError {}

impl From<BillingError> for crate::error::KitError {
    fn from(err: BillingError) -> Self {
        match &err {
            BillingError::PlanNotFound { .. }
            | BillingError::ProductNotFound { .. }
            | BillingError::VariantNotFound { .. }
            | BillingError::BaseLineItemNotFound { .. }
            | BillingError::LineItemNotFound { .. } => {
                crate::error::KitError::not_found(err.to_string())
            }

            BillingError::PlanNotSelected
            | BillingError::PlanNotInProduct { .. }
            | BillingError::IntervalMismatch { .. }
            | BillingError::InvalidSeatCount { .. }
            | BillingError::InvalidRedirectUrl { .. }
            | BillingError::RedirectDomainNotAllowed { .. } => {
                crate::error::KitError::bad_request(err.to_string())
            }

            BillingError::Gateway { .. } => {
                crate::error::KitError::service_unavailable(err.to_string())
            }
        }
    }
}

impl BillingError {
    /// Check if this error is a failed lookup.
    ///
    /// Callers typically show a generic error and let the user pick a plan
    /// again.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlanNotFound { .. }
                | Self::ProductNotFound { .. }
                | Self::VariantNotFound { .. }
                | Self::BaseLineItemNotFound { .. }
                | Self::LineItemNotFound { .. }
        )
    }

    /// Check if this is a client error (bad selection or request).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Gateway { .. })
    }
}
