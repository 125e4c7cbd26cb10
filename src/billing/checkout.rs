//! Checkout session planning.
//!
//! Turns a plan selection into the provider-neutral parameters of a checkout
//! session, and dispatches it through a [`CheckoutGateway`] implemented by
//! the application for its provider.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::BillingError;
use super::resolver::get_product_plan_pair;
use super::schema::{BillingConfig, BillingProvider, LineItemType};
use crate::error::{KitError, Result};

/// Placeholder the provider replaces with the created session id.
pub const CHECKOUT_SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Checkout session management.
///
/// Validates a [`CheckoutRequest`] against the catalogue and redirect
/// policy, then creates the session through the gateway.
pub struct CheckoutManager<G: CheckoutGateway> {
    billing: Arc<BillingConfig>,
    gateway: G,
    config: CheckoutConfig,
}

impl<G: CheckoutGateway> CheckoutManager<G> {
    /// Create a new checkout manager.
    #[must_use]
    pub fn new(billing: impl Into<Arc<BillingConfig>>, gateway: G, config: CheckoutConfig) -> Self {
        Self {
            billing: billing.into(),
            gateway,
            config,
        }
    }

    /// Create a checkout session for the requested plan.
    ///
    /// Returns the session the customer should be sent to.
    pub async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        self.config.validate_redirect_url(&request.return_url)?;

        let provider = self.gateway.provider();
        if provider != self.billing.provider {
            return Err(KitError::config(format!(
                "Checkout gateway is for {} but the billing catalogue is for {}",
                provider, self.billing.provider
            )));
        }

        let session_request = build_session_request(&self.billing, &request)?;

        tracing::info!(
            target: "billing_kit::checkout",
            provider = %provider,
            plan_id = %session_request.metadata.plan_id,
            account_id = %session_request.client_reference_id,
            mode = session_request.mode.as_str(),
            ui_mode = session_request.ui_mode.as_str(),
            "Creating checkout session"
        );

        match self.gateway.create_checkout_session(session_request).await {
            Ok(session) => {
                tracing::debug!(
                    target: "billing_kit::checkout",
                    session_id = %session.id,
                    "Checkout session created"
                );
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(
                    target: "billing_kit::checkout",
                    provider = %provider,
                    plan_id = %request.plan_id,
                    error = %e,
                    "Checkout session creation failed"
                );
                Err(e)
            }
        }
    }

    /// The catalogue this manager sells from.
    #[must_use]
    pub fn billing(&self) -> &BillingConfig {
        &self.billing
    }

    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

/// Build the session parameters for a plan selection.
///
/// Every line item of the plan is sent: `base` items with quantity 1,
/// `per-seat` items with the requested seat count (default 1) and `metered`
/// items without a quantity, since usage is reported later.
///
/// # Errors
///
/// - [`BillingError::PlanNotFound`] if the plan does not exist.
/// - [`BillingError::PlanNotInProduct`] if `product_id` is given and does not
///   own the plan.
/// - [`BillingError::InvalidSeatCount`] if `seats` is zero.
pub fn build_session_request(
    config: &BillingConfig,
    request: &CheckoutRequest,
) -> std::result::Result<CreateCheckoutSessionRequest, BillingError> {
    let pair = get_product_plan_pair(config, &request.plan_id)?;

    if let Some(product_id) = &request.product_id {
        if &pair.product.id != product_id {
            return Err(BillingError::PlanNotInProduct {
                plan_id: request.plan_id.clone(),
                product_id: product_id.clone(),
            });
        }
    }

    let seats = match request.seats {
        Some(0) => {
            return Err(BillingError::InvalidSeatCount {
                message: "must be at least 1".to_string(),
            });
        }
        Some(seats) => seats,
        None => 1,
    };

    let line_items = pair
        .plan
        .line_items
        .iter()
        .map(|item| CheckoutLineItem {
            price_id: item.id.clone(),
            quantity: match item.item_type {
                LineItemType::Base => Some(1),
                LineItemType::PerSeat => Some(seats),
                LineItemType::Metered => None,
            },
        })
        .collect();

    let (mode, trial_period_days) = if pair.plan.is_recurring() {
        (CheckoutMode::Subscription, pair.plan.trial_period)
    } else {
        (CheckoutMode::Payment, None)
    };

    let ui_mode = if request.embedded {
        UiMode::Embedded
    } else {
        UiMode::Hosted
    };

    let base = request.return_url.as_str();
    let (return_url, success_url, cancel_url) = match ui_mode {
        UiMode::Embedded => (
            Some(format!("{}/return?session_id={}", base, CHECKOUT_SESSION_ID_PLACEHOLDER)),
            None,
            None,
        ),
        UiMode::Hosted => (
            None,
            Some(format!("{}?success=true", base)),
            Some(format!("{}?cancel=true", base)),
        ),
    };

    // An existing customer avoids creating a duplicate at the provider.
    let (customer_id, customer_email) = match &request.customer_id {
        Some(id) => (Some(id.clone()), None),
        None => (None, request.customer_email.clone()),
    };

    Ok(CreateCheckoutSessionRequest {
        provider: config.provider,
        mode,
        ui_mode,
        line_items,
        client_reference_id: request.account_id.clone(),
        customer_id,
        customer_email,
        trial_period_days,
        return_url,
        success_url,
        cancel_url,
        metadata: CheckoutMetadata {
            account_id: request.account_id.clone(),
            plan_id: pair.plan.id.clone(),
            product_id: pair.product.id.clone(),
        },
    })
}

/// Configuration for checkout sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Allowed domains for return URLs (empty = allow any HTTPS URL).
    /// This prevents open redirect vulnerabilities.
    pub allowed_redirect_domains: Vec<String>,
}

impl CheckoutConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set allowed redirect domains.
    ///
    /// Only URLs on these domains, or their subdomains, are accepted as
    /// return URLs. If empty, any HTTPS URL is allowed.
    ///
    /// # Example
    /// ```
    /// use billing_kit::billing::CheckoutConfig;
    ///
    /// let config = CheckoutConfig::new()
    ///     .allowed_redirect_domains(["example.com", "app.example.com"]);
    /// assert!(config.validate_redirect_url("https://www.example.com/billing").is_ok());
    /// ```
    #[must_use]
    pub fn allowed_redirect_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_redirect_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Add a single allowed redirect domain.
    #[must_use]
    pub fn add_allowed_domain(mut self, domain: impl Into<String>) -> Self {
        self.allowed_redirect_domains.push(domain.into());
        self
    }

    /// Validate a return URL against the redirect policy.
    ///
    /// Returns an error if:
    /// - The URL is not valid
    /// - The URL is not HTTPS
    /// - The URL's domain is not in the allowed list (if list is non-empty)
    pub fn validate_redirect_url(&self, url: &str) -> std::result::Result<(), BillingError> {
        let parsed = Url::parse(url).map_err(|e| BillingError::InvalidRedirectUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "https" {
            return Err(BillingError::InvalidRedirectUrl {
                url: url.to_string(),
                reason: "must use HTTPS".to_string(),
            });
        }

        if self.allowed_redirect_domains.is_empty() {
            return Ok(());
        }

        let host = parsed.host_str().ok_or_else(|| BillingError::InvalidRedirectUrl {
            url: url.to_string(),
            reason: "must have a host".to_string(),
        })?;

        let allowed = self.allowed_redirect_domains.iter().any(|domain| {
            // Exact match or subdomain match
            host == domain || host.ends_with(&format!(".{}", domain))
        });

        if allowed {
            Ok(())
        } else {
            Err(BillingError::RedirectDomainNotAllowed {
                domain: host.to_string(),
            })
        }
    }
}

/// A customer's plan selection, ready for checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// The plan to purchase.
    pub plan_id: String,
    /// The product the plan was picked from, checked against the catalogue.
    pub product_id: Option<String>,
    /// Page the provider sends the customer back to.
    pub return_url: String,
    /// The account the purchase belongs to, sent as the client reference.
    pub account_id: String,
    /// Existing provider customer, if the account has purchased before.
    pub customer_id: Option<String>,
    pub customer_email: Option<String>,
    /// Embed the checkout in the page instead of redirecting.
    pub embedded: bool,
    /// Seat count for per-seat line items.
    pub seats: Option<u32>,
}

impl CheckoutRequest {
    /// Create a new hosted checkout request.
    #[must_use]
    pub fn new(
        plan_id: impl Into<String>,
        account_id: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            plan_id: plan_id.into(),
            product_id: None,
            return_url: return_url.into(),
            account_id: account_id.into(),
            customer_id: None,
            customer_email: None,
            embedded: false,
            seats: None,
        }
    }

    #[must_use]
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    #[must_use]
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    #[must_use]
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Use an embedded checkout.
    #[must_use]
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    #[must_use]
    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = Some(seats);
        self
    }
}

/// Checkout session response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session ID.
    pub id: String,
    /// URL to redirect the customer to, or to embed.
    pub url: String,
}

/// Line item for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    /// Provider price/variant ID.
    pub price_id: String,
    /// `None` for metered items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// Checkout mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// One-time payment.
    Payment,
    /// Subscription.
    Subscription,
}

impl CheckoutMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Subscription => "subscription",
        }
    }
}

/// Where the checkout form is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    Embedded,
    Hosted,
}

impl UiMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Hosted => "hosted",
        }
    }
}

/// Metadata for checkout sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutMetadata {
    pub account_id: String,
    pub plan_id: String,
    pub product_id: String,
}

/// Provider-neutral parameters of a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub provider: BillingProvider,
    pub mode: CheckoutMode,
    pub ui_mode: UiMode,
    pub line_items: Vec<CheckoutLineItem>,
    /// The purchasing account.
    pub client_reference_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<u32>,
    /// Set for embedded checkouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Set for hosted checkouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    /// Set for hosted checkouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    pub metadata: CheckoutMetadata,
}

/// Creates checkout sessions at a billing provider.
#[allow(async_fn_in_trait)]
pub trait CheckoutGateway: Send + Sync {
    /// The provider this gateway talks to.
    fn provider(&self) -> BillingProvider;

    /// Create a checkout session.
    async fn create_checkout_session(&self, request: CreateCheckoutSessionRequest) -> Result<CheckoutSession>;
}

/// Mock checkout gateway for testing.
#[cfg(any(test, feature = "test-billing"))]
pub mod test {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Mock gateway that records every request it receives.
    pub struct MockCheckoutGateway {
        provider: BillingProvider,
        session_counter: AtomicU64,
        requests: Mutex<Vec<CreateCheckoutSessionRequest>>,
        fail_with: Option<String>,
    }

    impl MockCheckoutGateway {
        /// Create a new mock gateway.
        #[must_use]
        pub fn new(provider: BillingProvider) -> Self {
            Self {
                provider,
                session_counter: AtomicU64::new(0),
                requests: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        /// A gateway whose every call fails with `message`.
        #[must_use]
        pub fn failing(provider: BillingProvider, message: impl Into<String>) -> Self {
            Self {
                fail_with: Some(message.into()),
                ..Self::new(provider)
            }
        }

        /// Requests received so far.
        pub fn requests(&self) -> Vec<CreateCheckoutSessionRequest> {
            self.requests
                .lock()
                .map(|requests| requests.clone())
                .unwrap_or_default()
        }
    }

    impl CheckoutGateway for MockCheckoutGateway {
        fn provider(&self) -> BillingProvider {
            self.provider
        }

        async fn create_checkout_session(&self, request: CreateCheckoutSessionRequest) -> Result<CheckoutSession> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request);
            }

            if let Some(message) = &self.fail_with {
                return Err(BillingError::Gateway {
                    provider: self.provider.to_string(),
                    message: message.clone(),
                }
                .into());
            }

            let id = format!("cs_test_{}", self.session_counter.fetch_add(1, Ordering::SeqCst));
            Ok(CheckoutSession {
                url: format!("https://checkout.example.com/{}/{}", self.provider, id),
                id,
            })
        }
    }
}
