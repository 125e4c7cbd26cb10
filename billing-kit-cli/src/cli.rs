//! CLI argument definitions using clap.

use std::path::PathBuf;

use billing_kit::BillingInterval;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "billing-kit")]
#[command(version)]
#[command(about = "Validate and inspect billing catalogues", long_about = None)]
pub struct Cli {
    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a catalogue against every rule and report all violations
    Validate(FileArgs),

    /// List the billing intervals the catalogue offers
    Intervals(FileArgs),

    /// Show the pricing table, optionally for a single interval
    Plans(PlansArgs),

    /// Show one plan with its product and line items
    Plan(PlanArgs),

    /// Print the checkout session a plan selection would create
    Checkout(CheckoutArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Catalogue file (.json or .toml). Defaults to BILLING_KIT_BILLING_CONFIG_PATH.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PlansArgs {
    #[command(flatten)]
    pub source: FileArgs,

    /// Only show plans for this interval
    #[arg(short, long)]
    pub interval: Option<Interval>,

    /// Show yearly prices as their monthly equivalent
    #[arg(long, default_value = "false")]
    pub monthly: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Catalogue file (.json or .toml)
    pub file: PathBuf,

    /// Plan id
    pub plan_id: String,
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Catalogue file (.json or .toml)
    pub file: PathBuf,

    /// Plan id
    pub plan_id: String,

    /// Page the provider returns the customer to. Defaults to BILLING_KIT_CHECKOUT_RETURN_URL.
    #[arg(long)]
    pub return_url: Option<String>,

    /// Product the plan was picked from
    #[arg(long)]
    pub product: Option<String>,

    /// Account the purchase belongs to
    #[arg(long, default_value = "account")]
    pub account: String,

    /// Existing provider customer id
    #[arg(long)]
    pub customer_id: Option<String>,

    /// Customer email, used when no customer id is given
    #[arg(long)]
    pub email: Option<String>,

    /// Use an embedded checkout instead of a hosted page
    #[arg(long, default_value = "false")]
    pub embedded: bool,

    /// Seat count for per-seat line items
    #[arg(long)]
    pub seats: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Interval {
    /// Monthly plans
    Month,
    /// Yearly plans
    Year,
}

impl From<Interval> for BillingInterval {
    fn from(interval: Interval) -> Self {
        match interval {
            Interval::Month => BillingInterval::Month,
            Interval::Year => BillingInterval::Year,
        }
    }
}
