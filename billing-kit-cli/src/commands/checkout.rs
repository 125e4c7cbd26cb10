//! Checkout command - print the session a plan selection would create.

use anyhow::{Context, Result};
use billing_kit::Config;
use billing_kit::billing::{CheckoutRequest, build_session_request};

use crate::cli::CheckoutArgs;
use crate::{Output, print_info};

pub fn run(config: &Config, args: CheckoutArgs, output: Output) -> Result<()> {
    let billing = super::load(&args.file)?;

    let return_url = args
        .return_url
        .or_else(|| config.checkout.return_url.clone())
        .context("No --return-url given and BILLING_KIT_CHECKOUT_RETURN_URL is not set")?;

    config
        .checkout
        .checkout_config()
        .validate_redirect_url(&return_url)?;

    let mut request = CheckoutRequest::new(&args.plan_id, &args.account, &return_url).embedded(args.embedded);
    request.product_id = args.product;
    request.customer_id = args.customer_id;
    request.customer_email = args.email;
    request.seats = args.seats;

    let session = build_session_request(&billing, &request)?;

    tracing::debug!(plan_id = %args.plan_id, mode = session.mode.as_str(), "Built checkout session request");

    if output == Output::Text {
        print_info(&format!(
            "{} {} checkout for plan {}",
            session.provider,
            session.mode.as_str(),
            session.metadata.plan_id
        ));
    }
    println!("{}", serde_json::to_string_pretty(&session)?);

    Ok(())
}
