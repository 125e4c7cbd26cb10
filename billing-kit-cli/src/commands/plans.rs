//! Plans command - print the pricing table.

use anyhow::Result;
use billing_kit::billing::{display_cost, format_currency, plans_for_interval};
use billing_kit::{BillingConfig, BillingInterval, Config};
use colored::Colorize;
use serde_json::json;

use crate::Output;
use crate::cli::PlansArgs;

pub fn run(config: &Config, args: PlansArgs, output: Output) -> Result<()> {
    let path = super::catalogue_path(config, args.source.file)?;
    let billing = super::load(&path)?;

    let intervals = match args.interval {
        Some(interval) => vec![interval.into()],
        None => billing.plan_intervals(),
    };

    match output {
        Output::Json => {
            let rows: Vec<_> = intervals
                .iter()
                .flat_map(|&interval| rows(&billing, interval, args.monthly))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Output::Text => {
            for interval in intervals {
                println!("\n{}", format!("Billed per {}", interval).cyan().bold());
                print_table(&billing, interval, args.monthly)?;
            }
            println!();
        }
    }

    Ok(())
}

fn rows(billing: &BillingConfig, interval: BillingInterval, monthly: bool) -> Vec<serde_json::Value> {
    plans_for_interval(billing, interval)
        .into_iter()
        .map(|pair| {
            let cost = billing
                .primary_line_item(&pair.plan.id)
                .ok()
                .map(|item| display_cost(item, pair.plan.interval, monthly));
            json!({
                "interval": interval,
                "productId": pair.product.id,
                "planId": pair.plan.id,
                "currency": pair.product.currency,
                "cost": cost,
                "paymentType": pair.plan.payment_type,
                "trialPeriod": pair.plan.trial_period,
                "badge": pair.product.badge,
                "highlighted": pair.product.is_highlighted(),
            })
        })
        .collect()
}

fn print_table(billing: &BillingConfig, interval: BillingInterval, monthly: bool) -> Result<()> {
    for pair in plans_for_interval(billing, interval) {
        let item = billing.primary_line_item(&pair.plan.id)?;
        let mut price = format_currency(
            &pair.product.currency,
            display_cost(item, pair.plan.interval, monthly),
        );
        if pair.plan.is_one_time() {
            price.push_str(" once");
        } else if monthly && pair.plan.interval == Some(BillingInterval::Year) {
            price.push_str(" /month, billed yearly");
        } else if let Some(plan_interval) = pair.plan.interval {
            price.push_str(&format!(" /{}", plan_interval));
        }

        let name = if pair.product.is_highlighted() {
            pair.product.name.bold().to_string()
        } else {
            pair.product.name.clone()
        };

        print!("  {:<24} {:<20} {}", name, pair.plan.id.dimmed(), price.green());
        if let Some(badge) = &pair.product.badge {
            print!(" {}", format!("[{}]", badge).yellow());
        }
        if let Some(days) = pair.plan.trial_period {
            print!(" {}", format!("{} day trial", days).dimmed());
        }
        println!();
    }

    Ok(())
}
