//! Plan command - show one plan with its product and line items.

use anyhow::Result;
use billing_kit::billing::line_item_summary;
use colored::Colorize;

use crate::Output;
use crate::cli::PlanArgs;

pub fn run(args: PlanArgs, output: Output) -> Result<()> {
    let billing = super::load(&args.file)?;
    let pair = billing.product_plan_pair(&args.plan_id)?;

    if output == Output::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "product": {
                    "id": pair.product.id,
                    "name": pair.product.name,
                    "currency": pair.product.currency,
                },
                "plan": pair.plan,
            }))?
        );
        return Ok(());
    }

    println!("\n{} {}", pair.product.name.cyan().bold(), format!("({})", pair.product.id).dimmed());
    println!("  {}", pair.product.description);

    println!("\n{} {}", pair.plan.name.bold(), format!("({})", pair.plan.id).dimmed());
    match pair.plan.interval {
        Some(interval) => println!("  Billed per {}", interval),
        None => println!("  One-time payment"),
    }
    if let Some(days) = pair.plan.trial_period {
        println!("  {} day free trial", days);
    }

    println!("\n{}", "Details".yellow());
    for item in &pair.plan.line_items {
        let summary = line_item_summary(item, &pair.product.currency);
        println!("  {:<32} {}", summary.label, summary.price.green());
        if let Some(description) = &item.description {
            println!("    {}", description.dimmed());
        }
    }

    if !pair.product.features.is_empty() {
        println!("\n{}", "Features".yellow());
        for feature in &pair.product.features {
            println!("  - {}", feature);
        }
    }
    println!();

    Ok(())
}
