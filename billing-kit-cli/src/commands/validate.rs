//! Validate command - check a catalogue and report every violation.

use anyhow::{Result, bail};
use billing_kit::{BillingConfig, Config, KitError};
use colored::Colorize;
use serde_json::json;

use crate::cli::FileArgs;
use crate::{Output, print_error, print_info, print_success};

pub fn run(config: &Config, args: FileArgs, output: Output) -> Result<()> {
    let path = super::catalogue_path(config, args.file)?;

    let err = match BillingConfig::load(&path) {
        Ok(billing) => {
            if let Some(expected) = config.billing.provider {
                if billing.provider != expected {
                    bail!(
                        "{} is for {} but BILLING_KIT_BILLING_PROVIDER is {}",
                        path.display(),
                        billing.provider,
                        expected
                    );
                }
            }

            let plans = billing.plans().count();
            match output {
                Output::Json => println!(
                    "{}",
                    json!({
                        "valid": true,
                        "provider": billing.provider,
                        "products": billing.products.len(),
                        "plans": plans,
                    })
                ),
                Output::Text => {
                    print_success(&format!("{} is valid", path.display()));
                    print_info(&format!(
                        "{} catalogue with {} products and {} plans",
                        billing.provider,
                        billing.products.len(),
                        plans
                    ));
                }
            }
            return Ok(());
        }
        Err(err) => err,
    };

    let validation = match err {
        KitError::Validation(validation) => validation,
        other => {
            return Err(anyhow::Error::new(other).context(format!("Failed to load {}", path.display())));
        }
    };

    match output {
        Output::Json => {
            let issues: Vec<_> = validation
                .issues()
                .iter()
                .map(|issue| {
                    json!({
                        "rule": issue.rule.name(),
                        "path": issue.path.to_string(),
                        "message": issue.message,
                    })
                })
                .collect();
            println!("{}", json!({ "valid": false, "issues": issues }));
        }
        Output::Text => {
            print_error(&format!("{} is invalid", path.display()));
            for issue in validation.issues() {
                let location = if issue.path.is_root() {
                    "(root)".to_string()
                } else {
                    issue.path.to_string()
                };
                eprintln!(
                    "  {} {} {}",
                    location.yellow(),
                    issue.message,
                    format!("[{}]", issue.rule.name()).dimmed()
                );
            }
        }
    }

    bail!("{} violation(s) in {}", validation.issues().len(), path.display())
}
