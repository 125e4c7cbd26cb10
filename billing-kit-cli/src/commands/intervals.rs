//! Intervals command - list the billing intervals a catalogue offers.

use anyhow::Result;
use billing_kit::Config;

use crate::Output;
use crate::cli::FileArgs;

pub fn run(config: &Config, args: FileArgs, output: Output) -> Result<()> {
    let path = super::catalogue_path(config, args.file)?;
    let billing = super::load(&path)?;
    let intervals = billing.plan_intervals();

    match output {
        Output::Json => println!("{}", serde_json::to_string(&intervals)?),
        Output::Text => {
            if intervals.is_empty() {
                crate::print_warning("No recurring plans; the catalogue only sells one-time plans");
            }
            for interval in intervals {
                println!("{}", interval);
            }
        }
    }

    Ok(())
}
