use anyhow::{bail, Context, Result};
use charging_bill_split::*;
use std::env;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: split_bill <export.csv> <neighbour kWh> <bill amount> [en]");
    }

    let export = fs::read_to_string(&args[0])
        .with_context(|| format!("failed to read usage export '{}'", args[0]))?;
    let secondary_usage = parse_form_number(&args[1]);
    let total_bill = parse_form_number(&args[2]);

    let form = FormState::new(!export.is_empty(), secondary_usage, total_bill);
    if !is_ready(&form) {
        bail!("need a usage export and the neighbour's kWh before splitting");
    }

    let mut config = SplitConfig::default();
    if args.get(3).map(String::as_str) == Some("en") {
        config = config.with_language(Language::English);
    }
    let processor = BillSplitProcessor::new(config);

    let result = match processor.process(&export, secondary_usage, total_bill) {
        Ok(result) => result,
        Err(e) if e.is_source_error() => {
            bail!("could not read the usage export, please check its format ({})", e)
        }
        Err(e) => return Err(e.into()),
    };

    println!("📊 Bill split\n");
    println!("{}\n", processor.summarize(&result));
    println!("✉️  Message:\n");
    println!("{}", result.message);

    Ok(())
}
