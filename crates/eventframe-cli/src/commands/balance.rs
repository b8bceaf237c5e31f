//! Balance command implementation.

use crate::cli::BalanceArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eventframe_corpus::{load_corpus, save_corpus, BalancerConfig, CorpusBalancer, LabelCounts};

/// Execute the balance command.
pub async fn execute_balance(
    args: BalanceArgs,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut balancer_config = config.balancer.clone();
    if args.full {
        balancer_config.target_size = BalancerConfig::full().target_size;
    }
    if let Some(target) = args.target {
        balancer_config.target_size = target;
    }
    if let Some(seed) = args.seed {
        balancer_config.seed = seed;
    }
    balancer_config.validate().map_err(CliError::Config)?;

    let records = load_corpus(&args.input)?;
    let input_counts = LabelCounts::from_records(&records);
    eprintln!(
        "{}",
        formatter.info(&format!(
            "Loaded {} records ({} events) from {}",
            records.len(),
            input_counts.events(),
            args.input.display()
        ))
    );

    let target = balancer_config.target_size;
    let outcome = CorpusBalancer::new(balancer_config).balance(records)?;
    if outcome.counts.events() >= target {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} events already reach the target of {}; no NO_EVENT records kept",
                outcome.counts.events(),
                target
            ))
        );
    }

    save_corpus(&args.output, &outcome.records)?;

    println!("{}", formatter.format_counts(&outcome.counts)?);
    eprintln!("{}", formatter.file_written(&args.output, outcome.records.len()));

    Ok(())
}
