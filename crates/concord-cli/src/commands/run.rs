//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::input::load_ledger;
use crate::output::Formatter;
use concord_engine::Consensus;

/// Execute the run command.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let ledger = load_ledger(&args.input)?;
    let engine = Consensus::new(config.engine.clone())?;
    let outcome = engine.run(&ledger)?;

    println!("{}", formatter.format_outcome(&outcome, args.escalated_only)?);

    if formatter.format() == OutputFormat::Table && !outcome.report.converged && !ledger.is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "EM stopped after {} iterations without converging",
                outcome.report.iterations
            ))
        );
    }

    Ok(())
}
