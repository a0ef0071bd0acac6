//! Model command implementation.

use crate::cli::ModelArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::load_ledger;
use crate::output::Formatter;
use concord_engine::Consensus;

/// Execute the model command.
pub fn execute_model(args: ModelArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let ledger = load_ledger(&args.input)?;
    let outcome = Consensus::new(config.engine.clone())?.run(&ledger)?;

    println!("{}", formatter.format_model(&outcome.model)?);
    Ok(())
}
