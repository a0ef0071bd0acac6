//! Concord CLI - Command-line interface for Dawid–Skene review consensus.

use clap::Parser;
use concord_cli::commands;
use concord_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the verbosity flag when set.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> concord_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    match cli.command {
        Command::Config(args) => {
            // Config commands read the file themselves, so a broken file cannot block `config init --force`
            let format = cli.format.map(Into::into).unwrap_or_default();
            let formatter = Formatter::new(format, !cli.no_color);
            commands::execute_config(args, &config_path, &formatter)
        }
        command => {
            let config = Config::load_from(&config_path)?;

            // Determine output format
            let format = cli
                .format
                .map(Into::into)
                .unwrap_or(config.settings.format);

            // Determine color setting
            let color_enabled = !cli.no_color && config.settings.color;

            let formatter = Formatter::new(format, color_enabled);

            match command {
                Command::Run(args) => commands::execute_run(args, &config, &formatter),
                Command::Model(args) => commands::execute_model(args, &config, &formatter),
                Command::Config(_) => unreachable!(),
            }
        }
    }
}
