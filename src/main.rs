use std::process::ExitCode;

use clap::Parser;

use danci_wordsim::commands::{self, Cli};
use danci_wordsim::config::Config;
use danci_wordsim::logging::init_tracing;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    cli.apply(&mut config);

    let _log_guard = init_tracing(&config);

    match commands::execute(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
