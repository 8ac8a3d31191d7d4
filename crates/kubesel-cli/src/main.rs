use std::io;
use std::process::ExitCode;

use clap::Parser;
use kubesel_cli::{init_logging, run, Cli, ERROR_EXIT_CODE};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    match run(&cli, &mut stdin, &mut stdout) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}
