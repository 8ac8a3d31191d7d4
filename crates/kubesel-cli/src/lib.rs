//! The `kubesel` command-line tool.
//!
//! ```text
//! $ echo '{"app":"nginx","tier":"web"}' | kubesel match 'app=nginx,tier in (web,api)'
//! true
//! $ kubesel canonical ' b in ( z , y ), a '
//! b in (y,z),a
//! ```

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{Cli, Command};
pub use commands::{run, Outcome, ERROR_EXIT_CODE};

use tracing_subscriber::EnvFilter;

/// Returns the default filter directive when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "kubesel=debug"
    } else if quiet {
        "kubesel=warn"
    } else {
        "kubesel=info"
    }
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
