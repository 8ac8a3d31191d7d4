//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Evaluate label selectors against label sets.
///
/// `match` and `match-doc` exit with 0 on match, 1 on no match and 2 on
/// error, so they can drive shell conditionals the way `grep` does.
#[derive(Debug, Parser)]
#[command(name = "kubesel", version, about)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print nothing on stdout; report the result through the exit status
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Match selector text against a label set
    Match {
        /// Selector text, e.g. 'app=nginx,tier in (web,api)'
        selector: String,

        /// Label set JSON file, `-` for stdin
        #[arg(short, long, env = "KUBESEL_LABELS")]
        labels: Option<PathBuf>,
    },

    /// Match a structured selector document (JSON or YAML) against a label set
    MatchDoc {
        /// Selector document file, `-` for stdin
        document: PathBuf,

        /// Label set JSON file, `-` for stdin
        #[arg(short, long, env = "KUBESEL_LABELS")]
        labels: Option<PathBuf>,
    },

    /// Print the canonical form of a selector
    Canonical {
        /// Selector text
        selector: String,
    },

    /// Print the requirements of a selector as JSON
    Explain {
        /// Selector text
        selector: String,
    },
}
