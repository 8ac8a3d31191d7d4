//! Subcommand execution.

use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use kubesel::Selector;

use crate::cli::{Cli, Command};
use crate::input::{read_document, read_labels, Source};

/// What a finished command reports through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NotMatched,
    Done,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Matched | Outcome::Done => 0,
            Outcome::NotMatched => 1,
        }
    }

    fn from_match(matched: bool) -> Self {
        if matched {
            Outcome::Matched
        } else {
            Outcome::NotMatched
        }
    }
}

/// Exit status for any failure.
pub const ERROR_EXIT_CODE: u8 = 2;

/// Runs the parsed command line against the given stdin and stdout.
pub fn run(cli: &Cli, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<Outcome> {
    match &cli.command {
        Command::Match { selector, labels } => {
            let selector = parse_selector(selector)?;
            let labels = read_labels(Source::from_arg(labels.as_deref()), stdin)?;
            let matched = selector.matches(&labels);
            tracing::debug!(%selector, %labels, matched, "evaluated selector text");
            report(cli, out, matched)
        }
        Command::MatchDoc { document, labels } => {
            let document = Source::from_arg(Some(document.as_path()));
            let labels = Source::from_arg(labels.as_deref());
            if document.is_stdin() && labels.is_stdin() {
                bail!("selector document and label set cannot both be read from stdin");
            }
            let selector = read_document(document, stdin)?
                .to_selector()
                .context("selector document is not a valid selector")?;
            let labels = read_labels(labels, stdin)?;
            let matched = selector.matches(&labels);
            tracing::debug!(%selector, %labels, matched, "evaluated selector document");
            report(cli, out, matched)
        }
        Command::Canonical { selector } => {
            let selector = parse_selector(selector)?;
            if !cli.quiet {
                writeln!(out, "{selector}")?;
            }
            Ok(Outcome::Done)
        }
        Command::Explain { selector } => {
            let selector = parse_selector(selector)?;
            if !cli.quiet {
                let json = serde_json::to_string_pretty(&selector)?;
                writeln!(out, "{json}")?;
            }
            Ok(Outcome::Done)
        }
    }
}

fn parse_selector(text: &str) -> Result<Selector> {
    kubesel::parse(text).with_context(|| format!("invalid selector {text:?}"))
}

fn report(cli: &Cli, out: &mut dyn Write, matched: bool) -> Result<Outcome> {
    if !cli.quiet {
        writeln!(out, "{matched}")?;
    }
    Ok(Outcome::from_match(matched))
}
