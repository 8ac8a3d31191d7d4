//! Reading label sets and selector documents from files or stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use kubesel::{LabelSelector, LabelSet};

/// Where an input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Stdin,
    File(&'a Path),
}

impl<'a> Source<'a> {
    /// `None` and `-` both mean stdin.
    pub fn from_arg(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => Source::File(path),
            _ => Source::Stdin,
        }
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, Source::Stdin)
    }

    fn describe(&self) -> String {
        match self {
            Source::Stdin => "stdin".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    pub fn read(&self, stdin: &mut dyn Read) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut text = String::new();
                stdin
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn is_json(&self) -> bool {
        match self {
            Source::Stdin => false,
            Source::File(path) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json")),
        }
    }
}

/// Reads a flat JSON label set.
pub fn read_labels(source: Source<'_>, stdin: &mut dyn Read) -> Result<LabelSet> {
    let text = source.read(stdin)?;
    kubesel_ffi::decode_labels(&text)
        .with_context(|| format!("invalid label set in {}", source.describe()))
}

const ENVELOPE_FIELD: &str = "labelSelector";
const BARE_FIELDS: [&str; 2] = ["matchLabels", "matchExpressions"];

/// Rejects top-level fields a bare `LabelSelector` would silently ignore.
fn check_bare_fields<'k>(keys: impl IntoIterator<Item = Option<&'k str>>) -> Result<()> {
    for key in keys {
        match key {
            Some(key) if BARE_FIELDS.contains(&key) => {}
            Some(key) => bail!(
                "unknown field `{key}`, expected `{ENVELOPE_FIELD}`, `matchLabels` or `matchExpressions`"
            ),
            None => bail!("selector document keys must be strings"),
        }
    }
    Ok(())
}

fn parse_json_document(text: &str) -> Result<LabelSelector> {
    let mut value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        bail!("selector document must be an object");
    }
    if let Some(inner) = value.as_object_mut().and_then(|map| map.remove(ENVELOPE_FIELD)) {
        if !(inner.is_object() || inner.is_null()) {
            bail!("`{ENVELOPE_FIELD}` must be an object");
        }
        let selector: Option<LabelSelector> =
            serde_json::from_value(inner).with_context(|| format!("invalid `{ENVELOPE_FIELD}`"))?;
        return Ok(selector.unwrap_or_default());
    }
    if let Some(map) = value.as_object() {
        check_bare_fields(map.keys().map(|key| Some(key.as_str())))?;
    }
    Ok(serde_json::from_value(value)?)
}

fn parse_yaml_document(text: &str) -> Result<LabelSelector> {
    let mut value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if !value.is_mapping() {
        bail!("selector document must be a mapping");
    }
    if let Some(inner) = value.as_mapping_mut().and_then(|map| map.remove(ENVELOPE_FIELD)) {
        if !(inner.is_mapping() || inner.is_null()) {
            bail!("`{ENVELOPE_FIELD}` must be a mapping");
        }
        let selector: Option<LabelSelector> =
            serde_yaml::from_value(inner).with_context(|| format!("invalid `{ENVELOPE_FIELD}`"))?;
        return Ok(selector.unwrap_or_default());
    }
    if let Some(map) = value.as_mapping() {
        check_bare_fields(map.keys().map(serde_yaml::Value::as_str))?;
    }
    Ok(serde_yaml::from_value(value)?)
}

/// Parses document text, either a bare `LabelSelector` or one wrapped in
/// `labelSelector`. `.json` files go through `serde_json`; anything else is
/// read as YAML, which also accepts JSON.
///
/// When `labelSelector` is present its value must decode on its own; a
/// `null` value is the empty selector.
pub fn parse_document(text: &str, json: bool) -> Result<LabelSelector> {
    if json {
        parse_json_document(text)
    } else {
        parse_yaml_document(text)
    }
}

/// Reads a structured selector document.
pub fn read_document(source: Source<'_>, stdin: &mut dyn Read) -> Result<LabelSelector> {
    let text = source.read(stdin)?;
    parse_document(&text, source.is_json())
        .with_context(|| format!("invalid selector document in {}", source.describe()))
}
