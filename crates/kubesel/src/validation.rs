//! Syntax rules for label keys and values.
//!
//! The same functions are called by the text parser and by the structured
//! document converter, so both paths accept exactly the same labels.
//!
//! ```text
//! key    := [ prefix '/' ] name
//! prefix := DNS subdomain, at most 253 characters
//! name   := qualified name, 1..=63 characters
//! value  := "" | qualified name
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SelectorError, ValidationTarget};

/// Maximum length of a key name or a label value.
pub const MAX_NAME_LEN: usize = 63;

/// Maximum length of a key prefix.
pub const MAX_PREFIX_LEN: usize = 253;

static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$").unwrap());

static DNS_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});

/// Validates a label key.
///
/// A key is an optional DNS-subdomain prefix and a `/`, followed by a
/// qualified name. At most one `/` is allowed.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = |reason: String| SelectorError::validation(ValidationTarget::Key, key, reason);

    let mut parts = key.split('/');
    let (prefix, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => (None, name),
        (Some(prefix), Some(name), None) => (Some(prefix), name),
        _ => return Err(invalid("must contain at most one '/'".to_string())),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() {
            return Err(invalid("prefix part must be non-empty".to_string()));
        }
        validate_dns_subdomain(prefix).map_err(|reason| invalid(format!("prefix part {reason}")))?;
    }

    if name.is_empty() {
        return Err(invalid("name part must be non-empty".to_string()));
    }
    validate_qualified_name(name).map_err(|reason| invalid(format!("name part {reason}")))
}

/// Validates a label value. The empty string is a valid value.
pub fn validate_value(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    validate_qualified_name(value)
        .map_err(|reason| SelectorError::validation(ValidationTarget::Value, value, reason))
}

/// Checks the qualified-name grammar, returning the reason on failure.
pub fn validate_qualified_name(name: &str) -> std::result::Result<(), String> {
    if name.len() > MAX_NAME_LEN {
        return Err(format!("must be no more than {MAX_NAME_LEN} characters"));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Err("must consist of alphanumeric characters, '-', '_' or '.', \
                    and must start and end with an alphanumeric character"
            .to_string());
    }
    Ok(())
}

/// Checks the DNS-subdomain grammar, returning the reason on failure.
pub fn validate_dns_subdomain(prefix: &str) -> std::result::Result<(), String> {
    if prefix.len() > MAX_PREFIX_LEN {
        return Err(format!("must be no more than {MAX_PREFIX_LEN} characters"));
    }
    if !DNS_SUBDOMAIN.is_match(prefix) {
        return Err("must consist of lower case alphanumeric characters, '-' or '.', \
                    and must start and end with an alphanumeric character"
            .to_string());
    }
    Ok(())
}

/// Returns `true` if `key` is a valid label key.
pub fn is_valid_key(key: &str) -> bool {
    validate_key(key).is_ok()
}

/// Returns `true` if `value` is a valid label value.
pub fn is_valid_value(value: &str) -> bool {
    validate_value(value).is_ok()
}
