//! XML name validation
//!
//! Checks applied to namespace prefixes before they are registered for
//! serialization.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\-\.0-9\u{B7}]*$",
    )
    .unwrap()
});

// Generated prefixes use this form, so callers may not register it.
static GENERATED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ns\d+$").unwrap());

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check if a prefix has the shape of an automatically generated one (`ns0`, `ns12`, ...)
pub fn is_generated_prefix(prefix: &str) -> bool {
    GENERATED_PREFIX.is_match(prefix)
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

/// Validate a prefix a caller wants to bind to a namespace
///
/// The empty prefix stands for the default namespace and is accepted.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Ok(());
    }
    validate_ncname(prefix)?;
    if is_generated_prefix(prefix) {
        return Err(Error::Namespace(format!(
            "Prefix format reserved for internal use: '{}'",
            prefix
        )));
    }
    if prefix.eq_ignore_ascii_case("xml") || prefix.eq_ignore_ascii_case("xmlns") {
        return Err(Error::Namespace(format!("Prefix '{}' cannot be rebound", prefix)));
    }
    Ok(())
}
