//! Table-style hook configuration.
//!
//! ```toml
//! commit-size = "1M"
//! "branch-name@release" = """
//! ^release/.*$
//! """
//! ```
//!
//! Keys name the hook (optionally with `@id`), values are its stdin payload.

use super::{normalize, split_header, DecodeError};
use crate::domain::{HookInvocation, HookName};

pub(super) fn decode(source: &str) -> Result<Vec<HookInvocation>, DecodeError> {
    let table: toml::Table =
        toml::from_str(source).map_err(|e: toml::de::Error| DecodeError::Table(e.to_string()))?;

    table
        .iter()
        .map(|(key, value)| -> Result<HookInvocation, DecodeError> {
            let raw = value.as_str().ok_or_else(|| DecodeError::NotAString {
                key: key.clone(),
                found: value.type_str(),
            })?;
            let (name, id) = split_key(key).ok_or_else(|| DecodeError::InvalidKey(key.clone()))?;
            let body = normalize(raw).split('\n').map(String::from).collect();
            Ok(HookInvocation::new(name, id, body))
        })
        .collect()
}

/// `name@id` keys split like directive headers; a bare `name` is its own id.
fn split_key(key: &str) -> Option<(HookName, &str)> {
    if key.contains('@') {
        split_header(key)
    } else {
        Some((HookName::new(key)?, key))
    }
}
