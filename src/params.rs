//! The closed-vocabulary parameter map used to pick an algorithm variant at
//! call sites that offer more than one (e.g. `complement`'s `"classical"` vs
//! `"brzozowski"`), instead of a boolean-flag explosion on every such function.
//!
//! Grounded on the "Parameter map" interface; there is no registry
//! crate in the pack for this (it is a closed, five-key vocabulary), so this
//! is a plain `HashMap<String, String>` wrapper rather than an external
//! configuration-parsing dependency.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Recognised parameter keys.
pub const KEY_ALGORITHM: &str = "algorithm";
pub const KEY_MINIMIZE: &str = "minimize";
pub const KEY_RELATION: &str = "relation";
pub const KEY_DIRECTION: &str = "direction";
pub const KEY_TYPE: &str = "type";

const RECOGNISED_KEYS: &[&str] = &[KEY_ALGORITHM, KEY_MINIMIZE, KEY_RELATION, KEY_DIRECTION, KEY_TYPE];

/// A closed-vocabulary `key -> value` map, validated against
/// [`RECOGNISED_KEYS`] and the per-key value sets declared by each `with_*`
/// constructor's caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    /// Sets `key = value`, rejecting keys outside [`RECOGNISED_KEYS`].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if !RECOGNISED_KEYS.contains(&key.as_str()) {
            return Err(Error::InvalidConfiguration { key, value: value.into() });
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    /// Looks up `key`, failing if it is absent.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.entries.get(key).map(String::as_str).ok_or_else(|| Error::MissingConfiguration { key: key.to_string() })
    }

    /// Looks up `key`, falling back to `default` if it is absent.
    pub fn get_or(&self, key: &str, default: &'static str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or(default)
    }

    /// Looks up `key` and validates it is one of `allowed`.
    pub fn require_one_of(&self, key: &str, allowed: &[&str]) -> Result<String> {
        let value = self.require(key)?;
        if allowed.contains(&value) {
            Ok(value.to_string())
        } else {
            Err(Error::InvalidConfiguration { key: key.to_string(), value: value.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognised_key_is_rejected() {
        let mut p = Params::new();
        assert!(p.set("not_a_real_key", "x").is_err());
    }

    #[test]
    fn missing_required_key_errors() {
        let p = Params::new();
        assert!(p.require(KEY_ALGORITHM).is_err());
    }

    #[test]
    fn get_or_falls_back_to_default() {
        let p = Params::new();
        assert_eq!(p.get_or(KEY_MINIMIZE, "false"), "false");
    }

    #[test]
    fn require_one_of_validates_the_value_set() {
        let mut p = Params::new();
        p.set(KEY_ALGORITHM, "classical").unwrap();
        assert_eq!(p.require_one_of(KEY_ALGORITHM, &["classical", "brzozowski"]).unwrap(), "classical");

        let mut bad = Params::new();
        bad.set(KEY_ALGORITHM, "quantum").unwrap();
        assert!(bad.require_one_of(KEY_ALGORITHM, &["classical", "brzozowski"]).is_err());
    }
}
