//! Environment-driven configuration.
//!
//! Parsers take a lookup function instead of reading `std::env` directly so
//! tests can feed a fixed map without mutating process state.

pub mod bot;
pub mod db;

use crate::error::AppError;

/// Source of configuration values, usually `std::env::var`.
pub trait Lookup: Fn(&str) -> Option<String> {}

impl<F: Fn(&str) -> Option<String>> Lookup for F {}

/// Lookup backed by the process environment; blank values count as unset.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn must_var(lookup: &impl Lookup, name: &str) -> Result<String, AppError> {
    lookup(name).ok_or_else(|| {
        AppError::config(format!("Required environment variable '{name}' is not set"))
    })
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Lookup {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}
