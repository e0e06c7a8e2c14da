//! Tenant-aware key resolution and scalar parsing.
//!
//! # Responsibilities
//! - Build the tenant-qualified lookup key
//! - Walk the fallback chain: tenant-scoped → untenanted → default
//! - Parse raw string values into scalar types

use crate::conf::store::Snapshot;

/// Scope used when a lookup carries no tenant identifiers.
const DEFAULT_SCOPE: &str = "default.default";

/// Build the key actually looked up in the snapshot.
///
/// Both identifiers present → `"{bid}.{bgroup}.{key}"`; otherwise the
/// shared default scope applies.
pub fn conf_key(key: &str, bid: Option<i64>, bgroup: Option<&str>) -> String {
    match (bid, bgroup) {
        (Some(bid), Some(bgroup)) => format!("{bid}.{bgroup}.{key}"),
        _ => format!("{DEFAULT_SCOPE}.{key}"),
    }
}

/// A scalar that can be parsed out of a raw config value.
///
/// Parsing is forgiving: an unparsable value behaves like an absent one,
/// so the lookup chain keeps falling back.
pub trait ConfValue: Clone {
    fn parse(raw: &str) -> Option<Self>;
}

impl ConfValue for i32 {
    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ConfValue for i64 {
    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ConfValue for f64 {
    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ConfValue for bool {
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Some(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl ConfValue for String {
    fn parse(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Parsed value for `key`, absent if missing or unparsable.
pub fn get<T: ConfValue>(snapshot: &Snapshot, key: &str) -> Option<T> {
    snapshot.get(key).and_then(|raw| T::parse(raw))
}

/// Fallback chain lookup: the tenant-qualified key wins over the bare
/// logical key; the caller supplies the final default.
pub fn resolve<T: ConfValue>(snapshot: &Snapshot, resolved_key: &str, key: &str) -> Option<T> {
    get(snapshot, resolved_key).or_else(|| get(snapshot, key))
}
