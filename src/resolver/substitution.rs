//! `${name}` property substitution.
//!
//! Substitution is a single pass: each `${name}` whose `name` is an exact key of the map
//! is replaced by the value verbatim, and the replacement text is not scanned again.
//! Unknown references are left in place.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::models::DependencyRecord;

static PROPERTY_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("property reference pattern is valid"));

/// Replace every known `${name}` in `value`.
pub fn substitute(value: &str, properties: &BTreeMap<String, String>) -> String {
    PROPERTY_REF
        .replace_all(value, |caps: &Captures<'_>| match properties.get(&caps[1]) {
            Some(replacement) => replacement.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitute every property value against a snapshot of the whole map.
pub fn substitute_properties(properties: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    properties
        .iter()
        .map(|(name, value)| (name.clone(), substitute(value, properties)))
        .collect()
}

/// Substitute every field of a dependency record, exclusions included.
pub fn substitute_record(
    record: &DependencyRecord,
    properties: &BTreeMap<String, String>,
) -> DependencyRecord {
    record.map_fields(|value| substitute(value, properties))
}
