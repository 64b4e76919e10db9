//! Parsing of the free-form "bulk add" inputs
//!
//! Malformed entries are dropped without notice; nothing here fails.

use std::collections::{BTreeMap, HashSet};

use mamabear_models::LinkPayload;

/// Separator between app name and image tag in link and volume references
pub const REFERENCE_SEPARATOR: char = ':';

/// Split a comma separated list, trimming items and dropping empty ones
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `key=value,key=value` pairs
///
/// Keys and values are trimmed; entries without `=` or with an empty key
/// are dropped. Values may themselves contain `=`.
pub fn parse_env_pairs(input: &str) -> Vec<(String, String)> {
    input
        .split(',')
        .filter_map(|entry| entry.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Merge parsed pairs into an existing mapping, last write wins
pub fn merge_env_vars(vars: &mut BTreeMap<String, String>, input: &str) {
    for (key, value) in parse_env_pairs(input) {
        vars.insert(key, value);
    }
}

/// Remove duplicates, keeping the first occurrence of each item
pub fn dedup_ordered(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

/// Split an `app:tag` reference; `None` when the separator is missing
pub fn parse_reference(reference: &str) -> Option<LinkPayload> {
    reference
        .split_once(REFERENCE_SEPARATOR)
        .map(|(app_name, image_tag)| LinkPayload {
            app_name: app_name.to_string(),
            image_tag: image_tag.to_string(),
        })
}

/// Serialize references, dropping malformed ones and duplicates
pub fn serialize_references(references: &[String]) -> Vec<LinkPayload> {
    let mut seen = HashSet::new();
    references
        .iter()
        .filter_map(|reference| parse_reference(reference))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// Render a reference payload back to its `app:tag` form
pub fn format_reference(link: &LinkPayload) -> String {
    format!("{}{}{}", link.app_name, REFERENCE_SEPARATOR, link.image_tag)
}
