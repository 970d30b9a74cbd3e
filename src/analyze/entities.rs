//! @acp:module "Entity Extractor"
//! @acp:summary "Pattern-based extraction of sites, platforms, and other prompt facts"
//! @acp:domain analysis
//! @acp:layer logic

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use super::normalize::NormalizedText;
use super::tables::AnalysisTables;

pub const TARGET_WEBSITES: &str = "target_websites";
pub const SOCIAL_MEDIA: &str = "social_media";
pub const TIME_PATTERNS: &str = "time_patterns";
pub const SCHEDULING: &str = "scheduling";

/// Distinct matches per entity category; a missing key means no matches
pub type EntityMap = BTreeMap<String, BTreeSet<String>>;

/// Run every entity pattern against the normalized prompt
pub fn extract_entities(text: &NormalizedText, tables: &AnalysisTables) -> EntityMap {
    let mut entities = EntityMap::new();

    for pattern in &tables.entities {
        let found = find_all(&pattern.regex, text.as_str());
        if !found.is_empty() {
            entities.insert(pattern.name.clone(), found);
        }
    }

    entities
}

/// Collect non-overlapping matches.
///
/// With capture groups the first participating group is the value; without
/// any, the whole match is.
fn find_all(regex: &Regex, haystack: &str) -> BTreeSet<String> {
    let has_groups = regex.captures_len() > 1;

    regex
        .captures_iter(haystack)
        .filter_map(|caps| {
            if has_groups {
                caps.iter().skip(1).flatten().next()
            } else {
                caps.get(0)
            }
        })
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True if the category has at least one match
pub fn has_entity(entities: &EntityMap, category: &str) -> bool {
    entities.get(category).is_some_and(|set| !set.is_empty())
}
