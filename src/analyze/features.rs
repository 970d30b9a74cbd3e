//! @acp:module "Feature Resolver"
//! @acp:summary "Component requirements, feature flags, color, and blocked-site derivation"
//! @acp:domain analysis
//! @acp:layer logic
//!
//! Every requirement and flag is an independent predicate; several can fire
//! for the same prompt. Evaluation order:
//!
//! 1. **Components** from intent thresholds OR short-circuit keywords
//! 2. **Color** from the priority-ordered color table
//! 3. **Flags** from substring tests and entity lookups
//! 4. **Blocked sites** only when `block_sites` is set

use serde::Serialize;

use super::classifier::{
    score_of, IntentScores, BACKGROUND_AUTOMATION, CONTENT_MODIFICATION, DATA_STORAGE,
    UI_INTERACTION,
};
use super::entities::{has_entity, EntityMap, SOCIAL_MEDIA, TIME_PATTERNS};
use super::normalize::NormalizedText;
use super::permissions::{PermissionSet, STORAGE};
use super::tables::AnalysisTables;

const POPUP_THRESHOLD: f64 = 0.3;
const CONTENT_SCRIPT_THRESHOLD: f64 = 0.3;
const BACKGROUND_THRESHOLD: f64 = 0.3;
const STORAGE_THRESHOLD: f64 = 0.4;

/// Generic phrase that selects the fallback block list
const SOCIAL_MEDIA_PHRASE: &str = "social media";

/// @acp:summary "Which extension components must be generated"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComponentRequirements {
    pub popup: bool,
    pub content_script: bool,
    pub background: bool,
    pub storage: bool,
    /// Always true when `popup` is
    pub stylesheet: bool,
}

/// @acp:summary "Named behaviours to synthesize"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub show_date: bool,
    pub highlight_phone: bool,
    pub highlight_email: bool,
    pub block_sites: bool,
    pub change_color: bool,
    pub time_based: bool,
    pub refresh_timer: bool,
    pub copy_feature: bool,
    pub dark_mode: bool,
}

impl FeatureFlags {
    /// Flags as (name, value) in declaration order
    pub fn entries(&self) -> [(&'static str, bool); 9] {
        [
            ("show_date", self.show_date),
            ("highlight_phone", self.highlight_phone),
            ("highlight_email", self.highlight_email),
            ("block_sites", self.block_sites),
            ("change_color", self.change_color),
            ("time_based", self.time_based),
            ("refresh_timer", self.refresh_timer),
            ("copy_feature", self.copy_feature),
            ("dark_mode", self.dark_mode),
        ]
    }

    /// Names of the flags that fired
    pub fn active(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Derive component requirements; `color` must already be resolved
pub fn resolve_components(
    text: &NormalizedText,
    intents: &IntentScores,
    permissions: &PermissionSet,
    color: Option<&str>,
    tables: &AnalysisTables,
) -> ComponentRequirements {
    let kw = &tables.components;

    let popup = score_of(intents, UI_INTERACTION) > POPUP_THRESHOLD || text.contains_any(&kw.popup);
    let content_script = score_of(intents, CONTENT_MODIFICATION) > CONTENT_SCRIPT_THRESHOLD
        || text.contains_any(&kw.content_script);
    let background = score_of(intents, BACKGROUND_AUTOMATION) > BACKGROUND_THRESHOLD
        || text.contains_any(&kw.background);
    let storage = permissions.contains(STORAGE) || score_of(intents, DATA_STORAGE) > STORAGE_THRESHOLD;
    let stylesheet = color.is_some() || text.contains_any(&kw.stylesheet);

    ComponentRequirements {
        popup,
        content_script,
        background,
        storage,
        stylesheet: stylesheet || popup,
    }
}

/// First color in table order whose name occurs in the text
pub fn detect_color(text: &NormalizedText, tables: &AnalysisTables) -> Option<String> {
    tables
        .colors
        .iter()
        .find(|c| text.contains(&c.name))
        .map(|c| c.hex.clone())
}

/// Evaluate every feature predicate independently
pub fn resolve_features(
    text: &NormalizedText,
    entities: &EntityMap,
    tables: &AnalysisTables,
) -> FeatureFlags {
    let kw = &tables.features;
    let has_action = text.contains_any(&kw.highlight_actions);

    FeatureFlags {
        show_date: text.contains_any(&kw.show_date),
        // Both highlight flags may fire together; template selection picks one
        highlight_phone: text.contains("phone") && has_action,
        highlight_email: text.contains("email") && has_action,
        block_sites: text.contains("block")
            && (has_entity(entities, SOCIAL_MEDIA)
                || text.contains(SOCIAL_MEDIA_PHRASE)
                || text.contains_any(&kw.blockable_sites)),
        change_color: text.contains_any(&kw.change_color),
        time_based: has_entity(entities, TIME_PATTERNS) || text.contains_any(&kw.time_based),
        refresh_timer: text.contains_any(&kw.refresh_timer),
        copy_feature: text.contains("copy"),
        dark_mode: text.contains("dark") && text.contains_any(&kw.dark_mode_qualifiers),
    }
}

/// Domains to block, in social-table order; empty unless `block_sites` is set
pub fn resolve_blocked_sites(
    text: &NormalizedText,
    features: &FeatureFlags,
    tables: &AnalysisTables,
) -> Vec<String> {
    if !features.block_sites {
        return Vec::new();
    }

    let sites: Vec<String> = tables
        .social_domains
        .iter()
        .filter(|s| text.contains(&s.platform))
        .map(|s| s.domain.clone())
        .collect();

    if sites.is_empty() && text.contains(SOCIAL_MEDIA_PHRASE) {
        return tables.social_fallback.clone();
    }

    sites
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::classifier::classify_intents;
    use crate::analyze::entities::extract_entities;
    use crate::analyze::permissions::detect_permissions;
    use crate::analyze::tables::tables;

    struct Resolved {
        components: ComponentRequirements,
        features: FeatureFlags,
        color: Option<String>,
        blocked: Vec<String>,
    }

    fn resolve(raw: &str) -> Resolved {
        let t = tables();
        let text = NormalizedText::new(raw);
        let intents = classify_intents(&text, t);
        let entities = extract_entities(&text, t);
        let permissions = detect_permissions(&text, t);
        let color = detect_color(&text, t);
        let components = resolve_components(&text, &intents, &permissions, color.as_deref(), t);
        let features = resolve_features(&text, &entities, t);
        let blocked = resolve_blocked_sites(&text, &features, t);
        Resolved {
            components,
            features,
            color,
            blocked,
        }
    }

    #[test]
    fn test_popup_forces_stylesheet() {
        let r = resolve("Create an extension that shows a popup with today's date.");
        assert!(r.components.popup);
        assert!(r.components.stylesheet);
        assert!(r.color.is_none());
    }

    #[test]
    fn test_phone_and_email_both_fire() {
        let r = resolve("Highlight every phone number and email address");
        assert!(r.features.highlight_phone);
        assert!(r.features.highlight_email);
    }

    #[test]
    fn test_phone_needs_action_word() {
        let r = resolve("Make an extension about my phone");
        assert!(!r.features.highlight_phone);
    }

    #[test]
    fn test_blocked_sites_follow_table_order() {
        let r = resolve("Block TikTok and Facebook every time the browser opens.");
        assert_eq!(r.blocked, vec!["facebook.com", "tiktok.com"]);
    }

    #[test]
    fn test_social_media_fallback() {
        let r = resolve("Build an extension that blocks access to social media sites during work hours (9 AM to 5 PM).");
        assert!(r.features.block_sites);
        assert!(r.features.time_based);
        assert_eq!(
            r.blocked,
            vec!["facebook.com", "twitter.com", "tiktok.com", "instagram.com"]
        );
    }

    #[test]
    fn test_no_blocking_without_block_word() {
        let r = resolve("Show my facebook notifications in a popup");
        assert!(!r.features.block_sites);
        assert!(r.blocked.is_empty());
    }

    #[test]
    fn test_color_priority_order() {
        // "blue" precedes "green" in the table regardless of prompt order
        let r = resolve("Make text green then blue");
        assert_eq!(r.color.as_deref(), Some("#4285f4"));
        assert!(r.components.stylesheet);
    }

    #[test]
    fn test_storage_from_permission() {
        let r = resolve("An extension that saves notes to local storage with a popup.");
        assert!(r.components.storage);
        assert!(r.components.popup);
    }

    #[test]
    fn test_dark_mode() {
        let r = resolve("A dark mode theme for all webpages.");
        assert!(r.features.dark_mode);
        assert!(r.components.content_script);
    }

    #[test]
    fn test_active_flags_listing() {
        let flags = FeatureFlags {
            show_date: true,
            copy_feature: true,
            ..Default::default()
        };
        assert_eq!(flags.active(), vec!["show_date", "copy_feature"]);
    }
}
