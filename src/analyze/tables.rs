//! @acp:module "Analysis Tables"
//! @acp:summary "Versioned keyword, pattern, and trigger data loaded once per process"
//! @acp:domain analysis
//! @acp:layer data
//!
//! The tables ship inside the binary (`data/analysis.v1.json`) and are parsed
//! on first use. Every list keeps its declared order because several lookups
//! are first-match-wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{ForgeError, Result};

/// Only table version this build understands
pub const TABLES_VERSION: u32 = 1;

static BUILTIN_TABLES: LazyLock<AnalysisTables> = LazyLock::new(|| {
    AnalysisTables::from_json(include_str!("../../data/analysis.v1.json"))
        .expect("embedded analysis tables are valid")
});

/// Built-in tables, shared read-only for the life of the process
pub fn tables() -> &'static AnalysisTables {
    &BUILTIN_TABLES
}

/// @acp:summary "An intent category scored by keyword overlap"
#[derive(Debug, Clone, Deserialize)]
pub struct IntentCategory {
    pub name: String,
    pub keywords: Vec<String>,
    pub weight: f64,
    /// Advisory only; the classifier reports raw confidence
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEntityPattern {
    name: String,
    pattern: String,
}

/// @acp:summary "A named, compiled entity pattern"
#[derive(Debug, Clone)]
pub struct EntityPattern {
    pub name: String,
    pub regex: Regex,
}

/// @acp:summary "A capability grant and the phrases that trigger it"
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionRule {
    pub name: String,
    pub triggers: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorEntry {
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialDomain {
    pub platform: String,
    pub domain: String,
}

/// Short-circuit keyword lists for component requirements
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentKeywords {
    pub popup: Vec<String>,
    pub content_script: Vec<String>,
    pub background: Vec<String>,
    pub stylesheet: Vec<String>,
}

/// Keyword lists referenced by the feature predicates
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureKeywords {
    pub show_date: Vec<String>,
    pub highlight_actions: Vec<String>,
    pub blockable_sites: Vec<String>,
    pub change_color: Vec<String>,
    pub time_based: Vec<String>,
    pub refresh_timer: Vec<String>,
    pub dark_mode_qualifiers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTables {
    version: u32,
    intents: Vec<IntentCategory>,
    entities: Vec<RawEntityPattern>,
    permissions: Vec<PermissionRule>,
    colors: Vec<ColorEntry>,
    social_domains: Vec<SocialDomain>,
    social_fallback: Vec<String>,
    components: ComponentKeywords,
    features: FeatureKeywords,
    action_verbs: Vec<String>,
}

/// @acp:summary "Immutable configuration data consumed by every analysis stage"
#[derive(Debug, Clone)]
pub struct AnalysisTables {
    pub version: u32,
    pub intents: Vec<IntentCategory>,
    pub entities: Vec<EntityPattern>,
    pub permissions: Vec<PermissionRule>,
    pub colors: Vec<ColorEntry>,
    pub social_domains: Vec<SocialDomain>,
    pub social_fallback: Vec<String>,
    pub components: ComponentKeywords,
    pub features: FeatureKeywords,
    pub action_verbs: Vec<String>,
}

impl AnalysisTables {
    /// @acp:summary "Parse a tables document and compile its patterns"
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTables = serde_json::from_str(json)?;

        if raw.version != TABLES_VERSION {
            return Err(ForgeError::Tables(format!(
                "unsupported tables version {} (expected {})",
                raw.version, TABLES_VERSION
            )));
        }

        for intent in &raw.intents {
            if intent.keywords.is_empty() {
                return Err(ForgeError::Tables(format!(
                    "intent '{}' has no keywords",
                    intent.name
                )));
            }
        }

        let entities = raw
            .entities
            .into_iter()
            .map(|e| {
                Regex::new(&format!("(?i){}", e.pattern))
                    .map(|regex| EntityPattern {
                        name: e.name.clone(),
                        regex,
                    })
                    .map_err(|err| {
                        ForgeError::Tables(format!("entity pattern '{}': {}", e.name, err))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: raw.version,
            intents: raw.intents,
            entities,
            permissions: raw.permissions,
            colors: raw.colors,
            social_domains: raw.social_domains,
            social_fallback: raw.social_fallback,
            components: raw.components,
            features: raw.features,
            action_verbs: raw.action_verbs,
        })
    }

    pub fn intent(&self, name: &str) -> Option<&IntentCategory> {
        self.intents.iter().find(|i| i.name == name)
    }

    pub fn permission(&self, name: &str) -> Option<&PermissionRule> {
        self.permissions.iter().find(|p| p.name == name)
    }
}
