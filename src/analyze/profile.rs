//! @acp:module "Profile Assembler"
//! @acp:summary "Validation verdict plus assembly of the immutable analysis profile"
//! @acp:domain analysis
//! @acp:layer service

use serde::Serialize;

use super::classifier::{classify_intents, IntentScores};
use super::entities::{extract_entities, EntityMap};
use super::features::{
    detect_color, resolve_blocked_sites, resolve_components, resolve_features,
    ComponentRequirements, FeatureFlags,
};
use super::normalize::NormalizedText;
use super::permissions::{detect_permissions, PermissionSet};
use super::tables::{tables, AnalysisTables};

/// Inclusive prompt length bounds, in characters
pub const MIN_PROMPT_LENGTH: usize = 10;
pub const MAX_PROMPT_LENGTH: usize = 1000;

/// @acp:summary "Advisory verdict on the raw prompt"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub valid: bool,
    pub reason: String,
}

impl Validity {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: "Valid prompt".to_string(),
        }
    }

    fn invalid(reason: String) -> Self {
        Self {
            valid: false,
            reason,
        }
    }
}

/// @acp:summary "Single source of truth for manifest and artifact synthesis"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisProfile {
    pub raw_text: String,
    pub normalized: NormalizedText,
    pub intents: IntentScores,
    pub entities: EntityMap,
    pub permissions: PermissionSet,
    pub color: Option<String>,
    pub components: ComponentRequirements,
    pub features: FeatureFlags,
    pub blocked_sites: Vec<String>,
    pub validity: Validity,
}

impl AnalysisProfile {
    /// Highest-scoring intent; ties resolve to the lexically first name
    pub fn top_intent(&self) -> Option<(&str, f64)> {
        self.intents
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (name, score)| match best {
                Some((_, s)) if s >= *score => best,
                _ => Some((name.as_str(), *score)),
            })
    }
}

/// @acp:summary "Runs the analysis stages over one prompt"
#[derive(Debug, Clone, Copy)]
pub struct PromptAnalyzer<'t> {
    tables: &'t AnalysisTables,
}

impl Default for PromptAnalyzer<'static> {
    fn default() -> Self {
        Self::new(tables())
    }
}

impl<'t> PromptAnalyzer<'t> {
    pub fn new(tables: &'t AnalysisTables) -> Self {
        Self { tables }
    }

    /// Length and action-verb checks; never blocks analysis
    pub fn validate(&self, raw: &str, text: &NormalizedText) -> Validity {
        let length = raw.chars().count();

        if length < MIN_PROMPT_LENGTH {
            return Validity::invalid(format!(
                "Prompt too short. Minimum {} characters required.",
                MIN_PROMPT_LENGTH
            ));
        }
        if length > MAX_PROMPT_LENGTH {
            return Validity::invalid(format!(
                "Prompt too long. Maximum {} characters allowed.",
                MAX_PROMPT_LENGTH
            ));
        }
        if !text.contains_any(&self.tables.action_verbs) {
            return Validity::invalid(
                "Please include an action verb (create, make, show, block, highlight, etc.)"
                    .to_string(),
            );
        }

        Validity::ok()
    }

    /// Build the full profile regardless of the validity verdict
    pub fn analyze(&self, raw: &str) -> AnalysisProfile {
        let t = self.tables;
        let normalized = NormalizedText::new(raw);
        let validity = self.validate(raw, &normalized);
        if !validity.valid {
            tracing::warn!(reason = %validity.reason, "Prompt failed validation; continuing");
        }

        let intents = classify_intents(&normalized, t);
        let entities = extract_entities(&normalized, t);
        let permissions = detect_permissions(&normalized, t);
        let color = detect_color(&normalized, t);
        let components =
            resolve_components(&normalized, &intents, &permissions, color.as_deref(), t);
        let features = resolve_features(&normalized, &entities, t);
        let blocked_sites = resolve_blocked_sites(&normalized, &features, t);

        tracing::debug!(
            ?intents,
            ?components,
            active_features = ?features.active(),
            blocked = blocked_sites.len(),
            "Prompt analyzed"
        );

        AnalysisProfile {
            raw_text: raw.to_string(),
            normalized,
            intents,
            entities,
            permissions,
            color,
            components,
            features,
            blocked_sites,
            validity,
        }
    }
}

/// Analyze with the built-in tables
pub fn analyze(raw: &str) -> AnalysisProfile {
    PromptAnalyzer::default().analyze(raw)
}
