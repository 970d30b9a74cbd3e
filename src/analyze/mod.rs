//! @acp:module "Prompt Analysis"
//! @acp:summary "Rule-based analysis of a prompt into an immutable profile"
//! @acp:domain analysis
//! @acp:layer feature
//!
//! Data flows one way: raw text → [`NormalizedText`] → intents and entities →
//! permissions, components, and features → [`AnalysisProfile`].

pub mod classifier;
pub mod entities;
pub mod features;
pub mod normalize;
pub mod permissions;
pub mod profile;
pub mod tables;

pub use classifier::{classify_intents, IntentScores};
pub use entities::{extract_entities, EntityMap};
pub use features::{ComponentRequirements, FeatureFlags};
pub use normalize::NormalizedText;
pub use permissions::{detect_permissions, PermissionSet};
pub use profile::{
    analyze, AnalysisProfile, PromptAnalyzer, Validity, MAX_PROMPT_LENGTH, MIN_PROMPT_LENGTH,
};
pub use tables::{tables, AnalysisTables};
