//! @acp:module "Artifact Synthesis"
//! @acp:summary "Renders popup, content, background, stylesheet, and rule-list files"
//! @acp:domain generation
//! @acp:layer feature
//!
//! The set of files is decided by [`layout::planned_artifacts`], the same gate
//! the manifest builder uses. Which variant of each file is rendered is decided
//! by the chains in [`select`].

pub mod layout;
pub mod select;
pub mod templates;

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::analyze::AnalysisProfile;
use crate::error::Result;

pub use layout::{planned_artifacts, ArtifactKind};

/// Accent used by the stylesheet when no color was detected
pub const DEFAULT_ACCENT: &str = "#00ffff";
/// Color sent by popup and content handlers when no color was detected
pub const DEFAULT_MESSAGE_COLOR: &str = "blue";

/// @acp:summary "Generated files keyed by file name, excluding manifest.json"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactSet {
    files: BTreeMap<String, String>,
}

impl ArtifactSet {
    pub fn insert(&mut self, name: impl Into<String>, content: String) {
        self.files.insert(name.into(), content);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// File names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// SHA-256 over names and contents in sorted order
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, content) in &self.files {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(content.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

#[derive(Serialize)]
struct RenderContext<'a> {
    title: &'a str,
    button_label: &'a str,
    color: &'a str,
    accent: &'a str,
    data_type: &'a str,
    data_type_title: &'a str,
    sites_list: String,
}

/// One declarativeNetRequest rule in rules.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRule {
    pub id: u32,
    pub priority: u32,
    pub action: BlockAction,
    pub condition: BlockCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockAction {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockCondition {
    pub url_filter: String,
    pub resource_types: Vec<String>,
}

/// One rule per site, ids from 1 in list order
pub fn block_rules(sites: &[String]) -> Vec<BlockRule> {
    sites
        .iter()
        .zip(1u32..)
        .map(|(site, id)| BlockRule {
            id,
            priority: 1,
            action: BlockAction {
                kind: "block".to_string(),
            },
            condition: BlockCondition {
                url_filter: format!("||{}", site),
                resource_types: vec!["main_frame".to_string(), "sub_frame".to_string()],
            },
        })
        .collect()
}

/// @acp:summary "Renders every planned artifact for one profile"
pub struct ArtifactSynthesizer<'p> {
    profile: &'p AnalysisProfile,
}

impl<'p> ArtifactSynthesizer<'p> {
    pub fn new(profile: &'p AnalysisProfile) -> Self {
        Self { profile }
    }

    /// Render the artifact set; deterministic for a given profile
    pub fn synthesize(&self) -> Result<ArtifactSet> {
        let context = self.context();
        let mut set = ArtifactSet::default();

        for kind in planned_artifacts(self.profile) {
            let content = self.render(kind, &context)?;
            tracing::debug!(file = kind.file_name(), bytes = content.len(), "Rendered artifact");
            set.insert(kind.file_name(), content);
        }

        Ok(set)
    }

    fn render(&self, kind: ArtifactKind, context: &RenderContext<'_>) -> Result<String> {
        let p = self.profile;
        let template = match kind {
            ArtifactKind::PopupHtml => templates::POPUP_HTML,
            ArtifactKind::PopupJs => {
                let (rule, variant) = select::POPUP_SCRIPT_CHAIN.select(p);
                tracing::trace!(rule, "popup.js variant");
                variant.template()
            }
            ArtifactKind::ContentJs => {
                let (rule, variant) = select::CONTENT_SCRIPT_CHAIN.select(p);
                tracing::trace!(rule, "content.js variant");
                variant.template()
            }
            ArtifactKind::BackgroundJs => {
                let (rule, variant) = select::BACKGROUND_CHAIN.select(p);
                tracing::trace!(rule, "background.js variant");
                variant.template()
            }
            ArtifactKind::Stylesheet => templates::STYLES,
            ArtifactKind::RuleList => {
                return Ok(serde_json::to_string_pretty(&block_rules(&p.blocked_sites))?);
            }
        };

        templates::render(template, context)
    }

    fn context(&self) -> RenderContext<'p> {
        let p = self.profile;
        let (_, markup) = select::POPUP_MARKUP_CHAIN.select(p);
        let (data_type, data_type_title) = if p.features.highlight_phone {
            ("phones", "Phones")
        } else {
            ("emails", "Emails")
        };
        let color = p.color.as_deref();

        RenderContext {
            title: markup.title(),
            button_label: markup.button_label(),
            color: color.unwrap_or(DEFAULT_MESSAGE_COLOR),
            accent: color.unwrap_or(DEFAULT_ACCENT),
            data_type,
            data_type_title,
            sites_list: p
                .blocked_sites
                .iter()
                .map(|site| format!("'{}'", site))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Render all artifacts for a profile
pub fn generate_artifacts(profile: &AnalysisProfile) -> Result<ArtifactSet> {
    ArtifactSynthesizer::new(profile).synthesize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_popup_date_artifacts() {
        let set = generate_artifacts(&analyze(
            "Create an extension that shows a popup with today's date.",
        ))
        .unwrap();
        assert_eq!(set.names(), vec!["popup.html", "popup.js", "styles.css"]);

        let html = set.get("popup.html").unwrap();
        assert!(html.contains("<title>Date & Time</title>"));
        assert!(html.contains(">Refresh</button>"));

        let js = set.get("popup.js").unwrap();
        assert!(js.starts_with("// ChromeForge Generated Popup Script"));
        assert!(js.contains("updateDateTime"));
        assert!(!js.contains("setInterval"));
    }

    #[test]
    fn test_phone_content_script() {
        let set = generate_artifacts(&analyze(
            "Make an extension that highlights all phone numbers on any website.",
        ))
        .unwrap();
        let js = set.get("content.js").unwrap();
        assert!(js.starts_with("// ChromeForge Generated Content Script"));
        assert!(js.contains("PHONE_REGEX"));
        assert!(js.contains("document.body.style.setProperty('color', color, 'important');"));
        assert!(!js.contains("backgroundColor"));
        assert!(js.trim_end().ends_with("})();"));
        assert!(set.contains("styles.css"));
    }

    #[test]
    fn test_rules_json() {
        let set = generate_artifacts(&analyze(
            "Block Facebook and TikTok every time the browser opens.",
        ))
        .unwrap();
        let rules: serde_json::Value = serde_json::from_str(set.get("rules.json").unwrap()).unwrap();
        assert_eq!(rules[0]["id"], 1);
        assert_eq!(rules[0]["condition"]["urlFilter"], "||facebook.com");
        assert_eq!(rules[1]["condition"]["urlFilter"], "||tiktok.com");
        assert_eq!(rules[1]["action"]["type"], "block");
        assert_eq!(
            rules[0]["condition"]["resourceTypes"],
            serde_json::json!(["main_frame", "sub_frame"])
        );

        let bg = set.get("background.js").unwrap();
        assert!(bg.contains("const BLOCKED_SITES = ['facebook.com', 'tiktok.com'];"));
        assert!(!bg.contains("isWorkHours"));
    }

    #[test]
    fn test_scheduled_blocking_background() {
        let set = generate_artifacts(&analyze("Block social media during work hours")).unwrap();
        let bg = set.get("background.js").unwrap();
        assert!(bg.contains("isWorkHours"));
        assert!(bg.contains("'checkWorkHours'"));
        assert!(bg.contains("'instagram.com'"));
    }

    #[test]
    fn test_stylesheet_accent() {
        let set = generate_artifacts(&analyze("Create a popup with a red button.")).unwrap();
        assert!(set.get("styles.css").unwrap().contains("--neon-cyan: #ff4444;"));

        let set = generate_artifacts(&analyze("Create a popup with a big button.")).unwrap();
        assert!(set.get("styles.css").unwrap().contains("--neon-cyan: #00ffff;"));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let p = analyze("Extract all email addresses from the current webpage.");
        let a = generate_artifacts(&p).unwrap();
        let b = generate_artifacts(&p).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let other = generate_artifacts(&analyze("Create a popup with a big button.")).unwrap();
        assert_ne!(a.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_block_rule_ids_start_at_one() {
        let rules = block_rules(&["a.com".to_string(), "b.com".to_string()]);
        assert_eq!(rules.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(block_rules(&[]).is_empty());
    }
}
