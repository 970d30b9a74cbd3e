//! @acp:module "Artifact Layout"
//! @acp:summary "Which output files exist for a profile, shared by both synthesizers"
//! @acp:domain generation
//! @acp:layer logic

use serde::Serialize;

use crate::analyze::AnalysisProfile;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const POPUP_HTML_FILE: &str = "popup.html";
pub const POPUP_JS_FILE: &str = "popup.js";
pub const CONTENT_JS_FILE: &str = "content.js";
pub const BACKGROUND_JS_FILE: &str = "background.js";
pub const STYLES_FILE: &str = "styles.css";
pub const RULES_FILE: &str = "rules.json";

/// @acp:summary "One kind of generated file besides the manifest"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    PopupHtml,
    PopupJs,
    ContentJs,
    BackgroundJs,
    Stylesheet,
    RuleList,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::PopupHtml,
        ArtifactKind::PopupJs,
        ArtifactKind::ContentJs,
        ArtifactKind::BackgroundJs,
        ArtifactKind::Stylesheet,
        ArtifactKind::RuleList,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::PopupHtml => POPUP_HTML_FILE,
            ArtifactKind::PopupJs => POPUP_JS_FILE,
            ArtifactKind::ContentJs => CONTENT_JS_FILE,
            ArtifactKind::BackgroundJs => BACKGROUND_JS_FILE,
            ArtifactKind::Stylesheet => STYLES_FILE,
            ArtifactKind::RuleList => RULES_FILE,
        }
    }

    /// Emission gate for this kind
    pub fn is_emitted(&self, profile: &AnalysisProfile) -> bool {
        let c = &profile.components;
        match self {
            ArtifactKind::PopupHtml | ArtifactKind::PopupJs => c.popup,
            ArtifactKind::ContentJs => c.content_script,
            ArtifactKind::BackgroundJs => c.background,
            ArtifactKind::Stylesheet => c.stylesheet || c.popup || c.content_script,
            ArtifactKind::RuleList => profile.features.block_sites,
        }
    }
}

/// Artifact kinds to emit, in declaration order
pub fn planned_artifacts(profile: &AnalysisProfile) -> Vec<ArtifactKind> {
    ArtifactKind::ALL
        .into_iter()
        .filter(|kind| kind.is_emitted(profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;

    #[test]
    fn test_popup_prompt_layout() {
        let p = analyze("Create an extension that shows a popup with today's date.");
        assert_eq!(
            planned_artifacts(&p),
            vec![
                ArtifactKind::PopupHtml,
                ArtifactKind::PopupJs,
                ArtifactKind::Stylesheet
            ]
        );
    }

    #[test]
    fn test_content_script_always_ships_stylesheet() {
        let mut p = analyze("Extract all email addresses from the current webpage.");
        p.components.stylesheet = false;
        assert!(ArtifactKind::Stylesheet.is_emitted(&p));
    }

    #[test]
    fn test_blocking_layout() {
        let p = analyze("Block Facebook and TikTok every time the browser opens.");
        assert_eq!(
            planned_artifacts(&p),
            vec![ArtifactKind::BackgroundJs, ArtifactKind::RuleList]
        );
    }
}
