//! @acp:module "Manifest Builder"
//! @acp:summary "Deterministic mapping from analysis profile to manifest descriptor"
//! @acp:domain manifest
//! @acp:layer logic

use std::collections::BTreeSet;

use crate::analyze::permissions::{
    ACTIVE_TAB, ALARMS, DECLARATIVE_NET_REQUEST, DECLARATIVE_NET_REQUEST_HOST_ACCESS, STORAGE,
};
use crate::analyze::AnalysisProfile;
use crate::error::{ForgeError, Result};
use crate::generate::layout::{
    ArtifactKind, BACKGROUND_JS_FILE, CONTENT_JS_FILE, POPUP_HTML_FILE, RULES_FILE, STYLES_FILE,
};
use crate::schema;

use super::{
    ActionBlock, BackgroundBlock, ContentScriptBlock, DeclarativeNetRequest, ManifestDescriptor,
    RuleResource, ALL_URLS, DEFAULT_NAME, DESCRIPTION_PREFIX, EXTENSION_VERSION, MANIFEST_VERSION,
    RULESET_ID,
};

const NAME_LIMIT: usize = 50;
const TITLE_LIMIT: usize = 30;
const DESCRIPTION_LIMIT: usize = 100;
const RUN_AT: &str = "document_idle";
const REQUIRED_FIELDS: [&str; 4] = ["manifest_version", "name", "version", "description"];

/// @acp:summary "Builds the manifest for one analysis profile"
pub struct ManifestBuilder<'p> {
    profile: &'p AnalysisProfile,
}

impl<'p> ManifestBuilder<'p> {
    pub fn new(profile: &'p AnalysisProfile) -> Self {
        Self { profile }
    }

    /// @acp:summary "Assemble the descriptor; pure function of the profile"
    pub fn build(&self) -> ManifestDescriptor {
        let p = self.profile;
        let name = manifest_name(&p.raw_text);

        ManifestDescriptor {
            manifest_version: MANIFEST_VERSION,
            version: EXTENSION_VERSION.to_string(),
            description: format!(
                "{}{}",
                DESCRIPTION_PREFIX,
                take_chars(&p.raw_text, DESCRIPTION_LIMIT)
            ),
            action: Some(self.action(&name)),
            background: self.background(),
            content_scripts: self.content_scripts(),
            permissions: self.permissions(),
            host_permissions: self.host_permissions(),
            declarative_net_request: self.rule_resources(),
            name,
        }
    }

    fn action(&self, name: &str) -> ActionBlock {
        if !ArtifactKind::PopupHtml.is_emitted(self.profile) {
            return ActionBlock::default();
        }
        ActionBlock {
            default_popup: Some(POPUP_HTML_FILE.to_string()),
            default_title: Some(take_chars(name, TITLE_LIMIT)),
        }
    }

    fn background(&self) -> Option<BackgroundBlock> {
        ArtifactKind::BackgroundJs
            .is_emitted(self.profile)
            .then(|| BackgroundBlock {
                service_worker: BACKGROUND_JS_FILE.to_string(),
            })
    }

    fn content_scripts(&self) -> Option<Vec<ContentScriptBlock>> {
        if !ArtifactKind::ContentJs.is_emitted(self.profile) {
            return None;
        }
        let css = self
            .profile
            .components
            .stylesheet
            .then(|| vec![STYLES_FILE.to_string()]);

        Some(vec![ContentScriptBlock {
            matches: vec![ALL_URLS.to_string()],
            js: vec![CONTENT_JS_FILE.to_string()],
            run_at: RUN_AT.to_string(),
            css,
        }])
    }

    /// Detected grants plus the ones implied by components and features, sorted
    fn permissions(&self) -> Option<Vec<String>> {
        let p = self.profile;
        let mut grants: BTreeSet<String> = p.permissions.clone();

        if p.components.content_script {
            grants.insert(ACTIVE_TAB.to_string());
        }
        if p.components.storage {
            grants.insert(STORAGE.to_string());
        }
        if p.features.block_sites {
            grants.insert(DECLARATIVE_NET_REQUEST.to_string());
            grants.insert(DECLARATIVE_NET_REQUEST_HOST_ACCESS.to_string());
        }
        if p.features.time_based || p.features.refresh_timer {
            grants.insert(ALARMS.to_string());
        }

        (!grants.is_empty()).then(|| grants.into_iter().collect())
    }

    fn host_permissions(&self) -> Option<Vec<String>> {
        let sites = &self.profile.blocked_sites;
        if sites.is_empty() {
            return None;
        }

        let mut hosts: BTreeSet<String> =
            sites.iter().map(|site| format!("*://*.{}/*", site)).collect();
        hosts.insert(ALL_URLS.to_string());

        Some(hosts.into_iter().collect())
    }

    fn rule_resources(&self) -> Option<DeclarativeNetRequest> {
        ArtifactKind::RuleList
            .is_emitted(self.profile)
            .then(|| DeclarativeNetRequest {
                rule_resources: vec![RuleResource {
                    id: RULESET_ID.to_string(),
                    enabled: true,
                    path: RULES_FILE.to_string(),
                }],
            })
    }
}

/// Build the manifest for a profile
pub fn build_manifest(profile: &AnalysisProfile) -> ManifestDescriptor {
    ManifestBuilder::new(profile).build()
}

/// Name derived from the first 50 prompt characters
pub fn manifest_name(raw: &str) -> String {
    let cleaned: String = take_chars(raw, NAME_LIMIT)
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// @acp:summary "Structural self-check; reports every problem, corrects none"
pub fn validate_manifest(manifest: &ManifestDescriptor) -> Result<()> {
    let mut errors = Vec::new();

    let value = serde_json::to_value(manifest)
        .map_err(|e| ForgeError::Manifest(vec![format!("Invalid JSON structure: {}", e)]))?;

    for field in REQUIRED_FIELDS {
        let present = match value.get(field) {
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(v) => !v.is_null(),
            None => false,
        };
        if !present {
            errors.push(format!("Missing required field: {}", field));
        }
    }

    if manifest.manifest_version != MANIFEST_VERSION {
        errors.push(format!("manifest_version must be {}", MANIFEST_VERSION));
    }

    match manifest.to_json().and_then(|json| ManifestDescriptor::from_json(&json)) {
        Ok(parsed) if parsed == *manifest => {}
        Ok(_) => errors.push("Manifest does not survive a JSON round trip".to_string()),
        Err(e) => errors.push(format!("Invalid JSON structure: {}", e)),
    }

    if let Err(e) = schema::validate_manifest_value(&value) {
        errors.push(e.to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ForgeError::Manifest(errors))
    }
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;

    #[test]
    fn test_name_strips_punctuation() {
        assert_eq!(
            manifest_name("Create an extension that shows a popup with today's date."),
            "Create an extension that shows a popup with today"
        );
    }

    #[test]
    fn test_name_falls_back_when_empty() {
        assert_eq!(manifest_name("!!! ???"), DEFAULT_NAME);
        assert_eq!(manifest_name(""), DEFAULT_NAME);
    }

    #[test]
    fn test_empty_action_without_popup() {
        let m = build_manifest(&analyze("Block Facebook and TikTok every time the browser opens."));
        assert_eq!(m.action, Some(ActionBlock::default()));
        let json = m.to_json().unwrap();
        assert!(json.contains("\"action\": {}"));
    }

    #[test]
    fn test_popup_action_title_truncated() {
        let m = build_manifest(&analyze("Create an extension that shows a popup with today's date."));
        let action = m.action.unwrap();
        assert_eq!(action.default_popup.as_deref(), Some("popup.html"));
        assert_eq!(action.default_title.unwrap().chars().count(), 30);
    }

    #[test]
    fn test_blocking_permissions_and_hosts() {
        let m = build_manifest(&analyze("Block Facebook and TikTok every time the browser opens."));
        assert_eq!(
            m.permissions.unwrap(),
            vec!["declarativeNetRequest", "declarativeNetRequestWithHostAccess"]
        );
        assert_eq!(
            m.host_permissions.unwrap(),
            vec!["*://*.facebook.com/*", "*://*.tiktok.com/*", "<all_urls>"]
        );
        let dnr = m.declarative_net_request.unwrap();
        assert_eq!(dnr.rule_resources[0].path, "rules.json");
    }

    #[test]
    fn test_content_script_block() {
        let m = build_manifest(&analyze(
            "Make an extension that highlights all phone numbers on any website.",
        ));
        let cs = &m.content_scripts.as_ref().unwrap()[0];
        assert_eq!(cs.matches, vec!["<all_urls>"]);
        assert_eq!(cs.js, vec!["content.js"]);
        assert_eq!(cs.css, Some(vec!["styles.css".to_string()]));
        assert!(m.permissions.unwrap().contains(&"activeTab".to_string()));
    }

    #[test]
    fn test_scheduling_grant() {
        let m = build_manifest(&analyze(
            "Create a popup with the date and a refresh button.",
        ));
        assert!(m.permissions.unwrap().contains(&"alarms".to_string()));
    }

    #[test]
    fn test_generated_manifest_validates() {
        let m = build_manifest(&analyze("Block social media during work hours"));
        validate_manifest(&m).unwrap();
    }

    #[test]
    fn test_validation_reports_all_problems() {
        let mut m = build_manifest(&analyze("Create a popup"));
        m.manifest_version = 2;
        m.name.clear();
        match validate_manifest(&m) {
            Err(ForgeError::Manifest(errors)) => {
                assert!(errors.iter().any(|e| e.contains("name")));
                assert!(errors.iter().any(|e| e.contains("manifest_version must be 3")));
            }
            other => panic!("expected manifest errors, got {:?}", other),
        }
    }
}
