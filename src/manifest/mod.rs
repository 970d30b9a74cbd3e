//! @acp:module "Manifest"
//! @acp:summary "Manifest V3 descriptor types, synthesis, and self-validation"
//! @acp:domain manifest
//! @acp:layer feature

pub mod builder;

use serde::{Deserialize, Serialize};

pub use builder::{build_manifest, manifest_name, validate_manifest, ManifestBuilder};

/// The only supported manifest format version
pub const MANIFEST_VERSION: u32 = 3;
/// Version string stamped on every generated extension
pub const EXTENSION_VERSION: &str = "1.0.0";
/// Used when the prompt yields no usable name characters
pub const DEFAULT_NAME: &str = "ChromeForge Extension";
pub const DESCRIPTION_PREFIX: &str = "Auto-generated extension: ";
pub const ALL_URLS: &str = "<all_urls>";
pub const RULESET_ID: &str = "ruleset_1";

/// @acp:summary "Structured extension descriptor, serialized as manifest.json"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDescriptor {
    pub manifest_version: u32,
    pub name: String,
    pub version: String,
    pub description: String,

    /// Present but empty when no popup is generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionBlock>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundBlock>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_scripts: Option<Vec<ContentScriptBlock>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_permissions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarative_net_request: Option<DeclarativeNetRequest>,
}

impl ManifestDescriptor {
    /// @acp:summary "Pretty-printed manifest.json content"
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every file name the manifest points at
    pub fn referenced_files(&self) -> Vec<String> {
        let mut files = Vec::new();

        if let Some(popup) = self.action.as_ref().and_then(|a| a.default_popup.as_ref()) {
            files.push(popup.clone());
        }
        if let Some(bg) = &self.background {
            files.push(bg.service_worker.clone());
        }
        for cs in self.content_scripts.iter().flatten() {
            files.extend(cs.js.iter().cloned());
            files.extend(cs.css.iter().flatten().cloned());
        }
        if let Some(dnr) = &self.declarative_net_request {
            files.extend(dnr.rule_resources.iter().map(|r| r.path.clone()));
        }

        files
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_popup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundBlock {
    pub service_worker: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentScriptBlock {
    pub matches: Vec<String>,
    pub js: Vec<String>,
    pub run_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarativeNetRequest {
    pub rule_resources: Vec<RuleResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResource {
    pub id: String,
    pub enabled: bool,
    pub path: String,
}
