//! @acp:module "Permission Resolver"
//! @acp:summary "Trigger-phrase mapping from prompt text to capability grants"
//! @acp:domain analysis
//! @acp:layer logic

use std::collections::BTreeSet;

use super::normalize::NormalizedText;
use super::tables::AnalysisTables;

pub const ACTIVE_TAB: &str = "activeTab";
pub const STORAGE: &str = "storage";
pub const ALARMS: &str = "alarms";
pub const DECLARATIVE_NET_REQUEST: &str = "declarativeNetRequest";
pub const DECLARATIVE_NET_REQUEST_HOST_ACCESS: &str = "declarativeNetRequestWithHostAccess";

/// Capability grant names
pub type PermissionSet = BTreeSet<String>;

/// Grant every capability with at least one trigger phrase in the text
pub fn detect_permissions(text: &NormalizedText, tables: &AnalysisTables) -> PermissionSet {
    tables
        .permissions
        .iter()
        .filter(|rule| rule.triggers.iter().any(|t| text.contains(t)))
        .map(|rule| rule.name.clone())
        .collect()
}
