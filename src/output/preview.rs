//! @acp:module "Write Preview"
//! @acp:summary "Unified diffs of what a write would change in an existing directory"
//! @acp:domain output
//! @acp:layer io

use std::fs;

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::error::Result;
use crate::generate::layout::MANIFEST_FILE;
use crate::generate::ArtifactSet;
use crate::manifest::ManifestDescriptor;

use super::ExtensionWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Modified,
    Unchanged,
    /// Present on disk, not produced by this run
    Removed,
}

/// @acp:summary "Change to one file"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    pub name: String,
    pub status: DiffStatus,
    pub insertions: usize,
    pub deletions: usize,
    /// Unified diff text; empty when unchanged
    pub diff: String,
}

impl ExtensionWriter {
    /// Diff the would-be output against the current output dir, in name order
    /// with manifest.json first. Touches nothing on disk.
    pub fn preview(
        &self,
        manifest: &ManifestDescriptor,
        artifacts: &ArtifactSet,
    ) -> Result<Vec<FileDiff>> {
        let mut existing = self.existing_files();
        let manifest_json = manifest.to_json()?;

        let mut planned: Vec<(&str, &str)> = vec![(MANIFEST_FILE, manifest_json.as_str())];
        planned.extend(artifacts.iter());

        let mut diffs = Vec::with_capacity(planned.len());
        for (name, new) in planned {
            let old = if existing.remove(name) {
                Some(fs::read_to_string(self.output_dir().join(name))?)
            } else {
                None
            };
            diffs.push(file_diff(name, old.as_deref(), Some(new)));
        }

        for name in existing {
            let old = fs::read_to_string(self.output_dir().join(&name)).unwrap_or_default();
            diffs.push(file_diff(&name, Some(&old), None));
        }

        Ok(diffs)
    }
}

fn file_diff(name: &str, old: Option<&str>, new: Option<&str>) -> FileDiff {
    let status = match (old, new) {
        (None, _) => DiffStatus::Added,
        (Some(_), None) => DiffStatus::Removed,
        (Some(a), Some(b)) if a == b => DiffStatus::Unchanged,
        (Some(_), Some(_)) => DiffStatus::Modified,
    };

    if status == DiffStatus::Unchanged {
        return FileDiff {
            name: name.to_string(),
            status,
            insertions: 0,
            deletions: 0,
            diff: String::new(),
        };
    }

    let old = old.unwrap_or("");
    let new = new.unwrap_or("");
    let diff = TextDiff::from_lines(old, new);

    let mut insertions = 0;
    let mut deletions = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => insertions += 1,
            ChangeTag::Delete => deletions += 1,
            ChangeTag::Equal => {}
        }
    }

    let text = diff
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string();

    FileDiff {
        name: name.to_string(),
        status,
        insertions,
        deletions,
        diff: text,
    }
}
