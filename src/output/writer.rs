//! @acp:module "Extension Writer"
//! @acp:summary "Backup-on-overwrite, file output, and referential validation"
//! @acp:domain output
//! @acp:layer io

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::error::Result;
use crate::generate::layout::MANIFEST_FILE;
use crate::generate::ArtifactSet;
use crate::manifest::{ManifestDescriptor, MANIFEST_VERSION};

/// @acp:summary "What a write produced"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub output_dir: PathBuf,
    /// File names in write order; manifest.json first
    pub written: Vec<String>,
}

/// @acp:summary "Writes one generated extension into a directory"
#[derive(Debug, Clone)]
pub struct ExtensionWriter {
    output_dir: PathBuf,
    backup_dir: PathBuf,
}

impl ExtensionWriter {
    pub fn new(output_dir: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            backup_dir: backup_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Move any existing output to the backup dir, then create a fresh output dir.
    /// Returns the backup path when something was moved.
    pub fn prepare(&self) -> Result<Option<PathBuf>> {
        let mut backup = None;

        if self.output_dir.exists() {
            if self.backup_dir.exists() {
                fs::remove_dir_all(&self.backup_dir)?;
            }
            if let Some(parent) = self.backup_dir.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::rename(&self.output_dir, &self.backup_dir)?;
            tracing::info!(
                from = %self.output_dir.display(),
                to = %self.backup_dir.display(),
                "Backed up existing extension"
            );
            backup = Some(self.backup_dir.clone());
        }

        fs::create_dir_all(&self.output_dir)?;
        Ok(backup)
    }

    /// Clear the output dir without keeping a backup
    pub fn prepare_clean(&self) -> Result<()> {
        if self.output_dir.exists() {
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Write a single file relative to the output dir
    pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
        fs::write(self.output_dir.join(name), content)?;
        tracing::debug!(file = name, bytes = content.len(), "Wrote file");
        Ok(())
    }

    /// @acp:summary "Write manifest.json, then every artifact in name order"
    pub fn write_all(
        &self,
        manifest: &ManifestDescriptor,
        artifacts: &ArtifactSet,
    ) -> Result<WriteReport> {
        self.write_all_with(manifest, artifacts, |_| {})
    }

    /// Same as [`Self::write_all`], calling `on_file` after each file lands
    pub fn write_all_with<F>(
        &self,
        manifest: &ManifestDescriptor,
        artifacts: &ArtifactSet,
        mut on_file: F,
    ) -> Result<WriteReport>
    where
        F: FnMut(&str),
    {
        fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(artifacts.len() + 1);

        self.write_file(MANIFEST_FILE, &manifest.to_json()?)?;
        on_file(MANIFEST_FILE);
        written.push(MANIFEST_FILE.to_string());

        for (name, content) in artifacts.iter() {
            self.write_file(name, content)?;
            on_file(name);
            written.push(name.to_string());
        }

        Ok(WriteReport {
            output_dir: self.output_dir.clone(),
            written,
        })
    }

    /// Files currently present under the output dir, relative and sorted
    pub fn existing_files(&self) -> BTreeSet<String> {
        if !self.output_dir.is_dir() {
            return BTreeSet::new();
        }

        WalkDir::new(&self.output_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.output_dir)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect()
    }

    /// @acp:summary "Check the written extension; problems are warnings, never errors"
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let manifest_path = self.output_dir.join(MANIFEST_FILE);

        let content = match fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(_) => {
                problems.push(format!("{} not found", MANIFEST_FILE));
                return problems;
            }
        };

        let manifest: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                problems.push(format!("Invalid JSON in {}: {}", MANIFEST_FILE, e));
                return problems;
            }
        };

        if manifest.get("manifest_version").and_then(Value::as_u64) != Some(MANIFEST_VERSION as u64)
        {
            problems.push(format!("manifest_version must be {}", MANIFEST_VERSION));
        }

        let present = self.existing_files();
        for (label, file) in referenced_files(&manifest) {
            if !present.contains(&file) {
                problems.push(format!("Referenced {} not found: {}", label, file));
            }
        }

        for problem in &problems {
            tracing::warn!(dir = %self.output_dir.display(), "{}", problem);
        }

        problems
    }
}

/// (label, file) for every file a manifest value points at
fn referenced_files(manifest: &Value) -> Vec<(&'static str, String)> {
    let mut refs = Vec::new();
    let text = |v: &Value| v.as_str().map(str::to_string);

    if let Some(popup) = manifest.pointer("/action/default_popup").and_then(text) {
        refs.push(("popup file", popup));
    }
    if let Some(worker) = manifest.pointer("/background/service_worker").and_then(text) {
        refs.push(("background file", worker));
    }
    for script in manifest
        .get("content_scripts")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        for js in script.get("js").and_then(Value::as_array).into_iter().flatten() {
            if let Some(js) = text(js) {
                refs.push(("content script", js));
            }
        }
        for css in script.get("css").and_then(Value::as_array).into_iter().flatten() {
            if let Some(css) = text(css) {
                refs.push(("content stylesheet", css));
            }
        }
    }
    for resource in manifest
        .pointer("/declarative_net_request/rule_resources")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        if let Some(path) = resource.get("path").and_then(text) {
            refs.push(("rule file", path));
        }
    }

    refs
}
