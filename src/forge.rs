//! @acp:module "Forge Pipeline"
//! @acp:summary "One-pass prompt to manifest and artifacts"
//! @acp:domain generation
//! @acp:layer service

use serde::Serialize;

use crate::analyze::{AnalysisProfile, AnalysisTables, PromptAnalyzer};
use crate::error::{ForgeError, Result};
use crate::generate::{ArtifactSet, ArtifactSynthesizer};
use crate::manifest::{validate_manifest, ManifestBuilder, ManifestDescriptor};

/// @acp:summary "Everything a run produces, for the writer to persist"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForgeOutput {
    pub profile: AnalysisProfile,
    pub manifest: ManifestDescriptor,
    pub artifacts: ArtifactSet,
    /// Manifest self-validation failures; non-empty output must not be written
    pub manifest_problems: Vec<String>,
}

impl ForgeOutput {
    pub fn is_writable(&self) -> bool {
        self.manifest_problems.is_empty()
    }
}

/// Analysis, manifest synthesis with self-validation, then artifact synthesis
#[derive(Debug, Clone, Copy)]
pub struct Forge<'t> {
    analyzer: PromptAnalyzer<'t>,
}

impl Default for Forge<'static> {
    fn default() -> Self {
        Self {
            analyzer: PromptAnalyzer::default(),
        }
    }
}

impl<'t> Forge<'t> {
    pub fn new(tables: &'t AnalysisTables) -> Self {
        Self {
            analyzer: PromptAnalyzer::new(tables),
        }
    }

    /// Run the pipeline. An invalid prompt only sets the profile's verdict.
    /// A manifest failing self-validation is recorded in `manifest_problems`
    /// and blocks the write stage, not analysis.
    pub fn run(&self, raw: &str) -> Result<ForgeOutput> {
        let profile = self.analyzer.analyze(raw);
        let manifest = ManifestBuilder::new(&profile).build();
        assemble(profile, manifest)
    }
}

fn assemble(profile: AnalysisProfile, manifest: ManifestDescriptor) -> Result<ForgeOutput> {
    let manifest_problems = match validate_manifest(&manifest) {
        Ok(()) => Vec::new(),
        Err(ForgeError::Manifest(problems)) => problems,
        Err(e) => return Err(e),
    };
    for problem in &manifest_problems {
        tracing::warn!("Manifest self-validation: {}", problem);
    }

    let artifacts = ArtifactSynthesizer::new(&profile).synthesize()?;
    tracing::debug!(
        files = artifacts.len(),
        fingerprint = %artifacts.fingerprint(),
        "Synthesized artifacts"
    );

    Ok(ForgeOutput {
        profile,
        manifest,
        artifacts,
        manifest_problems,
    })
}

/// Run the pipeline against the built-in tables
pub fn forge(raw: &str) -> Result<ForgeOutput> {
    Forge::default().run(raw)
}
