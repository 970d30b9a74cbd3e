#![forbid(unsafe_code)]

//! @acp:module "ChromeForge Library"
//! @acp:summary "Natural-language prompt to Manifest V3 extension synthesis"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # ChromeForge
//!
//! Turns a short description of a browser extension into a coherent set of
//! Manifest V3 files using fixed keyword, pattern, and template tables.
//!
//! ## Pipeline
//!
//! - **Analyze**: normalize the prompt and derive intents, entities,
//!   permissions, components, and features into an [`AnalysisProfile`]
//! - **Manifest**: map the profile to a self-validated [`ManifestDescriptor`]
//! - **Generate**: render the [`ArtifactSet`] through priority-ordered
//!   template chains
//! - **Output**: back up, write, and check the result with [`ExtensionWriter`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrome_forge::{forge, ExtensionWriter};
//!
//! fn main() -> anyhow::Result<()> {
//!     let out = forge("Make an extension that highlights all phone numbers on any website.")?;
//!
//!     let writer = ExtensionWriter::new("generated_extension", "generated_extension_backup");
//!     writer.prepare()?;
//!     writer.write_all(&out.manifest, &out.artifacts)?;
//!
//!     for problem in writer.validate() {
//!         eprintln!("warning: {}", problem);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analyze;
pub mod commands;
pub mod config;
pub mod error;
pub mod forge;
pub mod generate;
pub mod manifest;
pub mod output;
pub mod schema;

// Re-exports
pub use analyze::{analyze, AnalysisProfile, AnalysisTables, PromptAnalyzer};
pub use config::ForgeConfig;
pub use error::{ForgeError, Result};
pub use forge::{forge, Forge, ForgeOutput};
pub use generate::{generate_artifacts, ArtifactKind, ArtifactSet, ArtifactSynthesizer};
pub use manifest::{build_manifest, validate_manifest, ManifestBuilder, ManifestDescriptor};
pub use output::{ExtensionWriter, FileDiff, WriteReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
