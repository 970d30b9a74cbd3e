//! @acp:module "Output"
//! @acp:summary "Persists a manifest and artifact set to disk and checks the result"
//! @acp:domain output
//! @acp:layer feature
//!
//! The writer receives exactly two values, a [`ManifestDescriptor`] and an
//! [`ArtifactSet`], and owns every filesystem side effect of a run.
//!
//! [`ManifestDescriptor`]: crate::manifest::ManifestDescriptor
//! [`ArtifactSet`]: crate::generate::ArtifactSet

pub mod preview;
pub mod writer;

pub use preview::{DiffStatus, FileDiff};
pub use writer::{ExtensionWriter, WriteReport};
