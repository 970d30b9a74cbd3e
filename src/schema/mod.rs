//! @acp:module "Schema Validation"
//! @acp:summary "JSON Schema validation of generated manifests against the bundled schema"
//! @acp:domain manifest
//! @acp:layer validation

use std::sync::LazyLock;

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{ForgeError, Result};

/// Bundled Manifest V3 schema source
pub const MANIFEST_SCHEMA: &str = include_str!("../../schemas/manifest.v3.schema.json");

static MANIFEST_VALIDATOR: LazyLock<Validator> = LazyLock::new(|| {
    let schema: Value =
        serde_json::from_str(MANIFEST_SCHEMA).expect("bundled manifest schema is valid JSON");
    jsonschema::validator_for(&schema).expect("bundled manifest schema compiles")
});

/// @acp:summary "Validate a manifest JSON value, collecting every violation"
pub fn validate_manifest_value(instance: &Value) -> Result<()> {
    let errors: Vec<String> = MANIFEST_VALIDATOR
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ForgeError::Schema(errors.join("; ")))
    }
}
