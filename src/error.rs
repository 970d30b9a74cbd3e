//! @acp:module "Errors"
//! @acp:summary "Error types for the analysis and synthesis pipeline"
//! @acp:domain cli
//! @acp:layer error

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ForgeError>;

/// @acp:summary "All failures the library can report"
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    TemplateCompile(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    TemplateRender(#[from] handlebars::RenderError),

    #[error("Invalid analysis tables: {0}")]
    Tables(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Manifest validation failed: {}", .0.join("; "))]
    Manifest(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
