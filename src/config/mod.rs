//! @acp:module "Configuration"
//! @acp:summary "Generator configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ForgeError;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".forge.config.json";

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_extension")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("generated_extension_backup")
}

fn default_prompt() -> String {
    "Show a popup with today's date".to_string()
}

fn default_true() -> bool {
    true
}

/// @acp:summary "Main ChromeForge configuration structure"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Directory the generated extension is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory a previous extension is moved to before overwriting
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Prompt used when none is supplied on the command line or interactively
    #[serde(default = "default_prompt")]
    pub default_prompt: String,

    /// Back up an existing output directory instead of writing over it
    #[serde(default = "default_true")]
    pub backup: bool,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            backup_dir: default_backup_dir(),
            default_prompt: default_prompt(),
            backup: true,
        }
    }
}

impl ForgeConfig {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load config from a file, or use defaults when it does not exist"
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> crate::Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ForgeError::Config("output_dir must not be empty".into()));
        }
        if self.output_dir == self.backup_dir {
            return Err(ForgeError::Config(format!(
                "backup_dir must differ from output_dir ({})",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}
