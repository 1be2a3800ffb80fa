//! Generator configuration
//!
//! Values are merged with the following precedence (highest first):
//! 1. Environment variables (`GOSERVE_GEN_*`)
//! 2. The file passed with `--config`, or `./goserve-gen.toml`
//! 3. Defaults
//!
//! Command line flags are applied on top of the loaded configuration by the
//! CLI.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::assembler::{DEFAULT_FEATURE, DEFAULT_GO_VERSION};
use crate::error::Result;
use crate::materialize::WorkspaceMode;

/// File loaded from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "goserve-gen.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "GOSERVE_GEN_";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Features generated when none are passed on the command line
    pub features: Vec<String>,
    /// Go version written to `go.mod` and the Dockerfile
    pub go_version: String,
    /// `go` binary used for dependency resolution
    pub go_binary: String,
    /// Run `go mod tidy` after generation
    pub resolve_dependencies: bool,
    /// Build in a staging directory and move into place on success
    pub staging: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            features: vec![DEFAULT_FEATURE.to_string()],
            go_version: DEFAULT_GO_VERSION.to_string(),
            go_binary: "go".to_string(),
            resolve_dependencies: true,
            staging: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from `./goserve-gen.toml` and the environment
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeneratorError::Config`] if the file cannot be parsed
    /// or a value has the wrong type.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file and the environment
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeneratorError::Config`] if the file cannot be parsed
    /// or a value has the wrong type.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::figment(path.as_ref()).extract()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the default file
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::load_from`].
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::load, Self::load_from)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Workspace mode selected by `staging`
    #[must_use]
    pub const fn workspace_mode(&self) -> WorkspaceMode {
        if self.staging {
            WorkspaceMode::Staged
        } else {
            WorkspaceMode::InPlace
        }
    }
}
