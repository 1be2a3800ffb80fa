//! Dependency resolution for generated projects

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{GeneratorError, Result};

/// Resolves a generated project's dependencies against its package ecosystem
pub trait DependencyResolver {
    /// Human readable name, used in logs and progress output
    fn describe(&self) -> String;

    /// Resolve dependencies for the project rooted at `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution step fails; the run is aborted.
    fn resolve(&self, dir: &Path) -> Result<()>;
}

/// Runs `go mod tidy`
///
/// Blocks until the tool exits. There is no timeout.
#[derive(Debug, Clone)]
pub struct GoModTidy {
    binary: String,
}

impl GoModTidy {
    /// Use the given `go` binary
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GoModTidy {
    fn default() -> Self {
        Self::new("go")
    }
}

impl DependencyResolver for GoModTidy {
    fn describe(&self) -> String {
        format!("{} mod tidy", self.binary)
    }

    fn resolve(&self, dir: &Path) -> Result<()> {
        let command = self.describe();
        tracing::info!(%command, dir = %dir.display(), "resolving dependencies");

        // Both streams share one pipe so the output keeps the tool's interleaving
        let (mut reader, writer) = io::pipe().map_err(|e| GeneratorError::io(dir, e))?;
        let stderr = writer.try_clone().map_err(|e| GeneratorError::io(dir, e))?;

        // The command owns the parent's write ends and must be dropped before
        // reading, or the pipe never reaches end of file.
        let spawned = Command::new(&self.binary)
            .args(["mod", "tidy"])
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr)
            .spawn();
        let mut child = spawned.map_err(|source| GeneratorError::DependencyToolUnavailable {
            command: command.clone(),
            source,
        })?;

        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|e| GeneratorError::io(dir, e))?;
        let status = child.wait().map_err(|e| GeneratorError::io(dir, e))?;
        let combined = String::from_utf8_lossy(&raw).into_owned();

        if !status.success() {
            return Err(GeneratorError::DependencyResolution {
                command,
                status,
                output: combined,
            });
        }

        if !combined.is_empty() {
            tracing::debug!(output = %combined, "dependency resolver output");
        }
        Ok(())
    }
}

/// Skips dependency resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipResolution;

impl DependencyResolver for SkipResolution {
    fn describe(&self) -> String {
        "skip dependency resolution".to_string()
    }

    fn resolve(&self, dir: &Path) -> Result<()> {
        tracing::info!(dir = %dir.display(), "dependency resolution skipped");
        Ok(())
    }
}
