//! Filesystem writes for generated projects
//!
//! [`Materializer`] is the only component that touches the disk. It never
//! checks whether a file already exists: every write overwrites, and any
//! failure aborts the run without cleaning up what was already written.
//!
//! [`Workspace`] decides where the materializer writes. In
//! [`WorkspaceMode::Staged`] the tree is built in a temporary directory under
//! the target's nearest existing ancestor. The target and any missing parents
//! are only created once every step has succeeded. In
//! [`WorkspaceMode::InPlace`] files land in the target as they are produced.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{GeneratorError, Result};
use crate::scaffold::generator::GeneratedArtifact;

/// Prefix of staging directories created next to the target
const STAGING_PREFIX: &str = ".goserve-gen-";

/// Writes files under a root directory
#[derive(Debug)]
pub struct Materializer {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl Materializer {
    /// Create a materializer writing under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    /// Root every relative path is resolved against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths written so far, in write order
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Create a directory and all of its parents
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if any directory in the chain cannot be
    /// created.
    pub fn ensure_dir(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.root.join(relative);
        fs::create_dir_all(&path).map_err(|e| GeneratorError::io(&path, e))?;
        Ok(path)
    }

    /// Write a file, creating its parent directories and replacing any
    /// existing content
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if a parent directory cannot be created
    /// or the file cannot be written.
    pub fn write_file(&mut self, relative: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<()> {
        let relative = relative.as_ref();
        if let Some(parent) = relative.parent() {
            self.ensure_dir(parent)?;
        }

        let path = self.root.join(relative);
        fs::write(&path, content).map_err(|e| GeneratorError::io(&path, e))?;

        tracing::debug!(path = %relative.display(), "wrote file");
        self.written.push(relative.to_path_buf());
        Ok(())
    }

    /// Write a generated artifact
    ///
    /// # Errors
    ///
    /// See [`Materializer::write_file`].
    pub fn write_artifact(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        self.write_file(&artifact.relative_path, &artifact.content)
    }
}

/// Where generated files are written before they reach the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkspaceMode {
    /// Build in a temporary directory and move into place on success
    #[default]
    Staged,
    /// Write straight into the target; a failure leaves a partial tree
    InPlace,
}

/// Destination of one generator run
#[derive(Debug)]
pub struct Workspace {
    target: PathBuf,
    staging: Option<TempDir>,
}

impl Workspace {
    /// Prepare a workspace for `target`
    ///
    /// In staged mode this creates a temporary directory in the target's
    /// nearest existing ancestor, so the final move is a rename on the same
    /// filesystem. Nothing else is created until [`Workspace::commit`].
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if the staging directory cannot be
    /// created.
    pub fn prepare(target: impl Into<PathBuf>, mode: WorkspaceMode) -> Result<Self> {
        let target = target.into();
        let staging = match mode {
            WorkspaceMode::InPlace => None,
            WorkspaceMode::Staged => {
                let parent = staging_parent(&target);
                let dir = tempfile::Builder::new()
                    .prefix(STAGING_PREFIX)
                    .tempdir_in(&parent)
                    .map_err(|e| GeneratorError::io(&parent, e))?;
                tracing::debug!(staging = %dir.path().display(), "created staging directory");
                Some(dir)
            }
        };

        Ok(Self { target, staging })
    }

    /// Final location of the project
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Directory generated files should be written to
    #[must_use]
    pub fn root(&self) -> &Path {
        self.staging.as_ref().map_or(self.target.as_path(), TempDir::path)
    }

    /// Whether files are being staged
    #[must_use]
    pub const fn is_staged(&self) -> bool {
        self.staging.is_some()
    }

    /// Move the staged tree into the target
    ///
    /// A missing target is replaced by a single rename, after creating its
    /// missing parent directories. An existing target has
    /// every staged file moved over it, replacing files of the same name and
    /// leaving unrelated files alone. In-place workspaces have nothing to do.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Io`] if the target exists but is not a
    /// directory, or if a rename fails.
    pub fn commit(self) -> Result<PathBuf> {
        let Some(staging) = self.staging else {
            return Ok(self.target);
        };

        if !self.target.exists() {
            if let Some(parent) = non_empty_parent(&self.target) {
                fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
            }
            fs::rename(staging.path(), &self.target)
                .map_err(|e| GeneratorError::io(&self.target, e))?;
            tracing::info!(target = %self.target.display(), "moved staged project into place");
            return Ok(self.target);
        }

        if !self.target.is_dir() {
            return Err(GeneratorError::io(
                &self.target,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "target exists and is not a directory",
                ),
            ));
        }

        for entry in WalkDir::new(staging.path()).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or_else(|| staging.path()).to_path_buf();
                GeneratorError::io(path, e.into())
            })?;
            let relative = entry
                .path()
                .strip_prefix(staging.path())
                .unwrap_or_else(|_| entry.path());
            let destination = self.target.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)
                    .map_err(|e| GeneratorError::io(&destination, e))?;
            } else {
                fs::rename(entry.path(), &destination)
                    .map_err(|e| GeneratorError::io(&destination, e))?;
            }
        }

        tracing::info!(target = %self.target.display(), "overwrote existing project with staged files");
        Ok(self.target)
    }
}

/// Parent of `path`, if it names one
fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}

/// Nearest existing directory above the target, where staging happens
fn staging_parent(target: &Path) -> PathBuf {
    non_empty_parent(target)
        .and_then(|parent| {
            parent
                .ancestors()
                .filter(|ancestor| !ancestor.as_os_str().is_empty())
                .find(|ancestor| ancestor.is_dir())
        })
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
