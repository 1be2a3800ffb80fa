//! Project assembly
//!
//! Runs every generation step in a fixed order. There is no branching and
//! no recovery: the first failing step ends the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use goserve_gen::assembler::{ProjectAssembler, ProjectOptions};
//! use goserve_gen::resolve::SkipResolution;
//!
//! # fn main() -> goserve_gen::Result<()> {
//! let options = ProjectOptions::new("demo", "example.com/demo")?
//!     .with_features(["sample", "blog"])?;
//! let report = ProjectAssembler::new(options)?.run(&SkipResolution)?;
//! println!("{} files written", report.files.len());
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{GeneratorError, Result};
use crate::keys::generate_key_pair;
use crate::layout::ProjectLayout;
use crate::materialize::{Materializer, Workspace, WorkspaceMode};
use crate::resolve::{DependencyResolver, GoModTidy};
use crate::scaffold::generator::{FeatureContext, FeatureGenerator, GeneratedArtifact};
use crate::scaffold::helpers::{FeatureName, FeatureSpec, ModulePath};
use crate::scaffold::templates::TemplateRegistry;
use crate::templates::{ProjectContext, ProjectTemplate};

/// Feature generated when none is requested
pub const DEFAULT_FEATURE: &str = "sample";

/// Go version written to `go.mod` and the Dockerfile by default
pub const DEFAULT_GO_VERSION: &str = "1.22.5";

/// One step of project assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Create the project directory
    Directory,
    /// `go.mod`
    Manifest,
    /// `.env` and `.test.env`
    Environment,
    /// `.gitignore`
    IgnoreRules,
    /// `utils/`
    Utilities,
    /// `config/`
    Configuration,
    /// `keys/`
    KeyPair,
    /// `api/<feature>/` for every feature
    Features,
    /// `startup/`
    Startup,
    /// `cmd/`
    EntryPoint,
    /// Database seed script
    SeedScript,
    /// Docker files
    Container,
    /// External dependency resolution
    Dependencies,
}

impl Step {
    /// Every step, in execution order
    pub const ALL: [Self; 13] = [
        Self::Directory,
        Self::Manifest,
        Self::Environment,
        Self::IgnoreRules,
        Self::Utilities,
        Self::Configuration,
        Self::KeyPair,
        Self::Features,
        Self::Startup,
        Self::EntryPoint,
        Self::SeedScript,
        Self::Container,
        Self::Dependencies,
    ];

    /// Progress message for the step
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Directory => "Creating project directory...",
            Self::Manifest => "Writing go.mod...",
            Self::Environment => "Writing environment files...",
            Self::IgnoreRules => "Writing ignore rules...",
            Self::Utilities => "Generating utilities...",
            Self::Configuration => "Generating configuration...",
            Self::KeyPair => "Generating RSA key pair...",
            Self::Features => "Generating feature modules...",
            Self::Startup => "Wiring startup...",
            Self::EntryPoint => "Generating entry point...",
            Self::SeedScript => "Writing database seed script...",
            Self::Container => "Writing container definitions...",
            Self::Dependencies => "Resolving dependencies...",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Directory => "directory",
            Self::Manifest => "manifest",
            Self::Environment => "environment",
            Self::IgnoreRules => "ignore_rules",
            Self::Utilities => "utilities",
            Self::Configuration => "configuration",
            Self::KeyPair => "key_pair",
            Self::Features => "features",
            Self::Startup => "startup",
            Self::EntryPoint => "entry_point",
            Self::SeedScript => "seed_script",
            Self::Container => "container",
            Self::Dependencies => "dependencies",
        };
        f.write_str(name)
    }
}

/// Inputs of one generator run
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Directory the project is generated into
    pub target: PathBuf,
    /// Go module path
    pub module_path: ModulePath,
    /// Features to generate, in order
    pub features: Vec<FeatureName>,
    /// Go toolchain version
    pub go_version: String,
    /// Staged or in-place writes
    pub mode: WorkspaceMode,
}

impl ProjectOptions {
    /// Options with the default feature, Go version and staged writes
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyArgument`] if the target or the module
    /// path is empty.
    pub fn new(target: impl Into<PathBuf>, module_path: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if target.as_os_str().is_empty() {
            return Err(GeneratorError::EmptyArgument {
                argument: "project name",
            });
        }

        Ok(Self {
            target,
            module_path: ModulePath::new(module_path)?,
            features: vec![FeatureName::new(DEFAULT_FEATURE)?],
            go_version: DEFAULT_GO_VERSION.to_string(),
            mode: WorkspaceMode::default(),
        })
    }

    /// Replace the feature list
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a name is invalid, or two
    /// names lower-case to the same package.
    pub fn with_features<I, S>(mut self, features: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let features = features
            .into_iter()
            .map(FeatureName::new)
            .collect::<Result<Vec<_>>>()?;

        if features.is_empty() {
            return Err(GeneratorError::EmptyArgument {
                argument: "feature list",
            });
        }

        let mut seen = HashSet::new();
        for feature in &features {
            let package = feature.as_str().to_ascii_lowercase();
            if !seen.insert(package.clone()) {
                return Err(GeneratorError::DuplicateFeature { name: package });
            }
        }

        self.features = features;
        Ok(self)
    }

    /// Set the Go version
    #[must_use]
    pub fn with_go_version(mut self, go_version: impl Into<String>) -> Self {
        self.go_version = go_version.into();
        self
    }

    /// Set the workspace mode
    #[must_use]
    pub const fn with_mode(mut self, mode: WorkspaceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Name used for the project inside the container image
    fn project_base(&self) -> String {
        self.target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| {
                self.module_path
                    .as_str()
                    .rsplit('/')
                    .next()
                    .map(ToString::to_string)
            })
            .unwrap_or_else(|| DEFAULT_FEATURE.to_string())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Where the project now lives
    pub target: PathBuf,
    /// Go module path
    pub module_path: ModulePath,
    /// Naming variants of every generated feature
    pub features: Vec<FeatureSpec>,
    /// Every written file, relative to `target`, in write order
    pub files: Vec<PathBuf>,
}

/// Runs the generation steps for one project
pub struct ProjectAssembler {
    options: ProjectOptions,
    layout: ProjectLayout,
    templates: TemplateRegistry,
}

impl ProjectAssembler {
    /// Create an assembler
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to compile.
    pub fn new(options: ProjectOptions) -> Result<Self> {
        Ok(Self {
            options,
            layout: ProjectLayout::default(),
            templates: TemplateRegistry::new()?,
        })
    }

    /// Run every step
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step.
    pub fn run(&self, resolver: &dyn DependencyResolver) -> Result<GenerationReport> {
        self.run_with(resolver, |_| {})
    }

    /// Run every step, calling `on_step` before each one starts
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step. Steps after it never run.
    pub fn run_with(
        &self,
        resolver: &dyn DependencyResolver,
        mut on_step: impl FnMut(Step),
    ) -> Result<GenerationReport> {
        let options = &self.options;
        tracing::info!(
            target = %options.target.display(),
            module = %options.module_path,
            features = options.features.len(),
            mode = ?options.mode,
            "generating project"
        );

        let workspace = Workspace::prepare(&options.target, options.mode)?;
        let specs: Vec<FeatureSpec> = options.features.iter().map(FeatureSpec::derive).collect();
        let contexts = specs
            .iter()
            .map(|spec| FeatureContext::new(spec, &options.module_path))
            .collect();
        let context = ProjectContext::new(
            &options.module_path,
            &options.go_version,
            &options.project_base(),
            contexts,
            &self.layout,
        );

        let mut run = Run {
            materializer: Materializer::new(workspace.root()),
            project: ProjectTemplate::new(&self.templates, context, &self.layout),
            features: FeatureGenerator::new(&self.templates),
            specs: &specs,
            module: &options.module_path,
            layout: &self.layout,
            resolver,
        };

        for step in Step::ALL {
            on_step(step);
            let span = tracing::info_span!("step", %step);
            let _enter = span.enter();

            if let Err(err) = run.execute(step) {
                tracing::error!(%step, error = %err, "step failed");
                return Err(err);
            }
            tracing::debug!(%step, "step finished");
        }

        let files = run.materializer.written().to_vec();
        let target = workspace.commit()?;
        tracing::info!(target = %target.display(), files = files.len(), "project generated");

        Ok(GenerationReport {
            target,
            module_path: options.module_path.clone(),
            features: specs,
            files,
        })
    }
}

/// State shared by the steps of one run
struct Run<'a> {
    materializer: Materializer,
    project: ProjectTemplate<'a>,
    features: FeatureGenerator<'a>,
    specs: &'a [FeatureSpec],
    module: &'a ModulePath,
    layout: &'a ProjectLayout,
    resolver: &'a dyn DependencyResolver,
}

impl Run<'_> {
    fn execute(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Directory => {
                self.materializer.ensure_dir("")?;
                Ok(())
            }
            Step::Manifest => write_all(&mut self.materializer, &self.project.manifest()?),
            Step::Environment => write_all(&mut self.materializer, &self.project.environment()?),
            Step::IgnoreRules => write_all(&mut self.materializer, &self.project.ignore_rules()?),
            Step::Utilities => write_all(&mut self.materializer, &self.project.utilities()?),
            Step::Configuration => write_all(&mut self.materializer, &self.project.configuration()?),
            Step::KeyPair => generate_key_pair(&mut self.materializer, self.layout),
            Step::Features => {
                for spec in self.specs {
                    let module = self.features.instantiate(spec, self.module)?;
                    for artifact in module.artifacts() {
                        self.materializer.write_artifact(artifact)?;
                    }
                    tracing::info!(feature = %spec.lowercase, route = %spec.route, "generated feature module");
                }
                Ok(())
            }
            Step::Startup => write_all(&mut self.materializer, &self.project.startup()?),
            Step::EntryPoint => write_all(&mut self.materializer, &self.project.entry_point()?),
            Step::SeedScript => write_all(&mut self.materializer, &self.project.seed_script()?),
            Step::Container => write_all(&mut self.materializer, &self.project.container()?),
            Step::Dependencies => self.resolve(),
        }
    }

    fn resolve(&self) -> Result<()> {
        self.resolver.resolve(self.materializer.root())
    }
}

fn write_all(materializer: &mut Materializer, artifacts: &[GeneratedArtifact]) -> Result<()> {
    for artifact in artifacts {
        materializer.write_artifact(artifact)?;
    }
    Ok(())
}

/// Generate a project and resolve its dependencies with `go mod tidy`
///
/// # Errors
///
/// Returns the error of the first failing step.
pub fn generate_project(options: ProjectOptions) -> Result<GenerationReport> {
    ProjectAssembler::new(options)?.run(&GoModTidy::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(Step::ALL.first(), Some(&Step::Directory));
        assert_eq!(Step::ALL.last(), Some(&Step::Dependencies));
        let key_pair = Step::ALL.iter().position(|s| *s == Step::KeyPair).unwrap();
        let features = Step::ALL.iter().position(|s| *s == Step::Features).unwrap();
        let configuration = Step::ALL.iter().position(|s| *s == Step::Configuration).unwrap();
        assert!(configuration < key_pair && key_pair < features);
    }

    #[test]
    fn test_options_reject_empty_arguments() {
        assert!(matches!(
            ProjectOptions::new("", "example.com/demo").unwrap_err(),
            GeneratorError::EmptyArgument { argument: "project name" }
        ));
        assert!(matches!(
            ProjectOptions::new("demo", "").unwrap_err(),
            GeneratorError::EmptyArgument { argument: "module path" }
        ));
    }

    #[test]
    fn test_options_default_feature() {
        let options = ProjectOptions::new("demo", "example.com/demo").unwrap();
        assert_eq!(options.features, vec![FeatureName::new("sample").unwrap()]);
        assert_eq!(options.go_version, DEFAULT_GO_VERSION);
        assert_eq!(options.mode, WorkspaceMode::Staged);
    }

    #[test]
    fn test_options_reject_duplicate_features() {
        let err = ProjectOptions::new("demo", "example.com/demo")
            .unwrap()
            .with_features(["blog", "Blog"])
            .unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateFeature { name } if name == "blog"));
    }

    #[test]
    fn test_options_reject_empty_feature_list() {
        let err = ProjectOptions::new("demo", "example.com/demo")
            .unwrap()
            .with_features(Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::EmptyArgument { .. }));
    }

    #[test]
    fn test_project_base() {
        let options = ProjectOptions::new("work/demo", "example.com/other").unwrap();
        assert_eq!(options.project_base(), "demo");

        let options = ProjectOptions::new("..", "example.com/other").unwrap();
        assert_eq!(options.project_base(), "other");
    }
}
