//! Project template generation
//!
//! Renders the project-level files (manifest, environment, ignore rules,
//! configuration, startup wiring, container definitions) into artifacts. The
//! feature modules are rendered by [`crate::scaffold::FeatureGenerator`].

use serde::Serialize;

use crate::error::Result;
use crate::layout::ProjectLayout;
use crate::scaffold::generator::{FeatureContext, GeneratedArtifact};
use crate::scaffold::helpers::ModulePath;
use crate::scaffold::templates::{names, TemplateRegistry};

pub mod files;
pub use files::*;

/// Template variables for project-level files
#[derive(Debug, Clone, Serialize)]
pub struct ProjectContext {
    /// Go module path
    pub module_path: ModulePath,
    /// Go toolchain version for `go.mod` and the Dockerfile
    pub go_version: String,
    /// Base name of the target directory
    pub project_base: String,
    /// Every feature module, in request order
    pub features: Vec<FeatureContext>,
    /// Import path of the `config` package
    pub config_import: String,
    /// Import path of the `startup` package
    pub startup_import: String,
    /// Key directory
    pub keys_dir: String,
    /// Private key path as seen from the project root
    pub private_key_path: String,
    /// Public key path as seen from the project root
    pub public_key_path: String,
    /// Private key path as seen by the test server
    pub test_private_key_path: String,
    /// Public key path as seen by the test server
    pub test_public_key_path: String,
    /// Environment file read by the test server
    pub test_env_file: String,
    /// Seed script path
    pub seed_script: String,
    /// Seed script file name
    pub seed_script_name: String,
}

impl ProjectContext {
    /// Build the project context
    #[must_use]
    pub fn new(
        module: &ModulePath,
        go_version: &str,
        project_base: &str,
        features: Vec<FeatureContext>,
        layout: &ProjectLayout,
    ) -> Self {
        let private_key_path = layout.private_key_path();
        let public_key_path = layout.public_key_path();

        Self {
            module_path: module.clone(),
            go_version: go_version.to_string(),
            project_base: project_base.to_string(),
            features,
            config_import: module.join("config"),
            startup_import: module.join("startup"),
            keys_dir: layout.keys_dir().to_string(),
            test_private_key_path: ProjectLayout::from_subdirectory(&private_key_path),
            test_public_key_path: ProjectLayout::from_subdirectory(&public_key_path),
            private_key_path,
            public_key_path,
            test_env_file: layout.test_env_file().to_string(),
            seed_script: layout.seed_script_path(),
            seed_script_name: layout.seed_file().to_string(),
        }
    }
}

/// Project template generator
pub struct ProjectTemplate<'a> {
    templates: &'a TemplateRegistry,
    context: ProjectContext,
    layout: &'a ProjectLayout,
}

impl<'a> ProjectTemplate<'a> {
    /// Create a new project template
    #[must_use]
    pub const fn new(
        templates: &'a TemplateRegistry,
        context: ProjectContext,
        layout: &'a ProjectLayout,
    ) -> Self {
        Self {
            templates,
            context,
            layout,
        }
    }

    /// `go.mod`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn manifest(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![self.render(names::GO_MOD, "go.mod", "Go module manifest")?])
    }

    /// `.env` and `.test.env`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn environment(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![
            self.render(names::ENV, self.layout.env_file(), "Server environment")?,
            self.render(
                names::TEST_ENV,
                self.layout.test_env_file(),
                "Test server environment",
            )?,
        ])
    }

    /// `.gitignore`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn ignore_rules(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![self.render(names::GITIGNORE, ".gitignore", "Git ignore rules")?])
    }

    /// `utils/convertor.go`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn utilities(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![self.render(
            names::UTILS_CONVERTOR,
            "utils/convertor.go",
            "Object mapping helpers",
        )?])
    }

    /// `config/env.go`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn configuration(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![self.render(
            names::CONFIG_ENV,
            "config/env.go",
            "Environment loader",
        )?])
    }

    /// Module wiring, index setup and server bootstrap under `startup/`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn startup(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![
            self.render(names::STARTUP_INDEXES, "startup/indexes.go", "Database index setup")?,
            self.render(names::STARTUP_MODULE, "startup/module.go", "Controller wiring")?,
            self.render(names::STARTUP_SERVER, "startup/server.go", "Server bootstrap")?,
            self.render(
                names::STARTUP_TEST_SERVER,
                "startup/testserver.go",
                "Test server bootstrap",
            )?,
        ])
    }

    /// `cmd/main.go`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn entry_point(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![self.render(names::CMD_MAIN, "cmd/main.go", "Process entry point")?])
    }

    /// Database seed script
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn seed_script(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![self.render(
            names::SEED_SCRIPT,
            &self.layout.seed_script_path(),
            "Database seed script",
        )?])
    }

    /// `Dockerfile`, `docker-compose.yml` and `.dockerignore`
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn container(&self) -> Result<Vec<GeneratedArtifact>> {
        Ok(vec![
            self.render(names::DOCKERFILE, "Dockerfile", "Container image")?,
            self.render(names::DOCKER_COMPOSE, "docker-compose.yml", "Container services")?,
            self.render(names::DOCKERIGNORE, ".dockerignore", "Docker ignore rules")?,
        ])
    }

    /// Render a single file from template
    fn render(
        &self,
        template: &str,
        relative_path: &str,
        description: &str,
    ) -> Result<GeneratedArtifact> {
        let content = self.templates.render(template, &self.context)?;
        Ok(GeneratedArtifact::new(relative_path, content, description))
    }
}
