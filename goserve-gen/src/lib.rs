//! goserve-gen: project generator for goserve backends
//!
//! Writes a complete Go service into a target directory: feature modules,
//! module manifest, environment files, configuration and startup wiring,
//! an RSA key pair for token signing, a database seed script and container
//! definitions. Dependencies are then resolved with `go mod tidy`.
//!
//! # Example
//!
//! ```rust,no_run
//! use goserve_gen::{generate_project, ProjectOptions};
//!
//! # fn main() -> goserve_gen::Result<()> {
//! let options = ProjectOptions::new("demo", "example.com/demo")?;
//! let report = generate_project(options)?;
//! println!("generated {} files in {}", report.files.len(), report.target.display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod keys;
pub mod layout;
pub mod materialize;
pub mod observability;
pub mod resolve;
pub mod scaffold;
pub mod templates;

pub use assembler::{generate_project, GenerationReport, ProjectAssembler, ProjectOptions, Step};
pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
pub use layout::ProjectLayout;
pub use materialize::WorkspaceMode;
pub use resolve::{DependencyResolver, GoModTidy, SkipResolution};
pub use scaffold::{FeatureGenerator, FeatureName, FeatureSpec, ModulePath};
