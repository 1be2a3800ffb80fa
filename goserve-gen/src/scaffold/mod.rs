//! Feature module generator
//!
//! Derives the naming variants of a feature and renders its four Go files
//! (request DTO, persistence model, service, controller) from the built-in
//! templates.

pub mod generator;
pub mod helpers;
pub mod templates;

pub use generator::{ArtifactKind, FeatureContext, FeatureGenerator, FeatureModule, GeneratedArtifact};
pub use helpers::{capitalize_first, FeatureName, FeatureSpec, ModulePath};
pub use templates::TemplateRegistry;
