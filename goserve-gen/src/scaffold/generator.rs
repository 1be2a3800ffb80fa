//! Feature module generator
//!
//! This module turns one [`FeatureSpec`] and the project's [`ModulePath`]
//! into the four files of a vertical slice:
//! - DTO (`api/<feature>/dto/create_<feature>.go`)
//! - Model (`api/<feature>/model/<feature>.go`)
//! - Service (`api/<feature>/service.go`)
//! - Controller (`api/<feature>/controller.go`)
//!
//! All four render from a single [`FeatureContext`], so a type, collection,
//! import path or method name is spelled identically in every file.

use super::helpers::{FeatureSpec, ModulePath};
use super::templates::{names, TemplateRegistry};
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// One of the four files of a feature module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Response DTO with validation messages
    Dto,
    /// Persisted entity with indexes
    Model,
    /// Query service
    Service,
    /// HTTP controller
    Controller,
}

impl ArtifactKind {
    /// All kinds, in generation order
    pub const ALL: [Self; 4] = [Self::Dto, Self::Model, Self::Service, Self::Controller];

    /// Registry name of the template for this kind
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Dto => names::DTO,
            Self::Model => names::MODEL,
            Self::Service => names::SERVICE,
            Self::Controller => names::CONTROLLER,
        }
    }

    /// Path of the generated file relative to the project root
    #[must_use]
    pub fn relative_path(self, spec: &FeatureSpec) -> PathBuf {
        let feature_dir = PathBuf::from("api").join(&spec.lowercase);
        match self {
            Self::Dto => feature_dir
                .join("dto")
                .join(format!("create_{}.go", spec.lowercase)),
            Self::Model => feature_dir
                .join("model")
                .join(format!("{}.go", spec.lowercase)),
            Self::Service => feature_dir.join("service.go"),
            Self::Controller => feature_dir.join("controller.go"),
        }
    }

    fn describe(self, spec: &FeatureSpec) -> String {
        match self {
            Self::Dto => format!("Response DTO for {}", spec.capitalized),
            Self::Model => format!("Mongo model for {} collection", spec.collection),
            Self::Service => format!("Service for {}", spec.capitalized),
            Self::Controller => format!("Controller mounted at {}", spec.route),
        }
    }
}

/// Template variables shared by every file of one feature module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureContext {
    /// Go package name of the feature
    pub package: String,
    /// Entity type name
    pub type_name: String,
    /// Response DTO type name
    pub dto_type: String,
    /// Mongo collection name
    pub collection: String,
    /// Controller base path
    pub route: String,
    /// Import path of the feature package
    pub import_path: String,
    /// Import path of the project's `utils` package
    pub utils_import: String,
    /// Service lookup method, shared by service and controller
    pub service_method: String,
    /// Controller handler for the lookup route
    pub handler: String,
    /// Service field holding the query builder
    pub query_builder: String,
    /// Service field holding the DTO cache
    pub cache: String,
}

impl FeatureContext {
    /// Build the context for one feature
    #[must_use]
    pub fn new(spec: &FeatureSpec, module: &ModulePath) -> Self {
        let type_name = spec.capitalized.clone();
        Self {
            package: spec.lowercase.clone(),
            dto_type: format!("Info{type_name}"),
            collection: spec.collection.clone(),
            route: spec.route.clone(),
            import_path: spec.import_path(module),
            utils_import: module.join("utils"),
            service_method: format!("Find{type_name}"),
            handler: format!("get{type_name}Handler"),
            query_builder: format!("{}QueryBuilder", spec.lowercase),
            cache: format!("info{type_name}Cache"),
            type_name,
        }
    }
}

/// A rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Relative path from project root
    pub relative_path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

impl GeneratedArtifact {
    /// Create an artifact
    pub fn new(
        relative_path: impl Into<PathBuf>,
        content: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
            description: description.into(),
        }
    }
}

/// The four files generated for one feature
#[derive(Debug, Clone)]
pub struct FeatureModule {
    /// Naming variants every file was rendered from
    pub spec: FeatureSpec,
    /// Context every file was rendered with
    pub context: FeatureContext,
    /// Response DTO
    pub dto: GeneratedArtifact,
    /// Persisted entity
    pub model: GeneratedArtifact,
    /// Query service
    pub service: GeneratedArtifact,
    /// HTTP controller
    pub controller: GeneratedArtifact,
}

impl FeatureModule {
    /// Artifacts in write order
    #[must_use]
    pub fn artifacts(&self) -> [&GeneratedArtifact; 4] {
        [&self.dto, &self.model, &self.service, &self.controller]
    }

    /// Consume the module into its artifacts
    #[must_use]
    pub fn into_artifacts(self) -> [GeneratedArtifact; 4] {
        [self.dto, self.model, self.service, self.controller]
    }
}

/// Renders feature modules
pub struct FeatureGenerator<'a> {
    templates: &'a TemplateRegistry,
}

impl<'a> FeatureGenerator<'a> {
    /// Create a generator over a compiled registry
    #[must_use]
    pub const fn new(templates: &'a TemplateRegistry) -> Self {
        Self { templates }
    }

    /// Render the DTO, model, service and controller for one feature
    ///
    /// # Errors
    ///
    /// Only fails if a built-in template cannot be rendered, which indicates
    /// a bug in the template set rather than bad input.
    pub fn instantiate(&self, spec: &FeatureSpec, module: &ModulePath) -> Result<FeatureModule> {
        let context = FeatureContext::new(spec, module);
        let render = |kind: ArtifactKind| -> Result<GeneratedArtifact> {
            let content = self.templates.render(kind.template(), &context)?;
            Ok(GeneratedArtifact::new(
                kind.relative_path(spec),
                content,
                kind.describe(spec),
            ))
        };

        let dto = render(ArtifactKind::Dto)?;
        let model = render(ArtifactKind::Model)?;
        let service = render(ArtifactKind::Service)?;
        let controller = render(ArtifactKind::Controller)?;

        tracing::debug!(feature = %spec.lowercase, "rendered feature module");

        Ok(FeatureModule {
            spec: spec.clone(),
            context,
            dto,
            model,
            service,
            controller,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::helpers::FeatureName;

    fn sample_module(name: &str) -> FeatureModule {
        let registry = TemplateRegistry::new().unwrap();
        let spec = FeatureSpec::derive(&FeatureName::new(name).unwrap());
        let module = ModulePath::new("example.com/demo").unwrap();
        FeatureGenerator::new(&registry)
            .instantiate(&spec, &module)
            .unwrap()
    }

    #[test]
    fn test_relative_paths() {
        let module = sample_module("sample");
        assert_eq!(
            module.dto.relative_path,
            PathBuf::from("api/sample/dto/create_sample.go")
        );
        assert_eq!(
            module.model.relative_path,
            PathBuf::from("api/sample/model/sample.go")
        );
        assert_eq!(module.service.relative_path, PathBuf::from("api/sample/service.go"));
        assert_eq!(
            module.controller.relative_path,
            PathBuf::from("api/sample/controller.go")
        );
    }

    #[test]
    fn test_dto_declares_info_type() {
        let module = sample_module("sample");
        let dto = &module.dto.content;
        assert!(dto.starts_with("package dto\n"));
        assert!(dto.contains("type InfoSample struct {"));
        assert!(dto.contains(r#"json:"_id" binding:"required""#));
        assert!(dto.contains(r#"json:"field" binding:"required""#));
        assert!(dto.contains(r#"json:"createdAt" binding:"required""#));
        assert!(dto.contains("func EmptyInfoSample() *InfoSample {"));
        assert!(dto.contains("return &InfoSample{}"));
    }

    #[test]
    fn test_dto_translates_validation_tags() {
        let module = sample_module("sample");
        let dto = &module.dto.content;
        assert!(dto.contains(r#"case "required":"#));
        assert!(dto.contains(r#"case "min":"#));
        assert!(dto.contains(r#"case "max":"#));
        assert!(dto.contains("default:"));
        assert!(dto.contains("%s is invalid"));
    }

    #[test]
    fn test_model_collection_and_index() {
        let module = sample_module("sample");
        let model = &module.model.content;
        assert!(model.contains(r#"const CollectionName = "samples""#));
        assert!(model.contains("type Sample struct {"));
        assert!(model.contains(r#"{Key: "_id", Value: 1},"#));
        assert!(model.contains(r#"{Key: "status", Value: 1},"#));
        assert!(model.contains("mongo.NewQueryBuilder[Sample](db, CollectionName)"));
    }

    #[test]
    fn test_model_constructor_defaults() {
        let module = sample_module("sample");
        let model = &module.model.content;
        assert!(model.contains("func NewSample(field string) (*Sample, error) {"));
        assert!(model.contains("Status:    true,"));
        assert!(model.contains("CreatedAt: now,"));
        assert!(model.contains("UpdatedAt: now,"));
        assert_eq!(model.matches("time.Now()").count(), 1);
    }

    #[test]
    fn test_service_wires_query_builder_and_cache() {
        let module = sample_module("sample");
        let service = &module.service.content;
        assert!(service.starts_with("package sample\n"));
        assert!(service.contains(r#""example.com/demo/api/sample/dto""#));
        assert!(service.contains(r#""example.com/demo/api/sample/model""#));
        assert!(service.contains("FindSample(id primitive.ObjectID) (*model.Sample, error)"));
        assert!(service.contains("mongo.NewQueryBuilder[model.Sample](db, model.CollectionName)"));
        assert!(service.contains("infoSampleCache: redis.NewCache[dto.InfoSample](store)"));
    }

    #[test]
    fn test_controller_routes() {
        let module = sample_module("sample");
        let controller = &module.controller.content;
        assert!(controller.contains(r#"network.NewBaseController("/sample", authMFunc, authorizeMFunc)"#));
        assert!(controller.contains(r#"group.GET("/ping", c.getPingHandler)"#));
        assert!(controller.contains(r#"group.GET("/id/:id", c.getSampleHandler)"#));
        assert!(controller.contains(r#"SuccessMsgResponse("pong!")"#));
        assert!(controller.contains("BadRequestError(err.Error(), err)"));
        assert!(controller.contains(r#"NotFoundError("sample not found", err)"#));
        assert!(controller.contains("doc, err := c.service.FindSample(mongoId.ID)"));
        assert!(controller.contains("utils.MapTo[dto.InfoSample](doc)"));
        assert!(controller.contains(r#"InternalServerError("something went wrong", err)"#));
        assert!(controller.contains(r#""example.com/demo/utils""#));
    }

    #[test]
    fn test_controller_locals_do_not_shadow_imports() {
        let module = sample_module("dto");
        let controller = &module.controller.content;
        assert!(controller.starts_with("package dto\n"));
        assert!(!controller.contains("dto, err :="));
        assert!(controller.contains("utils.MapTo[dto.InfoDto](doc)"));
        assert!(controller.contains(r#"NotFoundError("dto not found", err)"#));
    }

    #[test]
    fn test_cross_file_names_agree() {
        let module = sample_module("Blog");
        let ctx = &module.context;
        assert_eq!(ctx.type_name, "Blog");

        // The service method is declared in the service and called by the controller
        assert!(module.service.content.contains(&format!("func (s *service) {}(", ctx.service_method)));
        assert!(module.controller.content.contains(&format!("c.service.{}(", ctx.service_method)));

        // The DTO type declared by the DTO is the one the service caches and the controller maps to
        assert!(module.dto.content.contains(&format!("type {} struct", ctx.dto_type)));
        assert!(module.service.content.contains(&format!("dto.{}", ctx.dto_type)));
        assert!(module.controller.content.contains(&format!("dto.{}", ctx.dto_type)));

        // The entity declared by the model is the one the service returns
        assert!(module.model.content.contains(&format!("type {} struct", ctx.type_name)));
        assert!(module.service.content.contains(&format!("*model.{}", ctx.type_name)));

        // Both packages importing feature subpackages use the same import path
        assert!(module.service.content.contains(&format!("\"{}/dto\"", ctx.import_path)));
        assert!(module.controller.content.contains(&format!("\"{}/dto\"", ctx.import_path)));

        for artifact in module.artifacts() {
            assert!(!artifact.content.contains("{{"), "unrendered placeholder in {:?}", artifact.relative_path);
        }
    }

    #[test]
    fn test_instantiate_is_deterministic() {
        let first = sample_module("sample");
        let second = sample_module("sample");
        assert_eq!(first.into_artifacts(), second.into_artifacts());
    }
}
