//! Handlebars registry for all generated files
//!
//! Templates are registered once by name. Strict mode is on, so a template
//! referencing a variable its context does not provide fails to render
//! instead of silently emitting an empty string.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;
use crate::templates::files;

/// Feature DTO (`api/<feature>/dto/create_<feature>.go`)
pub const DTO_TEMPLATE: &str = r#"package dto

import (
	"fmt"
	"time"

	"github.com/go-playground/validator/v10"
	"go.mongodb.org/mongo-driver/bson/primitive"
)

type {{dto_type}} struct {
	ID        primitive.ObjectID `json:"_id" binding:"required"`
	Field     string             `json:"field" binding:"required"`
	CreatedAt time.Time          `json:"createdAt" binding:"required"`
}

func Empty{{dto_type}}() *{{dto_type}} {
	return &{{dto_type}}{}
}

func (d *{{dto_type}}) GetValue() *{{dto_type}} {
	return d
}

func (d *{{dto_type}}) ValidateErrors(errs validator.ValidationErrors) ([]string, error) {
	var msgs []string
	for _, err := range errs {
		switch err.Tag() {
		case "required":
			msgs = append(msgs, fmt.Sprintf("%s is required", err.Field()))
		case "min":
			msgs = append(msgs, fmt.Sprintf("%s must be min %s", err.Field(), err.Param()))
		case "max":
			msgs = append(msgs, fmt.Sprintf("%s must be max %s", err.Field(), err.Param()))
		default:
			msgs = append(msgs, fmt.Sprintf("%s is invalid", err.Field()))
		}
	}
	return msgs, nil
}
"#;

/// Feature model (`api/<feature>/model/<feature>.go`)
pub const MODEL_TEMPLATE: &str = r#"package model

import (
	"context"
	"time"

	"github.com/go-playground/validator/v10"
	"github.com/unusualcodeorg/goserve/arch/mongo"
	"go.mongodb.org/mongo-driver/bson"
	"go.mongodb.org/mongo-driver/bson/primitive"
	mongod "go.mongodb.org/mongo-driver/mongo"
)

const CollectionName = "{{collection}}"

type {{type_name}} struct {
	ID        primitive.ObjectID `bson:"_id,omitempty" validate:"-"`
	Field     string             `bson:"field" validate:"required"`
	Status    bool               `bson:"status" validate:"required"`
	CreatedAt time.Time          `bson:"createdAt" validate:"required"`
	UpdatedAt time.Time          `bson:"updatedAt" validate:"required"`
}

func New{{type_name}}(field string) (*{{type_name}}, error) {
	now := time.Now()
	doc := {{type_name}}{
		Field:     field,
		Status:    true,
		CreatedAt: now,
		UpdatedAt: now,
	}
	if err := doc.Validate(); err != nil {
		return nil, err
	}
	return &doc, nil
}

func (doc *{{type_name}}) GetValue() *{{type_name}} {
	return doc
}

func (doc *{{type_name}}) Validate() error {
	validate := validator.New()
	return validate.Struct(doc)
}

func (*{{type_name}}) EnsureIndexes(db mongo.Database) {
	indexes := []mongod.IndexModel{
		{
			Keys: bson.D{
				{Key: "_id", Value: 1},
				{Key: "status", Value: 1},
			},
		},
	}

	mongo.NewQueryBuilder[{{type_name}}](db, CollectionName).Query(context.Background()).CreateIndexes(indexes)
}
"#;

/// Feature service (`api/<feature>/service.go`)
pub const SERVICE_TEMPLATE: &str = r#"package {{package}}

import (
	"{{import_path}}/dto"
	"{{import_path}}/model"
	"github.com/unusualcodeorg/goserve/arch/mongo"
	"github.com/unusualcodeorg/goserve/arch/network"
	"github.com/unusualcodeorg/goserve/arch/redis"
	"go.mongodb.org/mongo-driver/bson"
	"go.mongodb.org/mongo-driver/bson/primitive"
)

type Service interface {
	{{service_method}}(id primitive.ObjectID) (*model.{{type_name}}, error)
}

type service struct {
	network.BaseService
	{{query_builder}} mongo.QueryBuilder[model.{{type_name}}]
	{{cache}} redis.Cache[dto.{{dto_type}}]
}

func NewService(db mongo.Database, store redis.Store) Service {
	return &service{
		BaseService: network.NewBaseService(),
		{{query_builder}}: mongo.NewQueryBuilder[model.{{type_name}}](db, model.CollectionName),
		{{cache}}: redis.NewCache[dto.{{dto_type}}](store),
	}
}

func (s *service) {{service_method}}(id primitive.ObjectID) (*model.{{type_name}}, error) {
	filter := bson.M{"_id": id}

	doc, err := s.{{query_builder}}.SingleQuery().FindOne(filter, nil)
	if err != nil {
		return nil, err
	}

	return doc, nil
}
"#;

/// Feature controller (`api/<feature>/controller.go`)
pub const CONTROLLER_TEMPLATE: &str = r#"package {{package}}

import (
	"github.com/gin-gonic/gin"
	"{{import_path}}/dto"
	coredto "github.com/unusualcodeorg/goserve/arch/dto"
	"github.com/unusualcodeorg/goserve/arch/network"
	"{{utils_import}}"
)

type controller struct {
	network.BaseController
	service Service
}

func NewController(
	authMFunc network.AuthenticationProvider,
	authorizeMFunc network.AuthorizationProvider,
	service Service,
) network.Controller {
	return &controller{
		BaseController: network.NewBaseController("{{route}}", authMFunc, authorizeMFunc),
		service:        service,
	}
}

func (c *controller) MountRoutes(group *gin.RouterGroup) {
	group.GET("/ping", c.getPingHandler)
	group.GET("/id/:id", c.{{handler}})
}

func (c *controller) getPingHandler(ctx *gin.Context) {
	c.Send(ctx).SuccessMsgResponse("pong!")
}

func (c *controller) {{handler}}(ctx *gin.Context) {
	mongoId, err := network.ReqParams(ctx, coredto.EmptyMongoId())
	if err != nil {
		c.Send(ctx).BadRequestError(err.Error(), err)
		return
	}

	doc, err := c.service.{{service_method}}(mongoId.ID)
	if err != nil {
		c.Send(ctx).NotFoundError("{{package}} not found", err)
		return
	}

	data, err := utils.MapTo[dto.{{dto_type}}](doc)
	if err != nil {
		c.Send(ctx).InternalServerError("something went wrong", err)
		return
	}

	c.Send(ctx).SuccessDataResponse("success", data)
}
"#;

/// Names under which every template is registered
pub mod names {
    /// Feature DTO
    pub const DTO: &str = "dto";
    /// Feature model
    pub const MODEL: &str = "model";
    /// Feature service
    pub const SERVICE: &str = "service";
    /// Feature controller
    pub const CONTROLLER: &str = "controller";
    /// `go.mod`
    pub const GO_MOD: &str = "go_mod";
    /// `.env`
    pub const ENV: &str = "env";
    /// `.test.env`
    pub const TEST_ENV: &str = "test_env";
    /// `.gitignore`
    pub const GITIGNORE: &str = "gitignore";
    /// `utils/convertor.go`
    pub const UTILS_CONVERTOR: &str = "utils_convertor";
    /// `config/env.go`
    pub const CONFIG_ENV: &str = "config_env";
    /// `startup/indexes.go`
    pub const STARTUP_INDEXES: &str = "startup_indexes";
    /// `startup/module.go`
    pub const STARTUP_MODULE: &str = "startup_module";
    /// `startup/server.go`
    pub const STARTUP_SERVER: &str = "startup_server";
    /// `startup/testserver.go`
    pub const STARTUP_TEST_SERVER: &str = "startup_test_server";
    /// `cmd/main.go`
    pub const CMD_MAIN: &str = "cmd_main";
    /// Database seed script
    pub const SEED_SCRIPT: &str = "seed_script";
    /// `Dockerfile`
    pub const DOCKERFILE: &str = "dockerfile";
    /// `docker-compose.yml`
    pub const DOCKER_COMPOSE: &str = "docker_compose";
    /// `.dockerignore`
    pub const DOCKERIGNORE: &str = "dockerignore";
}

/// Every built-in template, by registration name
const BUILTIN: &[(&str, &str)] = &[
    (names::DTO, DTO_TEMPLATE),
    (names::MODEL, MODEL_TEMPLATE),
    (names::SERVICE, SERVICE_TEMPLATE),
    (names::CONTROLLER, CONTROLLER_TEMPLATE),
    (names::GO_MOD, files::GO_MOD),
    (names::ENV, files::ENV),
    (names::TEST_ENV, files::TEST_ENV),
    (names::GITIGNORE, files::GITIGNORE),
    (names::UTILS_CONVERTOR, files::UTILS_CONVERTOR),
    (names::CONFIG_ENV, files::CONFIG_ENV),
    (names::STARTUP_INDEXES, files::STARTUP_INDEXES),
    (names::STARTUP_MODULE, files::STARTUP_MODULE),
    (names::STARTUP_SERVER, files::STARTUP_SERVER),
    (names::STARTUP_TEST_SERVER, files::STARTUP_TEST_SERVER),
    (names::CMD_MAIN, files::CMD_MAIN),
    (names::SEED_SCRIPT, files::SEED_SCRIPT),
    (names::DOCKERFILE, files::DOCKERFILE),
    (names::DOCKER_COMPOSE, files::DOCKER_COMPOSE),
    (names::DOCKERIGNORE, files::DOCKERIGNORE),
];

/// Registry of compiled templates
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Compile every built-in template
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        for (name, template) in BUILTIN {
            handlebars.register_template_string(name, template)?;
        }

        Ok(Self { handlebars })
    }

    /// Render a registered template
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or its context lacks a
    /// variable the template uses.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        Ok(self.handlebars.render(name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_compiles_builtin_templates() {
        assert!(TemplateRegistry::new().is_ok());
    }

    #[test]
    fn test_strict_mode_rejects_missing_variables() {
        let registry = TemplateRegistry::new().unwrap();
        let result = registry.render(names::MODEL, &json!({ "collection": "samples" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::new().unwrap();
        assert!(registry.render("nope", &json!({})).is_err());
    }

    #[test]
    fn test_feature_templates_have_no_stray_braces() {
        // Go composite literals must never be mistaken for handlebars blocks
        for template in [DTO_TEMPLATE, MODEL_TEMPLATE, SERVICE_TEMPLATE, CONTROLLER_TEMPLATE] {
            assert!(!template.contains("{{{"));
            assert!(!template.contains("}}}"));
        }
    }
}
