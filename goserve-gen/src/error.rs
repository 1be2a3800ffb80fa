//! Generator error types

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while generating a project.
///
/// Every variant is terminal: the assembler stops at the first error and
/// nothing is retried.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required argument was empty
    #[error("{argument} should be a non-empty string")]
    EmptyArgument {
        /// Name of the offending argument
        argument: &'static str,
    },

    /// Feature name cannot be used as a Go package name
    #[error("invalid feature name '{name}': {reason}")]
    InvalidFeatureName {
        /// Name as given on the command line
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Two requested features collapse to the same package
    #[error("feature '{name}' was requested more than once")]
    DuplicateFeature {
        /// Lowercase package name shared by both requests
        name: String,
    },

    /// Directory or file operation failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being created or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A built-in template failed to parse
    #[error("failed to register template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// A built-in template failed to render
    #[error("failed to render template: {0}")]
    Render(#[from] Box<handlebars::RenderError>),

    /// RSA key generation or validation failed
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] rsa::Error),

    /// RSA key could not be PEM encoded
    #[error("key encoding failed: {0}")]
    KeyEncoding(String),

    /// The dependency resolution tool exited unsuccessfully
    #[error("`{command}` failed ({status})\nOutput: {output}")]
    DependencyResolution {
        /// Command line that was run
        command: String,
        /// Exit status of the tool
        status: ExitStatus,
        /// Combined stdout and stderr, verbatim
        output: String,
    },

    /// The dependency resolution tool could not be started
    #[error("failed to run `{command}`: {source}")]
    DependencyToolUnavailable {
        /// Command line that was attempted
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl GeneratorError {
    /// Wrap an I/O error with the path it occurred on
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a key encoding error from any displayable cause
    #[must_use]
    pub fn key_encoding<T: std::fmt::Display>(cause: T) -> Self {
        Self::KeyEncoding(cause.to_string())
    }
}

impl From<handlebars::TemplateError> for GeneratorError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

impl From<handlebars::RenderError> for GeneratorError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Render(Box::new(err))
    }
}

impl From<figment::Error> for GeneratorError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
