//! Naming helpers for feature generation
//!
//! Every name a feature module needs is derived here from the raw feature
//! name, so the DTO, model, service and controller can never disagree on a
//! package, type, collection or route.

use serde::Serialize;
use std::fmt;

use crate::error::{GeneratorError, Result};

/// Go keywords, which can never be package names
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Predeclared Go identifiers; importing a package under one of these hides
/// the builtin for the whole file
const GO_PREDECLARED: &[&str] = &[
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex64", "complex128", "copy", "delete", "error", "false", "float32", "float64", "imag",
    "int", "int8", "int16", "int32", "int64", "iota", "len", "make", "max", "min", "new", "nil",
    "panic", "print", "println", "real", "recover", "rune", "string", "true", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr",
];

/// Names the Go toolchain refuses as an importable package or path element
const GO_TOOLCHAIN_NAMES: &[&str] = &["init", "internal", "main", "testdata", "vendor"];

/// Package names already imported by `startup/module.go`
const RESERVED_PACKAGES: &[&str] = &["config", "context", "mongo", "network", "redis"];

/// Identifiers `startup/module.go` declares or uses next to the feature
/// imports: package-level `module` and `create`, and the `m` receiver
const RESERVED_IDENTIFIERS: &[&str] = &["create", "m", "module"];

/// A validated feature name
///
/// Guarantees the name is non-empty ASCII that can become a Go package once
/// lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureName(String);

impl FeatureName {
    /// Validate a raw feature name
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyArgument`] for an empty name and
    /// [`GeneratorError::InvalidFeatureName`] when the name is not ASCII
    /// alphanumeric, does not start with a letter, or clashes with a name
    /// reserved by Go or by the generated startup wiring.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason| GeneratorError::InvalidFeatureName {
            name: name.clone(),
            reason,
        };

        let Some(first) = name.chars().next() else {
            return Err(GeneratorError::EmptyArgument {
                argument: "feature name",
            });
        };

        if !first.is_ascii_alphabetic() {
            return Err(invalid("must start with an ASCII letter"));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("only ASCII letters and digits are allowed"));
        }

        let lowercase = name.to_ascii_lowercase();
        if GO_KEYWORDS.contains(&lowercase.as_str()) {
            return Err(invalid("is a Go keyword"));
        }
        if GO_PREDECLARED.contains(&lowercase.as_str()) {
            return Err(invalid("is a predeclared Go identifier"));
        }
        if GO_TOOLCHAIN_NAMES.contains(&lowercase.as_str()) {
            return Err(invalid("is not an importable Go package name"));
        }
        if RESERVED_PACKAGES.contains(&lowercase.as_str()) {
            return Err(invalid("clashes with a package imported by the startup wiring"));
        }
        if RESERVED_IDENTIFIERS.contains(&lowercase.as_str()) {
            return Err(invalid("clashes with an identifier in the startup wiring"));
        }

        Ok(Self(name))
    }

    /// The name exactly as given
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root import namespace of the generated Go module
///
/// Used verbatim as an import prefix. Only emptiness is checked; `go build`
/// is where a malformed module path surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// Wrap a module path
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyArgument`] if `path` is empty.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(GeneratorError::EmptyArgument {
                argument: "module path",
            });
        }
        Ok(Self(path))
    }

    /// The module path as given
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Import path of a package inside this module
    ///
    /// # Examples
    ///
    /// ```
    /// # use goserve_gen::scaffold::helpers::ModulePath;
    /// let module = ModulePath::new("example.com/demo").unwrap();
    /// assert_eq!(module.join("config"), "example.com/demo/config");
    /// ```
    #[must_use]
    pub fn join(&self, package: &str) -> String {
        format!("{}/{package}", self.0)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every naming variant of one feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureSpec {
    /// Name as requested
    pub raw_name: String,
    /// Package, directory and file name
    pub lowercase: String,
    /// Exported type name
    pub capitalized: String,
    /// Mongo collection name
    pub collection: String,
    /// Controller base path
    pub route: String,
}

impl FeatureSpec {
    /// Derive all naming variants from a feature name
    ///
    /// # Examples
    ///
    /// ```
    /// # use goserve_gen::scaffold::helpers::{FeatureName, FeatureSpec};
    /// let spec = FeatureSpec::derive(&FeatureName::new("Sample").unwrap());
    /// assert_eq!(spec.lowercase, "sample");
    /// assert_eq!(spec.capitalized, "Sample");
    /// assert_eq!(spec.collection, "samples");
    /// assert_eq!(spec.route, "/sample");
    /// ```
    #[must_use]
    pub fn derive(name: &FeatureName) -> Self {
        let lowercase = name.as_str().to_ascii_lowercase();
        Self {
            raw_name: name.as_str().to_string(),
            capitalized: capitalize_first(&lowercase),
            collection: format!("{lowercase}s"),
            route: format!("/{lowercase}"),
            lowercase,
        }
    }

    /// Import path of the feature package
    ///
    /// # Examples
    ///
    /// ```
    /// # use goserve_gen::scaffold::helpers::{FeatureName, FeatureSpec, ModulePath};
    /// let spec = FeatureSpec::derive(&FeatureName::new("sample").unwrap());
    /// let module = ModulePath::new("example.com/demo").unwrap();
    /// assert_eq!(spec.import_path(&module), "example.com/demo/api/sample");
    /// ```
    #[must_use]
    pub fn import_path(&self, module: &ModulePath) -> String {
        module.join(&format!("api/{}", self.lowercase))
    }
}

/// Upper-case the first character, leaving the rest unchanged
///
/// # Examples
///
/// ```
/// # use goserve_gen::scaffold::helpers::capitalize_first;
/// assert_eq!(capitalize_first("sample"), "Sample");
/// assert_eq!(capitalize_first("userProfile"), "UserProfile");
/// assert_eq!(capitalize_first(""), "");
/// ```
#[must_use]
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
