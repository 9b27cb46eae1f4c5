//! In-memory schema shared by both generators.
//!
//! Built once by extraction, validated, then handed unmodified to the client and
//! dispatch renderers. Nothing here is mutated after validation.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::type_map;
use crate::config::FieldCase;

/// Where a declaration was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// Module of `file` relative to the source root, e.g. `billing::invoices`.
    /// Empty for the root module.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub module: String,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            module: String::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A field or signature type, as declared.
///
/// Only simple named types are accepted, plus one level of `Vec<T>` or `Option<T>`
/// around a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    Optional(Box<TypeRef>),
}

impl TypeRef {
    /// The innermost named type, which is what reference resolution checks.
    pub fn named_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::Optional(inner) => inner.named_type(),
        }
    }

    /// TypeScript type annotation.
    pub fn client_type(&self) -> String {
        match self {
            TypeRef::Named(name) => type_map::map_type(name).to_string(),
            TypeRef::List(inner) => format!("{}[]", inner.client_type()),
            TypeRef::Optional(inner) => format!("{} | null", inner.client_type()),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "Vec<{inner}>"),
            TypeRef::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// One field of a record struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Rust field identifier
    pub name: String,
    /// Wire name pinned by `#[serde(rename)]` or the container's `rename_all`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed: Option<String>,
    /// Declared type
    pub ty: TypeRef,
    /// TypeScript type, mapped at extraction time
    pub client_type: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        let client_type = ty.client_type();
        Self {
            name: name.into(),
            renamed: None,
            ty,
            client_type,
        }
    }

    /// Name serde reads and writes for this field. The client interface uses it verbatim.
    pub fn wire_name(&self) -> &str {
        self.renamed.as_deref().unwrap_or(&self.name)
    }

    /// Whether the wire name already follows `case`.
    ///
    /// Fields with an explicit serde rename always conform.
    pub fn follows(&self, case: FieldCase) -> bool {
        self.renamed.is_some() || case.apply(&self.name) == self.name
    }
}

/// A record-shaped struct used as a request, response, or field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDefinition {
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: SourceLocation,
}

/// A remotely invokable operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDefinition {
    /// Function name; the dispatch key and the `fn` value on the wire
    pub name: String,
    pub request_type: String,
    pub response_type: String,
    /// Textual `E` of a `Result<T, E>` return; never resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Whether the function returns a `Result`
    pub fallible: bool,
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: SourceLocation,
}

impl ActionDefinition {
    pub fn client_request_type(&self) -> &str {
        type_map::map_type(&self.request_type)
    }

    pub fn client_response_type(&self) -> &str {
        type_map::map_type(&self.response_type)
    }
}

/// The complete set of actions and struct shapes for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Actions sorted by name
    pub actions: Vec<ActionDefinition>,
    pub structs: BTreeMap<String, StructDefinition>,
}

impl Schema {
    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Whether `name` is a scalar or a struct of this schema.
    pub fn resolves(&self, name: &str) -> bool {
        type_map::is_scalar(name) || self.structs.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.structs.is_empty()
    }
}
