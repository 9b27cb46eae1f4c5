//! Schema-driven code generation.
//!
//! Extraction turns Rust declarations into a [`schema::Schema`]; the two renderers turn
//! one schema into the TypeScript client module ([`typescript`]) and the Rust dispatch
//! module ([`dispatch`]).

pub mod dispatch;
pub mod extract;
pub mod schema;
pub mod type_map;
pub mod typescript;
pub mod validate;

use std::path::PathBuf;

pub use extract::{extract_schema, Extraction};
pub use schema::{
    ActionDefinition, FieldDefinition, Schema, SourceLocation, StructDefinition, TypeRef,
};
pub use validate::{ValidationReport, Violation};

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{0}")]
    Validation(ValidationReport),

    #[error("template rendering failed: {0}")]
    Rendering(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}
