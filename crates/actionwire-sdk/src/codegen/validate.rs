//! Schema assembly and validation.
//!
//! Every declaration is extracted into a `Result<_, Violation>`; [`SchemaBuilder`]
//! folds those outcomes into a [`Schema`], rejecting duplicates, then checks every type
//! reference. All problems land in one [`ValidationReport`] so a single run surfaces
//! every broken declaration, and nothing is rendered until the report is clean.

use std::collections::btree_map::Entry;
use std::collections::BTreeSet;
use std::fmt;

use super::schema::{ActionDefinition, Schema, SourceLocation, StructDefinition};
use super::CodegenError;
use crate::config::FieldCase;

/// Kind of a named definition, for duplicate reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Action,
    Struct,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionKind::Action => write!(f, "action"),
            DefinitionKind::Struct => write!(f, "struct"),
        }
    }
}

/// A single contract problem found in the declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The declaration's shape is outside what the extractor supports.
    #[error("{location}: `{declaration}`: {reason}")]
    SchemaViolation {
        location: SourceLocation,
        declaration: String,
        reason: String,
    },

    /// A type name resolves neither to a scalar nor to a struct of the schema.
    #[error("{location}: `{declaration}` references unknown type `{type_name}`")]
    UnresolvedReference {
        location: SourceLocation,
        declaration: String,
        type_name: String,
    },

    #[error("{second}: duplicate {kind} `{name}` (first defined at {first})")]
    DuplicateDefinition {
        kind: DefinitionKind,
        name: String,
        first: SourceLocation,
        second: SourceLocation,
    },
}

impl Violation {
    pub(crate) fn schema(
        location: SourceLocation,
        declaration: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Violation::SchemaViolation {
            location,
            declaration: declaration.into(),
            reason: reason.into(),
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            Violation::SchemaViolation { location, .. }
            | Violation::UnresolvedReference { location, .. } => location,
            Violation::DuplicateDefinition { second, .. } => second,
        }
    }
}

/// Every violation found in one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok(())` when clean, otherwise the report as a [`CodegenError::Validation`].
    pub fn into_result(self) -> Result<(), CodegenError> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(CodegenError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "{count} schema {} found",
            if count == 1 { "violation" } else { "violations" }
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

/// Fields whose serde name doesn't follow `case`.
///
/// Client properties always use the serde name, so a field the case rule would rename
/// has to be renamed in Rust first or the server would reject the client's payload.
pub fn field_case_violations(schema: &Schema, case: FieldCase) -> Vec<Violation> {
    let Some(rule) = case.serde_rule() else {
        return Vec::new();
    };
    schema
        .structs
        .values()
        .flat_map(|def| {
            def.fields
                .iter()
                .filter(move |field| !field.follows(case))
                .map(move |field| {
                    let expected = case.apply(&field.name);
                    Violation::schema(
                        def.location.clone(),
                        format!("{}.{}", def.name, field.name),
                        format!(
                            "field-case `{case}` expects `{expected}` but serde uses `{}`; \
                             add `#[serde(rename_all = \"{rule}\")]` to `{}` or \
                             `#[serde(rename = \"{expected}\")]` to the field",
                            field.name, def.name
                        ),
                    )
                })
        })
        .collect()
}

/// Folds per-declaration outcomes into a schema plus a report.
#[derive(Debug, Default)]
pub(crate) struct SchemaBuilder {
    schema: Schema,
    report: ValidationReport,
    /// Structs already reported as violations; references to them are not re-reported.
    rejected: BTreeSet<String>,
}

impl SchemaBuilder {
    pub fn add_struct(&mut self, outcome: Result<StructDefinition, Violation>) {
        let def = match outcome {
            Ok(def) => def,
            Err(violation) => {
                if let Violation::SchemaViolation { declaration, .. } = &violation {
                    // `Struct` or `Struct.field`
                    let name = declaration.split('.').next().unwrap_or(declaration.as_str());
                    self.rejected.insert(name.to_string());
                }
                return self.report.push(violation);
            }
        };
        match self.schema.structs.entry(def.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(def);
            }
            Entry::Occupied(existing) => self.report.push(Violation::DuplicateDefinition {
                kind: DefinitionKind::Struct,
                name: def.name,
                first: existing.get().location.clone(),
                second: def.location,
            }),
        }
    }

    pub fn add_action(&mut self, outcome: Result<ActionDefinition, Violation>) {
        let def = match outcome {
            Ok(def) => def,
            Err(violation) => return self.report.push(violation),
        };
        if let Some(existing) = self.schema.action(&def.name) {
            let first = existing.location.clone();
            self.report.push(Violation::DuplicateDefinition {
                kind: DefinitionKind::Action,
                name: def.name,
                first,
                second: def.location,
            });
            return;
        }
        self.schema.actions.push(def);
    }

    /// Sort actions, resolve every reference, and hand back the result.
    pub fn finish(mut self) -> (Schema, ValidationReport) {
        self.schema.actions.sort_by(|a, b| a.name.cmp(&b.name));

        let resolves = |name: &str| self.schema.resolves(name) || self.rejected.contains(name);
        let mut unresolved = Vec::new();
        for def in self.schema.structs.values() {
            for field in &def.fields {
                let target = field.ty.named_type();
                if !resolves(target) {
                    unresolved.push(Violation::UnresolvedReference {
                        location: def.location.clone(),
                        declaration: format!("{}.{}", def.name, field.name),
                        type_name: target.to_string(),
                    });
                }
            }
        }
        for action in &self.schema.actions {
            for target in [&action.request_type, &action.response_type] {
                if !resolves(target.as_str()) {
                    unresolved.push(Violation::UnresolvedReference {
                        location: action.location.clone(),
                        declaration: action.name.clone(),
                        type_name: target.clone(),
                    });
                }
            }
        }
        for violation in unresolved {
            self.report.push(violation);
        }

        (self.schema, self.report)
    }
}
