//! Declaration extraction from Rust source files.
//!
//! Walks the source root, parses each `*.rs` file with `syn`, and turns record structs
//! and marker-annotated free functions into schema definitions. Every declaration
//! yields a `Result`; unsupported shapes become [`Violation`]s instead of panics, and
//! [`SchemaBuilder`] folds them into one report.

use std::path::{Path, PathBuf};

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use proc_macro2::Span;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, ExprLit, Fields, FnArg, GenericArgument, Item, ItemFn, ItemStruct, Lit,
    Meta, MetaNameValue, PathArguments, ReturnType, Token, Type, Visibility,
};

use super::schema::{
    ActionDefinition, FieldDefinition, Schema, SourceLocation, StructDefinition, TypeRef,
};
use super::validate::{SchemaBuilder, ValidationReport, Violation};
use super::CodegenError;

/// Result of extracting one source root: the schema plus every violation found.
#[derive(Debug)]
pub struct Extraction {
    pub schema: Schema,
    pub report: ValidationReport,
    /// Number of source files scanned
    pub files: usize,
}

impl Extraction {
    /// The schema, or the report as an error if any violation was found.
    pub fn into_result(self) -> Result<Schema, CodegenError> {
        self.report.into_result()?;
        Ok(self.schema)
    }
}

/// Declarations found in a single file, before cross-file validation.
#[derive(Debug, Default)]
pub struct FileDeclarations {
    pub structs: Vec<Result<StructDefinition, Violation>>,
    pub actions: Vec<Result<ActionDefinition, Violation>>,
}

/// Extract the schema from every `*.rs` file under `source_root`.
///
/// Only I/O and parse failures return `Err`; contract problems are collected in
/// [`Extraction::report`].
pub fn extract_schema(source_root: &Path, marker: &str) -> Result<Extraction, CodegenError> {
    let files = discover_sources(source_root)?;
    let mut builder = SchemaBuilder::default();

    for path in &files {
        let source = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        let decls = extract_source(path, &source, marker)?;
        let module = module_path(source_root, path);
        tracing::debug!(
            file = %path.display(),
            module = %module,
            structs = decls.structs.len(),
            actions = decls.actions.len(),
            "Scanned declaration file"
        );
        for outcome in decls.structs {
            builder.add_struct(outcome.map(|mut def| {
                def.location.module = module.clone();
                def
            }));
        }
        for outcome in decls.actions {
            builder.add_action(outcome.map(|mut def| {
                def.location.module = module.clone();
                def
            }));
        }
    }

    let (schema, report) = builder.finish();
    Ok(Extraction {
        schema,
        report,
        files: files.len(),
    })
}

/// Recursively list `*.rs` files under `root`, sorted by path. Hidden entries are skipped.
pub fn discover_sources(root: &Path) -> Result<Vec<PathBuf>, CodegenError> {
    if !root.is_dir() {
        return Err(CodegenError::io(
            root,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "source root is not a readable directory",
            ),
        ));
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| CodegenError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| CodegenError::io(&dir, e))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| CodegenError::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") && path.is_file() {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Module path of `file` below `root`, following Rust's file layout.
///
/// `users.rs` is `users`, `billing/invoices.rs` is `billing::invoices`, and
/// `billing/mod.rs` is `billing`. A `mod.rs`, `lib.rs`, or `main.rs` directly under the
/// root is the root module itself (an empty path).
pub fn module_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if let Some(stem) = relative.file_stem().map(|stem| stem.to_string_lossy()) {
        let is_root_file = segments.is_empty() && matches!(&*stem, "lib" | "main");
        if stem != "mod" && !is_root_file {
            segments.push(stem.into_owned());
        }
    }
    segments.join("::")
}

/// Parse one file and extract its top-level declarations.
pub fn extract_source(
    path: &Path,
    source: &str,
    marker: &str,
) -> Result<FileDeclarations, CodegenError> {
    let file = syn::parse_file(source).map_err(|e| {
        let start = e.span().start();
        CodegenError::Parse {
            path: path.to_path_buf(),
            line: start.line,
            column: start.column + 1,
            message: e.to_string(),
        }
    })?;

    let mut decls = FileDeclarations::default();
    for item in &file.items {
        match item {
            Item::Struct(item) => {
                if let Some(outcome) = extract_struct(path, item) {
                    decls.structs.push(outcome);
                }
            }
            Item::Fn(item) if has_marker(&item.attrs, marker) => {
                decls.actions.push(extract_action(path, item, marker));
            }
            _ => {}
        }
    }
    Ok(decls)
}

// =========================================================================
// Structs
// =========================================================================

/// `None` for structs that are not record-shaped (unit and tuple structs).
fn extract_struct(
    path: &Path,
    item: &ItemStruct,
) -> Option<Result<StructDefinition, Violation>> {
    let name = item.ident.unraw().to_string();
    let location = span_location(path, item.ident.span());

    let named = match &item.fields {
        Fields::Named(named) => named,
        Fields::Unnamed(_) | Fields::Unit => {
            tracing::debug!(name = %name, "Skipping non-record struct");
            return None;
        }
    };

    if !item.generics.params.is_empty() {
        return Some(Err(Violation::schema(
            location,
            name,
            "generic structs are not supported",
        )));
    }

    let container = SerdeAttrs::parse(&item.attrs);
    let mut fields = Vec::with_capacity(named.named.len());

    for field in &named.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let declaration = format!("{name}.{field_name}");
        let attrs = SerdeAttrs::parse(&field.attrs);

        if attrs.skip {
            continue;
        }
        if attrs.flatten {
            return Some(Err(Violation::schema(
                span_location(path, ident.span()),
                declaration,
                "flattened fields are not supported",
            )));
        }

        let ty = match field_type(&field.ty) {
            Ok(ty) => ty,
            Err(reason) => {
                return Some(Err(Violation::schema(
                    span_location(path, ident.span()),
                    declaration,
                    reason,
                )))
            }
        };

        let mut def = FieldDefinition::new(field_name, ty);
        def.renamed = attrs
            .rename
            .or_else(|| container.rename_all.map(|rule| rule.apply(&def.name)));
        fields.push(def);
    }

    Some(Ok(StructDefinition {
        name,
        fields,
        description: description(&item.attrs, None),
        location,
    }))
}

/// A field type: a named type, or `Vec`/`Option` around one.
fn field_type(ty: &Type) -> Result<TypeRef, String> {
    if let Type::Path(type_path) = ty {
        let path = &type_path.path;
        if type_path.qself.is_none() && path.leading_colon.is_none() && path.segments.len() == 1
        {
            let segment = &path.segments[0];
            let ident = segment.ident.unraw().to_string();
            match &segment.arguments {
                PathArguments::None => return Ok(TypeRef::Named(ident)),
                PathArguments::AngleBracketed(args) if ident == "Vec" || ident == "Option" => {
                    let mut types = args.args.iter().filter_map(|arg| match arg {
                        GenericArgument::Type(ty) => Some(ty),
                        _ => None,
                    });
                    let (Some(inner), None) = (types.next(), types.next()) else {
                        return Err(format!(
                            "`{}` must have exactly one type argument",
                            type_label(ty)
                        ));
                    };
                    let inner = Box::new(TypeRef::Named(named_type(inner)?));
                    return Ok(if ident == "Vec" {
                        TypeRef::List(inner)
                    } else {
                        TypeRef::Optional(inner)
                    });
                }
                _ => {}
            }
        }
    }
    Err(format!(
        "unsupported {} `{}`; expected a named type, `Vec<T>`, or `Option<T>`",
        type_kind(ty),
        type_label(ty)
    ))
}

// =========================================================================
// Actions
// =========================================================================

fn extract_action(
    path: &Path,
    item: &ItemFn,
    marker: &str,
) -> Result<ActionDefinition, Violation> {
    let sig = &item.sig;
    let name = sig.ident.unraw().to_string();
    let location = span_location(path, sig.ident.span());
    let violation = |reason: String| Violation::schema(location.clone(), name.clone(), reason);

    if matches!(item.vis, Visibility::Inherited) {
        return Err(violation(
            "actions must be visible to the dispatch module (declare them `pub`)".into(),
        ));
    }
    if sig.unsafety.is_some() {
        return Err(violation("unsafe functions cannot be actions".into()));
    }
    if !sig.generics.params.is_empty() {
        return Err(violation("generic actions are not supported".into()));
    }
    if sig.inputs.len() != 1 {
        return Err(violation(format!(
            "expected exactly one parameter, found {}",
            sig.inputs.len()
        )));
    }

    let request_type = match &sig.inputs[0] {
        FnArg::Typed(param) => {
            named_type(&param.ty).map_err(|reason| violation(format!("parameter: {reason}")))?
        }
        FnArg::Receiver(_) => return Err(violation("methods cannot be actions".into())),
    };

    let output = match &sig.output {
        ReturnType::Default => {
            return Err(violation("actions must declare a result type".into()));
        }
        ReturnType::Type(_, ty) => ty,
    };
    let (response_type, error_type) =
        split_result(output).map_err(|reason| violation(format!("result: {reason}")))?;

    Ok(ActionDefinition {
        name,
        request_type,
        response_type,
        fallible: error_type.is_some(),
        error_type: error_type.flatten(),
        is_async: sig.asyncness.is_some(),
        description: description(&item.attrs, Some(marker)),
        location,
    })
}

/// Split a return type into its first result and, for `Result`s, the error type.
///
/// The outer `Option` of the error says whether the return is a `Result`; the inner one
/// is `None` for single-argument aliases such as `anyhow::Result<T>`.
fn split_result(ty: &Type) -> Result<(String, Option<Option<String>>), String> {
    if let Type::Tuple(tuple) = ty {
        if tuple.elems.is_empty() {
            return Err("actions must return a value, not `()`".into());
        }
    }

    if let Type::Path(type_path) = ty {
        let result_segment = type_path
            .path
            .segments
            .last()
            .filter(|segment| type_path.qself.is_none() && segment.ident == "Result");
        if let Some(segment) = result_segment {
            let PathArguments::AngleBracketed(args) = &segment.arguments else {
                return Err("`Result` must name its success type".into());
            };
            let mut types = args.args.iter().filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            });
            let Some(ok) = types.next() else {
                return Err("`Result` must name its success type".into());
            };
            let response = named_type(ok)?;
            let error = types.next().map(type_label);
            return Ok((response, Some(error)));
        }
    }

    Ok((named_type(ty)?, None))
}

// =========================================================================
// Shared helpers
// =========================================================================

/// A single-segment path with no generic arguments.
fn named_type(ty: &Type) -> Result<String, String> {
    match ty {
        Type::Path(type_path)
            if type_path.qself.is_none()
                && type_path.path.leading_colon.is_none()
                && type_path.path.segments.len() == 1
                && matches!(type_path.path.segments[0].arguments, PathArguments::None) =>
        {
            Ok(type_path.path.segments[0].ident.unraw().to_string())
        }
        Type::Paren(paren) => named_type(&paren.elem),
        Type::Group(group) => named_type(&group.elem),
        _ => Err(format!(
            "unsupported {} `{}`; expected a simple named type",
            type_kind(ty),
            type_label(ty)
        )),
    }
}

fn type_kind(ty: &Type) -> &'static str {
    match ty {
        Type::Reference(_) => "reference type",
        Type::Ptr(_) => "raw pointer type",
        Type::Slice(_) => "slice type",
        Type::Array(_) => "array type",
        Type::Tuple(_) => "tuple type",
        Type::TraitObject(_) => "trait object type",
        Type::ImplTrait(_) => "impl trait type",
        Type::BareFn(_) => "function pointer type",
        Type::Path(type_path) if type_path.qself.is_some() => "qualified path type",
        Type::Path(type_path) if type_path.path.segments.len() > 1 => "module path type",
        Type::Path(_) => "generic type",
        _ => "type",
    }
}

/// Compact source rendering of a type for messages (`Vec<u8>` rather than `Vec < u8 >`).
fn type_label(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace("& ", "&")
        .replace(" ,", ",")
}

fn span_location(path: &Path, span: Span) -> SourceLocation {
    let start = span.start();
    SourceLocation::new(path, start.line, start.column + 1)
}

/// Doc comment text, one entry per line (block docs are split).
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(MetaNameValue {
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(text),
                        ..
                    }),
                ..
            }) => Some(text.value()),
            _ => None,
        })
        .flat_map(|text| {
            text.lines()
                .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn has_marker(attrs: &[Attribute], marker: &str) -> bool {
    doc_lines(attrs).iter().any(|line| line.contains(marker))
}

/// Doc comment text with marker lines removed; `None` when nothing is left.
fn description(attrs: &[Attribute], marker: Option<&str>) -> Option<String> {
    let lines: Vec<String> = doc_lines(attrs)
        .into_iter()
        .filter(|line| marker.map_or(true, |m| !line.contains(m)))
        .collect();
    let text = lines.join("\n").trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// The subset of `#[serde(...)]` that changes the wire shape.
#[derive(Debug, Default)]
struct SerdeAttrs {
    rename: Option<String>,
    rename_all: Option<RenameRule>,
    skip: bool,
    flatten: bool,
}

impl SerdeAttrs {
    fn parse(attrs: &[Attribute]) -> Self {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            let metas =
                match attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) {
                    Ok(metas) => metas,
                    Err(e) => {
                        tracing::debug!(error = %e, "Ignoring unparseable serde attribute");
                        continue;
                    }
                };
            for meta in &metas {
                let path = meta.path();
                if path.is_ident("skip") {
                    out.skip = true;
                } else if path.is_ident("flatten") {
                    out.flatten = true;
                } else if path.is_ident("rename") {
                    out.rename = serialize_name(meta);
                } else if path.is_ident("rename_all") {
                    out.rename_all = serialize_name(meta).and_then(|rule| RenameRule::parse(&rule));
                }
            }
        }
        out
    }
}

/// `rename = "x"` or the `serialize` half of `rename(serialize = "x", ...)`.
fn serialize_name(meta: &Meta) -> Option<String> {
    match meta {
        Meta::NameValue(name_value) => lit_str(&name_value.value),
        Meta::List(list) => list
            .parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)
            .ok()?
            .iter()
            .find(|nv| nv.path.is_ident("serialize"))
            .and_then(|nv| lit_str(&nv.value)),
        Meta::Path(_) => None,
    }
}

fn lit_str(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(text),
            ..
        }) => Some(text.value()),
        _ => None,
    }
}

/// serde's `rename_all` rules, applied to snake_case field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(rule: &str) -> Option<Self> {
        match rule {
            "lowercase" => Some(RenameRule::Lower),
            "UPPERCASE" => Some(RenameRule::Upper),
            "PascalCase" => Some(RenameRule::Pascal),
            "camelCase" => Some(RenameRule::Camel),
            "snake_case" => Some(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Some(RenameRule::ScreamingSnake),
            "kebab-case" => Some(RenameRule::Kebab),
            "SCREAMING-KEBAB-CASE" => Some(RenameRule::ScreamingKebab),
            other => {
                tracing::debug!(rule = other, "Ignoring unknown rename_all rule");
                None
            }
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            RenameRule::Lower => name.to_lowercase(),
            RenameRule::Upper => name.to_uppercase(),
            RenameRule::Pascal => name.to_upper_camel_case(),
            RenameRule::Camel => name.to_lower_camel_case(),
            RenameRule::Snake => name.to_snake_case(),
            RenameRule::ScreamingSnake => name.to_shouty_snake_case(),
            RenameRule::Kebab => name.to_kebab_case(),
            RenameRule::ScreamingKebab => name.to_shouty_kebab_case(),
        }
    }
}
