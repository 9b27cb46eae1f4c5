//! TypeScript client module generation.
//!
//! One `export interface` per struct and one `fetch`-based binding per action, all
//! posting the `{ fn, args }` envelope to a single endpoint.

use std::collections::HashMap;

use askama::Template;

use super::schema::{ActionDefinition, Schema, StructDefinition};
use super::CodegenError;
use crate::config::ClientOptions;

#[derive(Template, Debug)]
#[template(path = "codegen/client.ts", escape = "none")]
struct ClientTemplate<'a> {
    /// Endpoint as a quoted string literal
    endpoint: String,
    interfaces: Vec<InterfaceView<'a>>,
    bindings: Vec<BindingView<'a>>,
}

#[derive(Debug)]
struct InterfaceView<'a> {
    name: &'a str,
    doc: String,
    properties: Vec<PropertyView<'a>>,
}

#[derive(Debug)]
struct PropertyView<'a> {
    name: String,
    ty: &'a str,
}

#[derive(Debug)]
struct BindingView<'a> {
    export_name: String,
    action_literal: String,
    request: &'a str,
    response: &'a str,
    doc: String,
}

/// Render the client module for `schema`.
pub fn render(
    schema: &Schema,
    endpoint: &str,
    options: &ClientOptions,
) -> Result<String, CodegenError> {
    let interfaces = schema.structs.values().map(interface_view).collect();

    let mut bindings = Vec::with_capacity(schema.actions.len());
    let mut taken: HashMap<String, &str> = HashMap::new();
    for action in &schema.actions {
        let view = binding_view(action, options);
        if let Some(other) = taken.insert(view.export_name.clone(), &action.name) {
            return Err(CodegenError::Rendering(format!(
                "actions `{other}` and `{}` both map to client binding `{}`",
                action.name, view.export_name
            )));
        }
        bindings.push(view);
    }

    let template = ClientTemplate {
        endpoint: string_literal(endpoint),
        interfaces,
        bindings,
    };
    let mut output = template
        .render()
        .map_err(|e| CodegenError::Rendering(e.to_string()))?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Properties carry the serde wire name of each field.
fn interface_view(def: &StructDefinition) -> InterfaceView<'_> {
    InterfaceView {
        name: &def.name,
        doc: def.description.as_deref().map(jsdoc).unwrap_or_default(),
        properties: def
            .fields
            .iter()
            .map(|field| PropertyView {
                name: property_name(field.wire_name()),
                ty: &field.client_type,
            })
            .collect(),
    }
}

fn binding_view<'a>(action: &'a ActionDefinition, options: &ClientOptions) -> BindingView<'a> {
    let mut export_name = options.binding_case.apply(&action.name);
    if is_reserved(&export_name) {
        export_name.push('_');
    }
    BindingView {
        export_name,
        action_literal: string_literal(&action.name),
        request: action.client_request_type(),
        response: action.client_response_type(),
        doc: action.description.as_deref().map(jsdoc).unwrap_or_default(),
    }
}

/// A double-quoted string literal, valid in both JSON and TypeScript.
fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Property names that aren't identifiers (e.g. `kebab-case` wire names) are quoted.
fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn jsdoc(text: &str) -> String {
    let mut out = String::from("/**");
    for line in text.lines() {
        out.push_str("\n *");
        if !line.is_empty() {
            out.push(' ');
            out.push_str(&line.replace("*/", "*\\/"));
        }
    }
    out.push_str("\n */");
    out
}

const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}
