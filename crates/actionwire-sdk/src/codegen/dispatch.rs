//! Rust dispatch module generation.
//!
//! The generated module exposes `dispatch`, an exhaustive match from action name to a
//! decode, call, encode sequence, plus an axum handler and router serving it. Actions
//! and request types are named by their full path: the configured actions module, then
//! the module of the file they were declared in.

use askama::Template;

use super::schema::{ActionDefinition, Schema};
use super::type_map;
use super::CodegenError;
use crate::config::ServerOptions;

/// One arm of the generated match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Matched(ActionRoute),
    /// Catch-all for names no action claims.
    Unknown,
}

impl Route {
    pub fn action(&self) -> Option<&ActionRoute> {
        match self {
            Route::Matched(route) => Some(route),
            Route::Unknown => None,
        }
    }
}

/// Rendered pieces of a single action's arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRoute {
    /// Match pattern (a string literal)
    pub key: String,
    /// Arm expression
    pub call: String,
    /// `//` lines carrying the action's description
    pub comment: Vec<String>,
}

/// Match arms in emission order: actions by name, then the catch-all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    pub routes: Vec<Route>,
}

impl RouteTable {
    pub fn build(schema: &Schema, options: &ServerOptions) -> Self {
        let mut routes: Vec<Route> = schema
            .actions
            .iter()
            .map(|action| Route::Matched(action_route(action, schema, options)))
            .collect();
        routes.push(Route::Unknown);
        Self { routes }
    }

    pub fn matched(&self) -> impl Iterator<Item = &ActionRoute> {
        self.routes.iter().filter_map(Route::action)
    }
}

#[derive(Template, Debug)]
#[template(path = "codegen/dispatch.rs", escape = "none")]
struct DispatchTemplate<'a> {
    runtime: &'a str,
    routes: &'a [Route],
    route_literal: String,
    route_doc: String,
}

/// Render the dispatch module for `schema`, serving it at `route_path`.
pub fn render(
    schema: &Schema,
    options: &ServerOptions,
    route_path: &str,
) -> Result<String, CodegenError> {
    let table = RouteTable::build(schema, options);
    let template = DispatchTemplate {
        runtime: &options.runtime_crate,
        routes: &table.routes,
        route_literal: format!("{route_path:?}"),
        route_doc: format!("`{route_path}`"),
    };
    let mut output = template
        .render()
        .map_err(|e| CodegenError::Rendering(e.to_string()))?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn action_route(
    action: &ActionDefinition,
    schema: &Schema,
    options: &ServerOptions,
) -> ActionRoute {
    let runtime = &options.runtime_crate;
    let request = request_type(&action.request_type, schema, options);
    let target = item_path(options, &action.location.module, &action.name);

    let call = match (action.is_async, action.fallible) {
        (false, true) => format!("{runtime}::invoke(envelope, |req: {request}| {target}(req))"),
        (false, false) => format!(
            "{runtime}::invoke(envelope, |req: {request}| {{\n            \
             Ok::<_, std::convert::Infallible>({target}(req))\n        }})"
        ),
        (true, true) => {
            format!("{runtime}::invoke_async(envelope, |req: {request}| {target}(req)).await")
        }
        (true, false) => format!(
            "{runtime}::invoke_async(envelope, |req: {request}| async move {{\n            \
             Ok::<_, std::convert::Infallible>({target}(req).await)\n        }})\n        .await"
        ),
    };

    let comment = action
        .description
        .as_deref()
        .map(|text| {
            text.lines()
                .map(|line| {
                    if line.is_empty() {
                        "//".to_string()
                    } else {
                        format!("// {line}")
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    ActionRoute {
        key: format!("{:?}", action.name),
        call,
        comment,
    }
}

/// Scalars are spelled as-is; structs by their path in the declaring module.
fn request_type(name: &str, schema: &Schema, options: &ServerOptions) -> String {
    match name {
        "str" => "String".to_string(),
        scalar if type_map::is_scalar(scalar) => scalar.to_string(),
        other => {
            let module = schema
                .structs
                .get(other)
                .map(|def| def.location.module.as_str())
                .unwrap_or_default();
            item_path(options, module, other)
        }
    }
}

/// `{actions_path}::{module}::{name}`, with keywords written as raw identifiers.
fn item_path(options: &ServerOptions, module: &str, name: &str) -> String {
    let mut path = options.actions_path.trim_end_matches("::").to_string();
    for segment in module.split("::").filter(|segment| !segment.is_empty()) {
        path.push_str("::");
        path.push_str(&rust_ident(segment));
    }
    path.push_str("::");
    path.push_str(&rust_ident(name));
    path
}

/// `name` as it must be spelled in Rust source: keywords need the `r#` prefix.
fn rust_ident(name: &str) -> String {
    if syn::parse_str::<syn::Ident>(name).is_ok() {
        name.to_string()
    } else {
        format!("r#{name}")
    }
}
