//! Generator configuration.
//!
//! Everything the pipeline needs to know about where to read declarations, where to
//! write the two artifacts, and which transport endpoint they share. Deserializes from
//! the `kebab-case` TOML the CLI loads; every key is optional.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use heck::{ToLowerCamelCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

use crate::codegen::CodegenError;

fn default_source_root() -> PathBuf {
    PathBuf::from("src/actions")
}

fn default_client_out() -> PathBuf {
    PathBuf::from("web/actions.ts")
}

fn default_server_out() -> PathBuf {
    PathBuf::from("src/generated/router.rs")
}

fn default_endpoint() -> String {
    "/api/actions".to_string()
}

fn default_marker() -> String {
    "@action".to_string()
}

fn default_actions_path() -> String {
    "crate::actions".to_string()
}

fn default_runtime_crate() -> String {
    "actionwire_runtime".to_string()
}

/// Naming convention struct fields must follow on the wire.
///
/// The generator never renames a field on its own: client properties always carry the
/// name serde uses. A field without a serde rename whose Rust name doesn't already match
/// this case is reported as a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCase {
    /// Rust field name as written (serde's default wire name)
    #[default]
    Preserve,
    /// Lower-cased field name
    Lower,
    /// lowerCamelCase field name
    Camel,
}

impl FieldCase {
    pub fn apply(self, name: &str) -> String {
        match self {
            FieldCase::Preserve => name.to_string(),
            FieldCase::Lower => name.to_lowercase(),
            FieldCase::Camel => name.to_lower_camel_case(),
        }
    }

    /// The `#[serde(rename_all)]` rule producing this case, if any.
    pub fn serde_rule(self) -> Option<&'static str> {
        match self {
            FieldCase::Preserve => None,
            FieldCase::Lower => Some("lowercase"),
            FieldCase::Camel => Some("camelCase"),
        }
    }
}

impl FromStr for FieldCase {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(FieldCase::Preserve),
            "lower" | "lowercase" => Ok(FieldCase::Lower),
            "camel" | "camelcase" => Ok(FieldCase::Camel),
            other => Err(CodegenError::Config(format!(
                "unknown field case '{other}' (expected preserve, lower, or camel)"
            ))),
        }
    }
}

impl fmt::Display for FieldCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldCase::Preserve => write!(f, "preserve"),
            FieldCase::Lower => write!(f, "lower"),
            FieldCase::Camel => write!(f, "camel"),
        }
    }
}

/// How action names become exported client binding names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingCase {
    /// `get_user` → `getUser`
    #[default]
    Camel,
    /// `get_user` → `get_user`
    Preserve,
}

impl BindingCase {
    pub fn apply(self, name: &str) -> String {
        match self {
            BindingCase::Camel => name.to_lower_camel_case(),
            BindingCase::Preserve => name.to_string(),
        }
    }
}

impl FromStr for BindingCase {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "camel" | "camelcase" => Ok(BindingCase::Camel),
            "preserve" => Ok(BindingCase::Preserve),
            other => Err(CodegenError::Config(format!(
                "unknown binding case '{other}' (expected camel or preserve)"
            ))),
        }
    }
}

impl fmt::Display for BindingCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingCase::Camel => write!(f, "camel"),
            BindingCase::Preserve => write!(f, "preserve"),
        }
    }
}

/// Naming conventions for the TypeScript client module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClientOptions {
    pub field_case: FieldCase,
    pub binding_case: BindingCase,
}

/// Paths the generated Rust dispatch module uses to reach its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerOptions {
    /// Module path of the source root. Declarations in nested files are reached through
    /// their own module below it (`crate::actions::users::get_user`).
    #[serde(default = "default_actions_path")]
    pub actions_path: String,

    /// Crate name the generated module imports `Envelope`, `invoke`, etc. from.
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            actions_path: default_actions_path(),
            runtime_crate: default_runtime_crate(),
        }
    }
}

/// Top-level configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Directory scanned (recursively) for `*.rs` declaration files.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Destination of the TypeScript client module.
    #[serde(default = "default_client_out")]
    pub client_out: PathBuf,

    /// Destination of the Rust dispatch module.
    #[serde(default = "default_server_out")]
    pub server_out: PathBuf,

    /// Transport endpoint: a path (`/api/actions`) or an absolute URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Doc comment token marking a function as an action.
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default)]
    pub client: ClientOptions,

    #[serde(default)]
    pub server: ServerOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            client_out: default_client_out(),
            server_out: default_server_out(),
            endpoint: default_endpoint(),
            marker: default_marker(),
            client: ClientOptions::default(),
            server: ServerOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Reject configurations that can only produce broken or clobbered output.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.endpoint.trim().is_empty() {
            return Err(CodegenError::Config("endpoint must not be empty".into()));
        }
        if self.marker.trim().is_empty() || self.marker.contains('\n') {
            return Err(CodegenError::Config(
                "marker must be a non-empty single-line token".into(),
            ));
        }
        if self.client_out == self.server_out {
            return Err(CodegenError::Config(format!(
                "client-out and server-out both point at '{}'",
                self.client_out.display()
            )));
        }
        if self.server.actions_path.trim().is_empty() {
            return Err(CodegenError::Config(
                "server.actions-path must not be empty".into(),
            ));
        }
        if self.server.runtime_crate.to_snake_case() != self.server.runtime_crate {
            return Err(CodegenError::Config(format!(
                "server.runtime-crate '{}' is not a valid crate identifier",
                self.server.runtime_crate
            )));
        }
        self.route_path().map(|_| ())
    }

    /// Path component of the endpoint, used for the server-side route.
    pub fn route_path(&self) -> Result<String, CodegenError> {
        let endpoint = self.endpoint.trim();
        if endpoint.starts_with('/') {
            return Ok(endpoint.to_string());
        }
        let parsed = url::Url::parse(endpoint).map_err(|e| {
            CodegenError::Config(format!(
                "endpoint '{endpoint}' is neither an absolute path nor a URL: {e}"
            ))
        })?;
        Ok(parsed.path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.source_root, PathBuf::from("src/actions"));
        assert_eq!(config.endpoint, "/api/actions");
        assert_eq!(config.marker, "@action");
        assert_eq!(config.client.field_case, FieldCase::Preserve);
        assert_eq!(config.client.binding_case, BindingCase::Camel);
        assert_eq!(config.server.actions_path, "crate::actions");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
source-root = "backend/actions"
client-out = "frontend/src/api.ts"
server-out = "backend/src/router.rs"
endpoint = "https://api.example.com/rpc"

[client]
field-case = "lower"
binding-case = "preserve"

[server]
actions-path = "crate::handlers"
"#;
        let config: GeneratorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source_root, PathBuf::from("backend/actions"));
        assert_eq!(config.client.field_case, FieldCase::Lower);
        assert_eq!(config.client.binding_case, BindingCase::Preserve);
        assert_eq!(config.server.actions_path, "crate::handlers");
        assert_eq!(config.server.runtime_crate, "actionwire_runtime");
        assert_eq!(config.marker, "@action");
        assert_eq!(config.route_path().unwrap(), "/rpc");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: GeneratorConfig = toml::from_str("endpoint = \"/rpc\"").unwrap();
        assert_eq!(config.endpoint, "/rpc");
        assert_eq!(config.client_out, PathBuf::from("web/actions.ts"));
        assert_eq!(config.client, ClientOptions::default());
    }

    #[test]
    fn test_validate_rejects_same_output_paths() {
        let config = GeneratorConfig {
            server_out: PathBuf::from("web/actions.ts"),
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("both point at"));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint_and_marker() {
        let config = GeneratorConfig {
            endpoint: "  ".into(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            marker: String::new(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_endpoint() {
        let config = GeneratorConfig {
            endpoint: "api/actions".into(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(CodegenError::Config(_))));
    }

    #[test]
    fn test_case_parsing() {
        assert_eq!("camel".parse::<FieldCase>().unwrap(), FieldCase::Camel);
        assert_eq!("LOWER".parse::<FieldCase>().unwrap(), FieldCase::Lower);
        assert!("kebab".parse::<FieldCase>().is_err());
        assert_eq!(
            "preserve".parse::<BindingCase>().unwrap(),
            BindingCase::Preserve
        );
        assert!("snake".parse::<BindingCase>().is_err());
    }

    #[test]
    fn test_case_application() {
        assert_eq!(FieldCase::Preserve.apply("user_id"), "user_id");
        assert_eq!(FieldCase::Lower.apply("UserID"), "userid");
        assert_eq!(FieldCase::Camel.apply("user_id"), "userId");
        assert_eq!(BindingCase::Camel.apply("get_user"), "getUser");
        assert_eq!(BindingCase::Preserve.apply("get_user"), "get_user");
        assert_eq!(FieldCase::Camel.serde_rule(), Some("camelCase"));
        assert_eq!(FieldCase::Preserve.serde_rule(), None);
    }
}
