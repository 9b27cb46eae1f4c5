//! Config file discovery and loading for `.actionwire.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.actionwire.toml` (project-local)
//! 2. `~/.config/actionwire.toml` (user-global)

use std::path::{Path, PathBuf};

use actionwire_sdk::GeneratorConfig;
use anyhow::Context;

const CONFIG_FILENAME: &str = ".actionwire.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "actionwire.toml";

/// Load config from the first discovered location, or return defaults.
pub(crate) fn load_cli_config() -> GeneratorConfig {
    if let Some(path) = find_config_file() {
        match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!(?path, "Loaded generator config");
                return config;
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(?path, %error, "Ignoring config file, using defaults");
            }
        }
    }
    GeneratorConfig::default()
}

/// Read and parse one config file. Unlike discovery, failures here are errors.
pub(crate) fn load_config_file(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use actionwire_sdk::config::{BindingCase, FieldCase};

    use super::*;

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
source-root = "server/actions"
client-out = "web/src/api.ts"
server-out = "server/src/rpc.rs"
endpoint = "https://api.example.com/rpc"

[client]
field-case = "camel"
binding-case = "preserve"

[server]
actions-path = "crate::rpc"
"#;
        let config: GeneratorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source_root, PathBuf::from("server/actions"));
        assert_eq!(config.client_out, PathBuf::from("web/src/api.ts"));
        assert_eq!(config.endpoint, "https://api.example.com/rpc");
        assert_eq!(config.marker, "@action");
        assert_eq!(config.client.field_case, FieldCase::Camel);
        assert_eq!(config.client.binding_case, BindingCase::Preserve);
        assert_eq!(config.server.actions_path, "crate::rpc");
        assert_eq!(config.server.runtime_crate, "actionwire_runtime");
    }

    #[test]
    fn test_parse_empty_config_is_default() {
        let config: GeneratorConfig = toml::from_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_config_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "endpoint = [").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config file"));
    }

    #[test]
    fn test_load_config_file_rejects_unknown_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[client]\nfield-case = \"shouting\"\n").unwrap();
        assert!(load_config_file(&path).is_err());
    }
}
