//! Generator configuration as seen by the CLI: a discovered `.actionwire.toml` with
//! command-line overrides layered on top.

pub(crate) mod loader;

use std::path::{Path, PathBuf};

use actionwire_sdk::config::{BindingCase, FieldCase};
use actionwire_sdk::GeneratorConfig;

/// Flags and environment variables that replace individual config-file values.
#[derive(Debug, Default, Clone, clap::Args)]
pub(crate) struct ConfigOverrides {
    /// Directory scanned for declaration files
    #[arg(long, env = "ACTIONWIRE_SOURCE_ROOT", global = true)]
    pub source_root: Option<PathBuf>,

    /// Output path of the TypeScript client module
    #[arg(long, env = "ACTIONWIRE_CLIENT_OUT", global = true)]
    pub client_out: Option<PathBuf>,

    /// Output path of the Rust dispatch module
    #[arg(long, env = "ACTIONWIRE_SERVER_OUT", global = true)]
    pub server_out: Option<PathBuf>,

    /// Endpoint path or absolute URL the client posts to
    #[arg(long, env = "ACTIONWIRE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Doc comment token that marks an action
    #[arg(long, global = true)]
    pub marker: Option<String>,

    /// Client property casing: preserve, lower, or camel
    #[arg(long, global = true)]
    pub field_case: Option<FieldCase>,

    /// Client binding casing: camel or preserve
    #[arg(long, global = true)]
    pub binding_case: Option<BindingCase>,
}

impl ConfigOverrides {
    pub(crate) fn apply(self, config: &mut GeneratorConfig) {
        if let Some(source_root) = self.source_root {
            config.source_root = source_root;
        }
        if let Some(client_out) = self.client_out {
            config.client_out = client_out;
        }
        if let Some(server_out) = self.server_out {
            config.server_out = server_out;
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(marker) = self.marker {
            config.marker = marker;
        }
        if let Some(field_case) = self.field_case {
            config.client.field_case = field_case;
        }
        if let Some(binding_case) = self.binding_case {
            config.client.binding_case = binding_case;
        }
    }
}

/// Load the explicit config file (or the discovered one), then apply overrides.
pub(crate) fn resolve_config(
    explicit: Option<&Path>,
    overrides: ConfigOverrides,
) -> anyhow::Result<GeneratorConfig> {
    let mut config = match explicit {
        Some(path) => loader::load_config_file(path)?,
        None => loader::load_cli_config(),
    };
    overrides.apply(&mut config);
    tracing::debug!(?config, "Resolved generator config");
    Ok(config)
}
