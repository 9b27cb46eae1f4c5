//! # actionwire
//!
//! Generates a typed TypeScript client and a Rust dispatch module from
//! `@action`-annotated Rust functions.
//!
//! ## Commands
//!
//! - `actionwire generate` - Extract, validate, and write both artifacts
//! - `actionwire check` - Validate declarations without writing
//! - `actionwire schema` - Print the extracted schema as JSON or YAML

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use actionwire_sdk::CodegenError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cli_config::ConfigOverrides;
use commands::SchemaFormat;

#[derive(Debug, Parser)]
#[command(name = "actionwire", version)]
#[command(about = "Generate typed action bindings from annotated Rust functions", long_about = None)]
#[command(styles = output::clap_styles())]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config file (default: discover .actionwire.toml)
    #[arg(short, long, global = true, env = "ACTIONWIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract declarations and write the client and dispatch modules
    Generate {
        /// Print both artifacts instead of writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate declarations without writing anything
    Check,

    /// Print the extracted schema
    Schema {
        #[arg(long, value_enum, default_value_t = SchemaFormat::Json)]
        format: SchemaFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        output::error(format!("failed to initialize logging: {e}"));
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let directive = if verbose {
        "actionwire=debug"
    } else {
        "actionwire=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli_config::resolve_config(cli.config.as_deref(), cli.overrides)?;
    match cli.command {
        Commands::Generate { dry_run } => commands::handle_generate_command(&config, dry_run),
        Commands::Check => commands::handle_check_command(&config),
        Commands::Schema { format } => commands::handle_schema_command(&config, format),
    }
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<CodegenError>() {
        Some(CodegenError::Validation(report)) => {
            let count = report.len();
            output::error(format!(
                "{count} schema {} found",
                if count == 1 { "violation" } else { "violations" }
            ));
            for violation in report.violations() {
                output::error_item(violation);
            }
        }
        _ => output::error(format!("{err:#}")),
    }
}
