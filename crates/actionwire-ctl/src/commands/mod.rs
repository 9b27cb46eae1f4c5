//! Command handlers for the actionwire CLI.
//!
//! Each handler receives a fully resolved [`GeneratorConfig`](actionwire_sdk::GeneratorConfig)
//! and delegates to `actionwire-sdk`.

pub(crate) mod check;
pub(crate) mod generate;
pub(crate) mod schema;

pub(crate) use check::handle_check_command;
pub(crate) use generate::handle_generate_command;
pub(crate) use schema::{handle_schema_command, SchemaFormat};
