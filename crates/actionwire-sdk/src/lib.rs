//! Schema-driven generation of typed action bindings.
//!
//! This crate scans a directory of Rust declarations for record structs and
//! `@action`-annotated functions, builds an action schema from them, and renders two
//! artifacts that stay in lockstep: a TypeScript client module and a Rust dispatch
//! module for the server.
//!
//! # Modules
//!
//! - [`codegen`]: Type mapping, declaration extraction, validation, and rendering
//! - [`config`]: Generator configuration (paths, endpoint, naming conventions)
//! - [`pipeline`]: Extract → validate → render → atomically write, in one call
//!
//! # Example
//!
//! ```rust,no_run
//! use actionwire_sdk::config::GeneratorConfig;
//! use actionwire_sdk::pipeline;
//!
//! let config = GeneratorConfig::default();
//! let summary = pipeline::run(&config).expect("generation failed");
//! println!("{} actions, {} structs", summary.actions, summary.structs);
//! ```

pub mod codegen;
pub mod config;
pub mod pipeline;

pub use codegen::CodegenError;
pub use config::GeneratorConfig;
