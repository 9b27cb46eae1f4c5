//! Runtime support for generated actionwire dispatch modules.
//!
//! A generated module matches on [`Envelope::function`] and hands each arm to
//! [`invoke`] or [`invoke_async`], which decode the arguments, call the action, and
//! encode its result. Failures surface as [`DispatchError`], which renders itself as an
//! HTTP response.
//!
//! `axum` and `serde_json` are re-exported so generated code only needs this crate.

mod envelope;
mod error;
mod invoke;

pub use envelope::Envelope;
pub use error::{DispatchError, DispatchErrorKind};
pub use invoke::{invoke, invoke_async};

pub use axum;
pub use serde_json;
