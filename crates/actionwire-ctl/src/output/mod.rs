//! Styled terminal output for `actionwire`.
//!
//! `anstyle` defines the palette and `anstream` strips it when stdout/stderr is not a
//! terminal, so piped output (`actionwire schema > schema.json`) stays plain.

mod styles;

use std::fmt::Display;
use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{DIM, ERROR, LABEL, SUCCESS, WARNING};

pub(crate) fn success(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{SUCCESS}✓{SUCCESS:#} {SUCCESS}{msg}{SUCCESS:#}").ok();
}

/// Print an error message to stderr.
pub(crate) fn error(msg: impl Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "{ERROR}✗ {msg}{ERROR:#}").ok();
}

/// Print a bulleted detail line to stderr, under an [`error`].
pub(crate) fn error_item(msg: impl Display) {
    let mut out = anstream::stderr().lock();
    writeln!(out, "  {ERROR}•{ERROR:#} {msg}").ok();
}

pub(crate) fn warning(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{WARNING}! {msg}{WARNING:#}").ok();
}

/// Print a labeled value ("  Label: value" with the label bolded).
pub(crate) fn label(name: impl Display, value: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {LABEL}{name}:{LABEL:#} {value}").ok();
}

pub(crate) fn dim(msg: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "{DIM}{msg}{DIM:#}").ok();
}

/// Print text verbatim, without a trailing newline of our own.
pub(crate) fn raw(text: &str) {
    let mut out = anstream::stdout().lock();
    write!(out, "{text}").ok();
}
