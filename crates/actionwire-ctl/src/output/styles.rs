//! Style constants and clap help styling configuration.

use anstyle::{AnsiColor, Color, Effects, Style};

/// Green: success messages.
pub(crate) const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Red: errors and violations.
pub(crate) const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

pub(crate) const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Bold: label names in "Label: value" pairs.
pub(crate) const LABEL: Style = Style::new().effects(Effects::BOLD);

/// Dimmed: file banners in dry-run output.
pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

/// Clap help styling in the same palette.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let accent = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)))
        .effects(Effects::BOLD);
    let literal = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

    clap::builder::Styles::styled()
        .header(accent)
        .usage(accent)
        .literal(literal)
        .placeholder(literal)
        .error(ERROR.effects(Effects::BOLD))
        .valid(SUCCESS)
        .invalid(WARNING)
}
