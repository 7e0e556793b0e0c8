//! ANSI color support for terminal output

use std::io::{self, Write};

/// ANSI escape sequences
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    /// Restores only the default foreground color
    pub const DEFAULT_FG: &str = "\x1b[39m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Foreground colors used by the XML renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Processing instructions / declarations
    Green,
    /// Element tags
    Magenta,
    /// Attribute names and their quotes
    Yellow,
    /// Attribute values
    Cyan,
}

impl Color {
    pub fn code(self) -> &'static str {
        match self {
            Color::Green => ansi::GREEN,
            Color::Magenta => ansi::MAGENTA,
            Color::Yellow => ansi::YELLOW,
            Color::Cyan => ansi::CYAN,
        }
    }
}

/// Decide whether output is colored.
///
/// A terminal or an explicit `color` request turns color on; `no_color`
/// always turns it off.
pub fn resolve_color(is_terminal: bool, color: bool, no_color: bool) -> bool {
    let use_color = is_terminal || color;
    use_color && !no_color
}

/// Check whether stdout is attached to a terminal
pub fn stdout_is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Writes text to a sink, interleaving color escapes when enabled.
///
/// Tracks the color that is currently open so the renderer's
/// open/reset sequence can be inspected without a terminal. When disabled,
/// color operations write nothing and leave the state untouched.
pub struct Painter<'w, W: Write + ?Sized> {
    out: &'w mut W,
    enabled: bool,
    active: Option<Color>,
}

impl<'w, W: Write + ?Sized> Painter<'w, W> {
    pub fn new(out: &'w mut W, enabled: bool) -> Self {
        Painter { out, enabled, active: None }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The color opened by the last `paint` not yet followed by a reset
    pub fn active(&self) -> Option<Color> {
        self.active
    }

    /// Open a color. Opening while another color is active simply switches.
    pub fn paint(&mut self, color: Color) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.out.write_all(color.code().as_bytes())?;
        self.active = Some(color);
        Ok(())
    }

    /// Reset all attributes
    pub fn reset(&mut self) -> io::Result<()> {
        self.reset_with(ansi::RESET)
    }

    /// Reset the foreground color only (used after closing tags)
    pub fn reset_foreground(&mut self) -> io::Result<()> {
        self.reset_with(ansi::DEFAULT_FG)
    }

    fn reset_with(&mut self, code: &str) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.out.write_all(code.as_bytes())?;
        self.active = None;
        Ok(())
    }

    /// Write literal text in whatever color is active
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }
}
