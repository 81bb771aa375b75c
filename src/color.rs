use crossterm::style::{Stylize, style};

/// What a piece of rendered text represents, so a colorizer can style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    LineNumber,
    Added,
    Removed,
    HunkHeader,
    FileHeader,
}

/// Styles rendered diff text for display.
pub trait Colorizer {
    fn paint(&self, paint: Paint, text: &str) -> String;
}

/// Inline ANSI escapes via crossterm. Honours `NO_COLOR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Colorizer for Ansi {
    fn paint(&self, paint: Paint, text: &str) -> String {
        match paint {
            Paint::LineNumber => style(text).dark_grey().to_string(),
            Paint::Added => style(text).green().to_string(),
            Paint::Removed => style(text).red().to_string(),
            Paint::HunkHeader => style(text).cyan().to_string(),
            Paint::FileHeader => style(text).bold().to_string(),
        }
    }
}

/// Leaves text untouched, for redirected or non-interactive output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Colorizer for Plain {
    fn paint(&self, _paint: Paint, text: &str) -> String {
        text.to_string()
    }
}

pub fn colorizer(enabled: bool) -> &'static dyn Colorizer {
    if enabled { &Ansi } else { &Plain }
}
