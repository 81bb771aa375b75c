use std::path::Path;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
};

const THEME: &str = "base16-ocean.dark";

/// Syntax highlighting for the revision being viewed, chosen from its label.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    syntax_name: Option<String>,
}

impl SyntaxHighlighter {
    pub fn for_label(label: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_nonewlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(THEME).unwrap_or_default();
        let syntax_name = detect_syntax(&syntax_set, label).map(|s| s.name.clone());

        Self {
            syntax_set,
            theme,
            syntax_name,
        }
    }

    pub fn syntax_name(&self) -> Option<&str> {
        self.syntax_name.as_deref()
    }

    pub fn highlight<'a>(&self, content: &'a str) -> Vec<Span<'a>> {
        let syntax = self
            .syntax_name
            .as_deref()
            .and_then(|name| self.syntax_set.find_syntax_by_name(name));
        let Some(syntax) = syntax else {
            return vec![Span::raw(content)];
        };

        // Rows are highlighted one at a time, so multi-line constructs do not
        // carry state between them.
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        match highlighter.highlight_line(content, &self.syntax_set) {
            Ok(ranges) => ranges
                .into_iter()
                .map(|(style, text)| Span::styled(text, syntect_style_to_ratatui(style)))
                .collect(),
            Err(_) => vec![Span::raw(content)],
        }
    }
}

fn detect_syntax<'s>(syntax_set: &'s SyntaxSet, label: &str) -> Option<&'s SyntaxReference> {
    let extension = Path::new(label).extension().and_then(|ext| ext.to_str())?;
    match extension {
        // Config formats that the default syntax set lacks or names differently
        "yml" | "yaml" => syntax_set.find_syntax_by_extension("yaml"),
        "json" | "jsonc" => syntax_set.find_syntax_by_extension("json"),
        "conf" | "cfg" | "ini" | "properties" | "toml" => syntax_set
            .find_syntax_by_extension("ini")
            .or_else(|| syntax_set.find_syntax_by_extension("sh")),
        "env" => syntax_set.find_syntax_by_extension("sh"),
        other => syntax_set.find_syntax_by_extension(other),
    }
}

fn syntect_style_to_ratatui(syntect_style: SyntectStyle) -> Style {
    let fg_color = Color::Rgb(
        syntect_style.foreground.r,
        syntect_style.foreground.g,
        syntect_style.foreground.b,
    );

    let mut style = Style::default().fg(fg_color);

    if syntect_style.font_style.contains(FontStyle::BOLD) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if syntect_style.font_style.contains(FontStyle::ITALIC) {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if syntect_style.font_style.contains(FontStyle::UNDERLINE) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}
