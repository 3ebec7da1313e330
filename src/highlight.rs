use console::colors_enabled;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Fence tags whose syntect token differs from the tag itself.
const TAG_ALIASES: &[(&str, &str)] = &[
    ("javascript", "js"),
    ("node", "js"),
    ("shell", "sh"),
    ("zsh", "sh"),
    ("golang", "go"),
    ("c++", "cpp"),
];

const THEME: &str = "base16-ocean.dark";

/// Terminal renderer for code blocks.
///
/// Resolves a fence language tag against syntect's default syntax set;
/// anything unknown (or an absent tag) renders as plain text. Rendering
/// never fails, and is skipped entirely when the terminal has colors
/// disabled.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(THEME).unwrap_or_default();
        Self { syntaxes, theme }
    }

    /// Render `code` for the terminal, highlighted according to
    /// `language_tag`.
    pub fn render(&self, code: &str, language_tag: Option<&str>) -> String {
        if !colors_enabled() {
            return code.to_string();
        }

        let syntax = self.resolve(language_tag);
        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(code.len());

        for line in LinesWithEndings::from(code) {
            match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
                Err(_) => out.push_str(line),
            }
        }

        out.push_str("\x1b[0m");
        out
    }

    fn resolve(&self, language_tag: Option<&str>) -> &SyntaxReference {
        language_tag
            .map(normalize_tag)
            .and_then(|tag| self.syntaxes.find_syntax_by_token(tag))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_tag(tag: &str) -> &str {
    TAG_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(tag))
        .map(|(_, token)| *token)
        .unwrap_or(tag)
}
