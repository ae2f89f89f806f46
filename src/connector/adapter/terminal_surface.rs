use crossterm::style::Stylize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use crate::application::DisplaySurface;
use crate::domain::Role;

pub const DEFAULT_THEME: &str = "base16-ocean.dark";
const INDENT: &str = "  ";
const SEPARATOR_WIDTH: usize = 40;
const RESET: &str = "\x1b[0m";

/// Renders into a `String` of ANSI-styled terminal text.
///
/// Groups are shown expanded and indented; code is highlighted with syntect.
/// With colour disabled the output is plain text with the same layout.
pub struct TerminalSurface {
    buf: String,
    depth: usize,
    color: bool,
    syntaxes: SyntaxSet,
    theme: Option<Theme>,
}

impl TerminalSurface {
    pub fn new(color: bool) -> Self {
        let theme = if color {
            ThemeSet::load_defaults().themes.remove(DEFAULT_THEME)
        } else {
            None
        };
        Self {
            buf: String::new(),
            depth: 0,
            color,
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Take everything rendered so far, leaving the surface empty.
    pub fn take(&mut self) -> String {
        self.depth = 0;
        std::mem::take(&mut self.buf)
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn indent(&self) -> String {
        INDENT.repeat(self.depth)
    }

    fn line(&mut self, content: &str) {
        let indent = self.indent();
        self.buf.push_str(&indent);
        self.buf.push_str(content);
        self.buf.push('\n');
    }

    fn bold(&self, s: &str) -> String {
        if self.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.color {
            s.dark_grey().to_string()
        } else {
            s.to_string()
        }
    }

    fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let theme = self.theme.as_ref()?;
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let prefix = format!("{}{} ", self.indent(), self.dim("│"));
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut out = String::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &self.syntaxes).ok()?;
            out.push_str(&prefix);
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
            out.push_str(RESET);
            if !line.ends_with('\n') {
                out.push('\n');
            }
        }
        Some(out)
    }
}

impl DisplaySurface for TerminalSurface {
    fn begin_entry(&mut self, role: Role) {
        let header = format!("{} ›", role.label());
        let header = if !self.color {
            header
        } else {
            match role {
                Role::User => header.cyan().bold().to_string(),
                Role::Agent => header.green().bold().to_string(),
            }
        };
        self.depth = 0;
        self.line(&header);
        self.depth = 1;
    }

    fn end_entry(&mut self) {
        self.depth = 0;
        self.buf.push('\n');
    }

    fn text(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    fn field(&mut self, label: &str, value: &str) {
        let label = self.bold(&format!("{label}:"));
        self.line(&format!("{label} {value}"));
    }

    fn begin_group(&mut self, title: &str, expanded: bool) {
        let marker = if expanded { "▾" } else { "▸" };
        let title = self.bold(title);
        self.line(&format!("{marker} {title}"));
        self.depth += 1;
    }

    fn end_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            self.line(&format!("• {item}"));
        }
    }

    fn separator(&mut self) {
        let rule = self.dim(&"─".repeat(SEPARATOR_WIDTH));
        self.line(&rule);
    }

    fn code_block(&mut self, language: &str, code: &str) {
        let header = format!("┌─ {language}");
        let header = if self.color {
            header.dark_grey().bold().to_string()
        } else {
            header
        };
        self.line(&header);

        match self.highlight(language, code) {
            Some(highlighted) => self.buf.push_str(&highlighted),
            None => {
                for line in code.lines() {
                    let bar = self.dim("│");
                    self.line(&format!("{bar} {line}"));
                }
            }
        }

        let footer = self.dim("└─");
        self.line(&footer);
    }

    fn concept(&mut self, concept: &str, description: &str) {
        let concept = self.bold(&format!("{concept}:"));
        self.line(&format!("• {concept} {description}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_layout_indents_groups() {
        let mut surface = TerminalSurface::new(false);
        surface.begin_entry(Role::Agent);
        surface.begin_group("Details", true);
        surface.field("Backend", "mock");
        surface.end_group();
        surface.bullets(&["a".to_string()]);
        surface.end_entry();

        assert_eq!(
            surface.into_string(),
            "Agent ›\n  ▾ Details\n    Backend: mock\n  • a\n\n"
        );
    }

    #[test]
    fn test_plain_code_block_has_header_and_every_line() {
        let mut surface = TerminalSurface::new(false);
        surface.code_block("python", "x = 1\nprint(x)");
        surface.concept("print", "writes to stdout");

        let out = surface.into_string();
        assert!(out.starts_with("┌─ python\n"));
        assert!(out.contains("│ x = 1\n"));
        assert!(out.contains("│ print(x)\n"));
        assert!(out.contains("• print: writes to stdout"));
    }

    #[test]
    fn test_colored_code_is_highlighted() {
        let mut surface = TerminalSurface::new(true);
        surface.code_block("rust", "fn main() {}\n");

        let out = surface.into_string();
        assert!(out.contains("\x1b["));
        assert!(out.contains("main"));
    }

    #[test]
    fn test_take_resets_buffer() {
        let mut surface = TerminalSurface::new(false);
        surface.text("hello");
        assert_eq!(surface.take(), "hello\n");
        assert_eq!(surface.take(), "");
    }
}
