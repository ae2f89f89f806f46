use crate::application::DisplaySurface;
use crate::domain::Role;

/// Renders GitHub-flavoured Markdown. Collapsible groups become
/// `<details>` blocks and code becomes fenced blocks.
#[derive(Debug, Default)]
pub struct MarkdownSurface {
    buf: String,
    in_list: bool,
}

impl MarkdownSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    /// Start a block-level element, closing any open list first.
    fn block(&mut self, content: &str) {
        self.close_list();
        self.buf.push_str(content);
        self.buf.push_str("\n\n");
    }

    fn list_item(&mut self, content: &str) {
        self.in_list = true;
        self.buf.push_str("- ");
        self.buf.push_str(content);
        self.buf.push('\n');
    }

    fn close_list(&mut self) {
        if self.in_list {
            self.buf.push('\n');
            self.in_list = false;
        }
    }
}

impl DisplaySurface for MarkdownSurface {
    fn begin_entry(&mut self, role: Role) {
        self.block(&format!("**{}:**", role.label()));
    }

    fn end_entry(&mut self) {
        self.close_list();
    }

    fn text(&mut self, text: &str) {
        self.block(text);
    }

    fn field(&mut self, label: &str, value: &str) {
        self.block(&format!("**{label}:** {value}"));
    }

    fn begin_group(&mut self, title: &str, expanded: bool) {
        let open = if expanded { " open" } else { "" };
        self.block(&format!("<details{open}>\n<summary>{title}</summary>"));
    }

    fn end_group(&mut self) {
        self.block("</details>");
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            self.list_item(item);
        }
    }

    fn separator(&mut self) {
        self.block("---");
    }

    fn code_block(&mut self, language: &str, code: &str) {
        self.block(&format!("`{language}`"));
        let code = code.trim_end_matches('\n');
        self.block(&format!("```{language}\n{code}\n```"));
    }

    fn concept(&mut self, concept: &str, description: &str) {
        self.list_item(&format!("**{concept}:** {description}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_lists() {
        let mut surface = MarkdownSurface::new();
        surface.begin_group("Key Differences", true);
        surface.bullets(&["mutable".to_string(), "immutable".to_string()]);
        surface.end_group();

        assert_eq!(
            surface.into_string(),
            "<details open>\n<summary>Key Differences</summary>\n\n- mutable\n- immutable\n\n</details>\n\n"
        );
    }

    #[test]
    fn test_code_block_and_concepts() {
        let mut surface = MarkdownSurface::new();
        surface.code_block("python", "print('hi')\n");
        surface.concept("print", "writes a line");
        surface.concept("quotes", "either kind works");
        surface.end_entry();

        assert_eq!(
            surface.into_string(),
            "`python`\n\n```python\nprint('hi')\n```\n\n- **print:** writes a line\n- **quotes:** either kind works\n\n"
        );
    }
}
