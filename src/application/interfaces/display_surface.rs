use crate::domain::Role;

/// Where rendered replies are drawn.
///
/// The render use case only decides *what* to show; a surface decides how a
/// label, a group or a code block looks on a particular output.
pub trait DisplaySurface {
    fn begin_entry(&mut self, role: Role);

    fn end_entry(&mut self);

    /// Literal text, shown as-is.
    fn text(&mut self, text: &str);

    /// An inline `Label: value` line.
    fn field(&mut self, label: &str, value: &str);

    /// Open a collapsible group. Groups nest and must be closed with [`Self::end_group`].
    fn begin_group(&mut self, title: &str, expanded: bool);

    fn end_group(&mut self);

    fn bullets(&mut self, items: &[String]);

    fn separator(&mut self);

    /// Language header followed by the highlighted code.
    fn code_block(&mut self, language: &str, code: &str);

    /// One `**concept:** description` bullet.
    fn concept(&mut self, concept: &str, description: &str);
}
