//! Shared presentation helpers for summary sections.

use owo_colors::OwoColorize;

/// Section heading, highlighted when `color` is set.
pub fn heading(title: &str, color: bool) -> String {
    if color {
        title.yellow().bold().to_string()
    } else {
        title.to_string()
    }
}

/// Append a heading followed by one `  - item` line per item. Nothing is
/// written for an empty list.
pub fn push_list<I, S>(out: &mut String, title: &str, items: I, color: bool)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return;
    }
    out.push('\n');
    out.push_str(&heading(title, color));
    for item in items {
        out.push_str("\n  - ");
        out.push_str(item.as_ref());
    }
}
