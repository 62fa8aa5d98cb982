//! Reduce rendered plan markup to plain text for the terminal

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|ul|ol|tr|section)\s*>").expect("valid regex")
});
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li[^>]*>").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Convert an HTML fragment into readable plain text
///
/// Block-level closers become line breaks, list items get a bullet and all
/// other tags are dropped. Common entities are decoded.
pub fn to_plain_text(markup: &str) -> String {
    let text = LINE_BREAK.replace_all(markup, "\n");
    let text = LIST_ITEM.replace_all(&text, "• ");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let joined = lines.join("\n");
    BLANK_RUN.replace_all(joined.trim(), "\n\n").into_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn headings_and_lists_become_lines() {
        let html = "<h2>Day 1</h2><ul><li>Read intro</li><li>Practice</li></ul>";
        assert_eq!(to_plain_text(html), "Day 1\n• Read intro\n• Practice");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(to_plain_text("<p>x &lt; y &amp;&amp; y &gt; z</p>"), "x < y && y > z");
    }

    #[test]
    fn blank_runs_collapse() {
        let html = "<p>a</p><br><br><br><p>b</p>";
        assert_eq!(to_plain_text(html), "a\n\nb");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(to_plain_text("Just text"), "Just text");
    }
}
