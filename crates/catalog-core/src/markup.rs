//! Product description markup.
//!
//! Descriptions arrive as pre-formatted HTML from the content graph. They are
//! passed through an allow-listed sanitizer before rendering, then ordered
//! lists receive the standard list class.

use std::collections::HashSet;

/// Class applied to every `<ol>` in a rendered description.
pub const ORDERED_LIST_CLASS: &str = "list-decimal pl-5";

const DESCRIPTION_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "i", "li", "ol", "p", "pre", "s", "small", "span", "strong", "sub", "sup", "table", "tbody",
    "td", "th", "thead", "tr", "u", "ul",
];

/// Allow-list of tags kept in rendered markup.
#[derive(Debug, Clone)]
pub struct MarkupPolicy {
    tags: HashSet<&'static str>,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        Self::description()
    }
}

impl MarkupPolicy {
    /// Policy for product descriptions: text formatting, lists, tables, links.
    pub fn description() -> Self {
        Self {
            tags: DESCRIPTION_TAGS.iter().copied().collect(),
        }
    }

    /// Policy that keeps no tags at all, only text.
    pub fn plain() -> Self {
        Self {
            tags: HashSet::new(),
        }
    }

    /// Strip everything not on the allow-list. Scripts and styles are dropped
    /// with their content; event handler attributes are removed.
    pub fn sanitize(&self, html: &str) -> String {
        ammonia::Builder::default()
            .tags(self.tags.clone())
            .link_rel(Some("noopener noreferrer"))
            .clean(html)
            .to_string()
    }

    /// Sanitize a description and decorate its ordered lists.
    pub fn render(&self, html: &str) -> String {
        decorate_ordered_lists(&self.sanitize(html))
    }
}

/// Render a product description with the default policy.
pub fn render_description(html: &str) -> String {
    MarkupPolicy::description().render(html)
}

/// Reduce a description to plain text for terminals. Block ends become
/// line breaks; every tag is dropped.
pub fn plain_text(html: &str) -> String {
    let spaced = html
        .replace("</p>", "</p>\n")
        .replace("</li>", "</li>\n")
        .replace("<br>", "<br>\n");
    unescape_text(MarkupPolicy::plain().sanitize(&spaced).trim())
}

/// Undo the escaping the serializer applies to text nodes. `&amp;` goes
/// last so an escaped entity name stays literal.
fn unescape_text(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Add [`ORDERED_LIST_CLASS`] to every `<ol>` start tag.
///
/// Expects sanitized input, where `<ol` never already carries a class.
pub fn decorate_ordered_lists(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find("<ol") {
        let after = &rest[pos + 3..];
        out.push_str(&rest[..pos + 3]);
        if after.starts_with('>') || after.starts_with(char::is_whitespace) {
            out.push_str(" class=\"");
            out.push_str(ORDERED_LIST_CLASS);
            out.push('"');
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Decoration Tests ===

    #[test]
    fn test_decorate_plain_ol() {
        assert_eq!(
            decorate_ordered_lists("<ol><li>One</li></ol>"),
            r#"<ol class="list-decimal pl-5"><li>One</li></ol>"#
        );
    }

    #[test]
    fn test_decorate_every_ol() {
        let out =
            decorate_ordered_lists("<ol><li>a</li></ol><p>x</p><ol start=\"3\"><li>b</li></ol>");
        assert_eq!(out.matches(ORDERED_LIST_CLASS).count(), 2);
        assert!(out.contains(r#"<ol class="list-decimal pl-5" start="3">"#));
    }

    #[test]
    fn test_decorate_ignores_similar_tags() {
        assert_eq!(decorate_ordered_lists("<old>"), "<old>");
        assert_eq!(decorate_ordered_lists("<ul><li>x</li></ul>"), "<ul><li>x</li></ul>");
    }

    // === Sanitize Tests ===

    #[test]
    fn test_sanitize_drops_scripts() {
        let clean = MarkupPolicy::description().sanitize("<p>Hi</p><script>alert(1)</script>");
        assert_eq!(clean, "<p>Hi</p>");
    }

    #[test]
    fn test_sanitize_drops_event_handlers() {
        let clean = MarkupPolicy::description().sanitize(r#"<p onclick="steal()">Hi</p>"#);
        assert_eq!(clean, "<p>Hi</p>");
    }

    #[test]
    fn test_sanitize_keeps_text_of_unlisted_tag() {
        let clean = MarkupPolicy::description().sanitize("<p><font>kept</font></p>");
        assert_eq!(clean, "<p>kept</p>");
    }

    #[test]
    fn test_render_description() {
        let html = render_description("<ol class=\"evil\"><li>Step</li></ol><img src=x onerror=y>");
        assert_eq!(html, r#"<ol class="list-decimal pl-5"><li>Step</li></ol>"#);
    }

    // === Plain Text Tests ===

    #[test]
    fn test_plain_text_breaks_blocks() {
        assert_eq!(plain_text("<p>One</p><script>x</script><p>Two</p>"), "One\nTwo");
    }

    #[test]
    fn test_plain_text_lists() {
        assert_eq!(plain_text("<ol><li>A</li><li>B</li></ol>"), "A\nB");
    }

    #[test]
    fn test_plain_text_decodes_entities() {
        assert_eq!(plain_text("<p>Salt &amp; pepper &lt;3</p>"), "Salt & pepper <3");
        assert_eq!(plain_text("<p>a &gt; b</p>"), "a > b");
    }

    #[test]
    fn test_plain_text_keeps_escaped_entity_names() {
        assert_eq!(plain_text("<p>Write &amp;lt; for less-than</p>"), "Write &lt; for less-than");
    }
}
