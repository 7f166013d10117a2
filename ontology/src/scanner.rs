//! Markup scanning primitives.
//!
//! The RiC-O source document is RDF/XML, but the extraction pass only ever
//! needs three shapes out of it: top-level element blocks for a known tag
//! name, a single attribute's quoted value, and tag-stripped inner text.
//! A compiled per-element pattern covers all three without a full XML
//! parser. Blocks that never close are simply not matched; absence of a
//! match is a normal outcome, not an error.

use regex::Regex;

/// One matched element block: the opening tag's raw attribute text plus the
/// inner content between the opening and closing tags.
#[derive(Debug, Clone)]
pub struct ElementBlock {
    /// Raw attribute text of the opening tag (undecoded, as written).
    pub attrs: String,
    /// Inner content between the opening and closing tag (undecoded).
    pub content: String,
}

/// A compiled matcher for `<name ...>...</name>` blocks.
///
/// Matching is case-insensitive and non-overlapping: scanning resumes after
/// the end of each whole match, so a same-named element nested inside a
/// matched block is never reported separately (first-match-wins).
#[derive(Debug)]
pub struct ElementPattern {
    block: Regex,
    direct_ref: Regex,
}

impl ElementPattern {
    /// Compiles a pattern for an exact (namespace-prefixed) element name,
    /// e.g. `owl:Class` or `rdfs:subClassOf`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::from_name_pattern(&regex::escape(name))
    }

    /// Compiles a pattern that matches the local element name under any
    /// namespace prefix, or none. Used for the vendor correspondence note,
    /// whose prefix varies between RiC-O releases.
    #[must_use]
    pub fn with_any_prefix(local: &str) -> Self {
        Self::from_name_pattern(&format!("(?:[A-Za-z0-9_-]+:)?{}", regex::escape(local)))
    }

    fn from_name_pattern(name: &str) -> Self {
        Self {
            block: compile(&format!(r"(?is)<{name}\b([^>]*)>(.*?)</{name}>")),
            direct_ref: compile(&format!(
                r#"(?is)<{name}\b[^>]*rdf:resource\s*=\s*"([^"]+)"[^>]*/?>"#
            )),
        }
    }

    /// Returns every matched block in document order.
    #[must_use]
    pub fn blocks(&self, document: &str) -> Vec<ElementBlock> {
        self.block
            .captures_iter(document)
            .map(|caps| ElementBlock {
                attrs: caps.get(1).map_or_else(String::new, |m| m.as_str().to_owned()),
                content: caps.get(2).map_or_else(String::new, |m| m.as_str().to_owned()),
            })
            .collect()
    }

    /// Returns the raw `rdf:resource` value of every element carrying the
    /// reference directly on its own tag (self-closing or not).
    #[must_use]
    pub fn direct_resource_refs(&self, text: &str) -> Vec<String> {
        self.direct_ref
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| decode_entities(m.as_str()))
            .collect()
    }
}

/// Extracts the first occurrence of `name="value"` from a tag's attribute
/// text. The attribute name is compared case-insensitively; the value is
/// entity-decoded.
#[must_use]
pub fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let pattern = compile(&format!(r#"(?i){}\s*=\s*"([^"]+)""#, regex::escape(name)));
    pattern
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str()))
}

/// Decodes the five standard markup escapes.
///
/// `&amp;` must be decoded last: decoding it first would turn a
/// double-encoded sequence such as `&amp;lt;` into `&lt;` and then a second
/// pass would corrupt it into `<`.
#[must_use]
pub fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.trim().to_owned();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_owned()
}

/// Strips embedded sub-tags, collapses whitespace runs to single spaces,
/// trims, and entity-decodes the result.
#[must_use]
pub fn strip_tags(value: &str) -> String {
    let without_tags = tag_pattern().replace_all(value, " ");
    let collapsed = without_tags.split_whitespace().collect::<Vec<_>>().join(" ");
    decode_entities(&collapsed)
}

fn tag_pattern() -> &'static Regex {
    static TAG: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    TAG.get_or_init(|| compile(r"<[^>]+>"))
}

// Every pattern in this module is assembled from literal fragments and
// `regex::escape`d names, so compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("element pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_capture_attrs_and_content() {
        let doc = r#"<owl:Class rdf:about="http://ex/A">inner</owl:Class>"#;
        let blocks = ElementPattern::new("owl:Class").blocks(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attrs, r#" rdf:about="http://ex/A""#);
        assert_eq!(blocks[0].content, "inner");
    }

    #[test]
    fn blocks_are_non_overlapping_first_match_wins() {
        // The inner closing tag ends the first block; the dangling outer
        // closer is not the start of anything.
        let doc = "<a:X>one<a:X>two</a:X>tail</a:X>";
        let blocks = ElementPattern::new("a:X").blocks(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "one<a:X>two");
    }

    #[test]
    fn unclosed_block_is_not_matched() {
        let doc = r#"<owl:Class rdf:about="http://ex/A">never closed"#;
        assert!(ElementPattern::new("owl:Class").blocks(doc).is_empty());
    }

    #[test]
    fn block_match_is_case_insensitive() {
        let doc = "<OWL:CLASS a=\"1\">x</owl:class>";
        assert_eq!(ElementPattern::new("owl:Class").blocks(doc).len(), 1);
    }

    #[test]
    fn any_prefix_matches_prefixed_and_bare_names() {
        let pattern = ElementPattern::with_any_prefix("RiCCMCorrespondingComponent");
        let doc = "<rico:RiCCMCorrespondingComponent>a</rico:RiCCMCorrespondingComponent>\
                   <RiCCMCorrespondingComponent>b</RiCCMCorrespondingComponent>";
        let blocks = pattern.blocks(doc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].content, "b");
    }

    #[test]
    fn attr_value_is_case_insensitive_first_wins() {
        let attrs = r#" RDF:ABOUT="http://ex/first" rdf:about="http://ex/second""#;
        assert_eq!(
            attr_value(attrs, "rdf:about").as_deref(),
            Some("http://ex/first")
        );
        assert_eq!(attr_value(attrs, "xml:lang"), None);
    }

    #[test]
    fn attr_value_decodes_entities() {
        let attrs = r#" rdf:about="http://ex/a?x=1&amp;y=2""#;
        assert_eq!(
            attr_value(attrs, "rdf:about").as_deref(),
            Some("http://ex/a?x=1&y=2")
        );
    }

    #[test]
    fn decode_entities_handles_double_encoding() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&lt;b&gt; &amp; &quot;q&quot; &apos;a&apos;"), "<b> & \"q\" 'a'");
    }

    #[test]
    fn strip_tags_collapses_whitespace_and_decodes() {
        let text = "A <em>record</em>\n  set &amp; more";
        assert_eq!(strip_tags(text), "A record set & more");
    }

    #[test]
    fn direct_resource_refs_match_self_closing_and_open_tags() {
        let pattern = ElementPattern::new("rdfs:subClassOf");
        let text = r#"<rdfs:subClassOf rdf:resource="http://ex/B"/>
                      <rdfs:subClassOf rdf:resource="http://ex/C"></rdfs:subClassOf>"#;
        assert_eq!(
            pattern.direct_resource_refs(text),
            vec!["http://ex/B".to_owned(), "http://ex/C".to_owned()]
        );
    }
}
