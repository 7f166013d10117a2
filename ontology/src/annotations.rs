//! Language-tagged annotation and cross-reference extraction.
//!
//! Operates on the inner content of a scanned element block. Values tagged
//! with a language other than English are discarded; untagged values count
//! as English. Same-named elements nested inside an already-matched value
//! are never extracted twice: scanning is sequential and non-overlapping,
//! so only the outermost occurrence is seen.

use regex::Regex;

use crate::model::is_absolute_http_iri;
use crate::scanner::{attr_value, strip_tags, ElementPattern};

/// Extracts the decoded English (or language-unset) text values of every
/// `element` occurrence inside `content`, in document order. Values that
/// are empty after tag stripping are dropped.
#[must_use]
pub fn english_values(content: &str, element: &ElementPattern) -> Vec<String> {
    let mut out = Vec::new();
    for block in element.blocks(content) {
        if !is_english(&block.attrs) {
            continue;
        }
        let text = strip_tags(&block.content);
        if !text.is_empty() {
            out.push(text);
        }
    }
    out
}

/// Extracts the English RiC-CM corresponding-component notes. The vendor
/// element's namespace prefix varies between releases, so any prefix (or
/// none) is accepted.
#[must_use]
pub fn vendor_notes(content: &str) -> Vec<String> {
    english_values(content, vendor_element())
}

fn vendor_element() -> &'static ElementPattern {
    static ELEMENT: std::sync::OnceLock<ElementPattern> = std::sync::OnceLock::new();
    ELEMENT.get_or_init(|| ElementPattern::with_any_prefix("RiCCMCorrespondingComponent"))
}

/// Collects the absolute IRIs referenced by `element` occurrences inside
/// `content`, in first-appearance order, deduplicated.
///
/// Two reference shapes are unioned: an `rdf:resource` attribute carried
/// directly on the element's own tag, and an `rdf:resource` / `rdf:about`
/// attribute anywhere within a nested element inside the element's content.
/// Relative or malformed values are silently dropped.
#[must_use]
pub fn resource_refs(content: &str, element: &ElementPattern) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |iri: String| {
        if is_absolute_http_iri(&iri) && !out.contains(&iri) {
            out.push(iri);
        }
    };

    for iri in element.direct_resource_refs(content) {
        push(iri);
    }

    for block in element.blocks(content) {
        for caps in nested_ref_pattern().captures_iter(&block.content) {
            if let Some(m) = caps.get(1) {
                push(crate::scanner::decode_entities(m.as_str()));
            }
        }
    }

    out
}

fn is_english(attrs: &str) -> bool {
    match attr_value(attrs, "xml:lang") {
        None => true,
        Some(lang) => {
            let lang = lang.to_lowercase();
            lang.is_empty() || lang == "en" || lang.starts_with("en-")
        }
    }
}

// Literal pattern; compilation cannot fail.
#[allow(clippy::expect_used)]
fn nested_ref_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)rdf:(?:resource|about)\s*=\s*"([^"]+)""#).expect("reference pattern")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> ElementPattern {
        ElementPattern::new("rdfs:label")
    }

    #[test]
    fn keeps_english_and_unset_drops_other_languages() {
        let content = r#"<rdfs:label xml:lang="en">Alpha</rdfs:label>
                         <rdfs:label xml:lang="fr">Alphaxx</rdfs:label>
                         <rdfs:label xml:lang="en-GB">Alpha GB</rdfs:label>
                         <rdfs:label>Untagged</rdfs:label>"#;
        assert_eq!(
            english_values(content, &label()),
            vec!["Alpha", "Alpha GB", "Untagged"]
        );
    }

    #[test]
    fn strips_nested_markup_and_drops_empty_values() {
        let content = "<rdfs:comment>A <em>record</em> resource</rdfs:comment>\
                       <rdfs:comment>  <br/>  </rdfs:comment>";
        assert_eq!(
            english_values(content, &ElementPattern::new("rdfs:comment")),
            vec!["A record resource"]
        );
    }

    #[test]
    fn nested_same_named_tags_count_once() {
        // Outermost-only: the inner rdfs:label lives inside the first
        // match, and scanning resumes after it.
        let content =
            "<rdfs:label>Outer <rdfs:label>Inner</rdfs:label></rdfs:label><rdfs:label>Next</rdfs:label>";
        let values = english_values(content, &label());
        assert_eq!(values, vec!["Outer Inner", "Next"]);
    }

    #[test]
    fn vendor_notes_accept_any_prefix_and_filter_language() {
        let content = r#"<rico:RiCCMCorrespondingComponent xml:lang="en">RiC-E02</rico:RiCCMCorrespondingComponent>
                         <x:RiCCMCorrespondingComponent xml:lang="de">RiC-E99</x:RiCCMCorrespondingComponent>"#;
        assert_eq!(vendor_notes(content), vec!["RiC-E02"]);
    }

    #[test]
    fn refs_union_direct_and_nested_shapes() {
        let sub = ElementPattern::new("rdfs:subClassOf");
        let content = r#"<rdfs:subClassOf rdf:resource="http://ex/B"/>
                         <rdfs:subClassOf>
                           <owl:Restriction rdf:about="http://ex/C"/>
                         </rdfs:subClassOf>"#;
        assert_eq!(
            resource_refs(content, &sub),
            vec!["http://ex/B".to_owned(), "http://ex/C".to_owned()]
        );
    }

    #[test]
    fn refs_drop_relative_values_and_duplicates() {
        let sub = ElementPattern::new("rdfs:subClassOf");
        let content = r##"<rdfs:subClassOf rdf:resource="http://ex/B"/>
                          <rdfs:subClassOf rdf:resource="http://ex/B"/>
                          <rdfs:subClassOf rdf:resource="#LocalRef"/>
                          <rdfs:subClassOf rdf:resource="urn:x:y"/>"##;
        assert_eq!(resource_refs(content, &sub), vec!["http://ex/B".to_owned()]);
    }

    #[test]
    fn blank_language_attribute_counts_as_english() {
        assert!(is_english(r#" other="x""#));
        assert!(!is_english(r#" xml:lang="fr""#));
        assert!(is_english(r#" xml:lang="EN""#));
    }
}
