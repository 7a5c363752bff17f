// src/renderer/page.rs
// =============================================================================
// This module wraps a fetched page's parsed DOM.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The validator needs two views of a page: the text of nodes matching a CSS
// selector (for the structural checks) and the full rendered text (for word
// extraction). RenderedPage provides both so no other module ever touches
// scraper types directly.
//
// Rust concepts:
// - Encapsulation: the Html document is a private field
// - Iterators: select() streams matching elements
// =============================================================================

use scraper::{Html, Selector};

// A fetched entry page, parsed and ready to be queried
pub struct RenderedPage {
    document: Html,
}

impl RenderedPage {
    // Parses raw HTML into a queryable page
    //
    // html5ever is error-tolerant the way browsers are: malformed input
    // still produces a (possibly sparse) DOM, never an error.
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    // The rendered text of the whole page, whitespace-joined
    //
    // This is what the word extractor scans. Tag soup in, plain text out.
    pub fn text(&self) -> String {
        self.document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
    }

    // True if any element matches the CSS selector
    pub fn has_match(&self, selector: &str) -> bool {
        let selector = parse_selector(selector);
        self.document.select(&selector).next().is_some()
    }

    // The text content of every element matching the CSS selector
    //
    // Example:
    //   html = "<div id='d1'><b>kata</b><b>arti</b></div>"
    //   select_texts("#d1 b") = ["kata", "arti"]
    pub fn select_texts(&self, selector: &str) -> Vec<String> {
        let selector = parse_selector(selector);
        self.document
            .select(&selector)
            .map(|element| element.text().collect::<String>())
            .collect()
    }
}

// Selector::parse returns Result, so we unwrap — which panics on error.
// This is OK here because every selector in this crate is a constant and
// known to be valid. Generally avoid unwrap() on user input!
fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_flattens_markup() {
        let page = RenderedPage::from_html("<p>kamus <b>bahasa</b> indonesia</p>");
        let text = page.text();
        assert!(text.contains("kamus"));
        assert!(text.contains("bahasa"));
        assert!(text.contains("indonesia"));
    }

    #[test]
    fn test_has_match() {
        let page = RenderedPage::from_html(r#"<div id="d1"><b class="main">kata</b></div>"#);
        assert!(page.has_match("#d1"));
        assert!(page.has_match("#d1 b.main"));
        assert!(!page.has_match("#d2"));
    }

    #[test]
    fn test_select_texts_in_document_order() {
        let page = RenderedPage::from_html(r#"<div id="d1"><b>kata</b><i>x</i><b>arti</b></div>"#);
        assert_eq!(page.select_texts("#d1 b"), vec!["kata", "arti"]);
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let page = RenderedPage::from_html("<div><b>kata");
        assert!(page.text().contains("kata"));
    }
}
