// src/validate/entry.rs
// =============================================================================
// This module validates a word against its fetched entry page.
//
// The dictionary renders every entry inside a definition region (#d1).
// Inside it, headwords and derived/compound forms are marked with specific
// bold classes, so "is this a real entry?" becomes a series of DOM checks,
// tried in priority order:
//
// 1. No #d1 region at all           -> reject
// 2. #d1's h3 says "entry not found" -> reject, overrides everything
// 3. Word matches b.main/b.tur/b.mjk -> accept (headword/derived/compound)
// 4. Word matches any <b> in #d1     -> accept (bolded in a definition)
// 5. Word matches the root-word link -> accept (cross-reference)
// 6. Otherwise                       -> structurally rejected
//
// Structural rejection is not the end: the site's markers are unreliable for
// many legitimate derived forms, so a word that LOOKS derived — a known
// prefix, a known suffix, or a reduplication hyphen — is accepted anyway.
// Each acceptance path is a named rule so the decision is visible in logs
// and testable on its own. The fallback knowingly admits false positives;
// that trade-off is part of the output's semantics, so don't tighten it.
//
// Rust concepts:
// - Enums as named rule variants instead of anonymous booleans
// - Option<AcceptRule>: None = rejected, Some(rule) = accepted and why
// =============================================================================

use crate::renderer::RenderedPage;
use regex::Regex;
use std::sync::LazyLock;

// CSS selectors for the dictionary's entry layout
const DEFINITION_REGION: &str = "#d1";
const NOT_FOUND_HEADING: &str = "#d1 h3";
const PRIMARY_MARKERS: &str = "#d1 b.main, #d1 b.tur, #d1 b.mjk";
const ALL_MARKERS: &str = "#d1 b";
const ROOT_WORD_LINK: &str = "#d1 span.root-word a";

// The exact phrase the site shows for a missing entry
const NOT_FOUND_MARKER: &str = "Entri tidak ditemukan";

// Indonesian affixes that mark a derived form
static PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ter|di|ber|me|mem|men|meng|pen|pem|per|se|ke|pe)").unwrap()
});
static SUFFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(nya|an)$").unwrap());

// Why a word was accepted into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptRule {
    /// The page's own markup confirmed the word as an entry
    Structural,
    /// Structurally rejected, but the word carries a known prefix
    PrefixFallback,
    /// Structurally rejected, but the word carries a known suffix
    SuffixFallback,
    /// Structurally rejected, but the word is a hyphenated reduplication
    ReduplicationFallback,
}

impl AcceptRule {
    /// True when acceptance came from word shape, not the page
    pub fn is_fallback(&self) -> bool {
        !matches!(self, AcceptRule::Structural)
    }
}

// Decides whether `word` is a legitimate entry given its rendered page
//
// Returns Some(rule) naming the first rule that accepted the word, or None
// if it failed both the structural checks and every fallback. The fallback
// is independent of the structural verdict: even a page that positively says
// "entry not found" cannot veto a morphological acceptance.
pub fn validate_entry(word: &str, page: &RenderedPage) -> Option<AcceptRule> {
    if structural_match(word, page) {
        return Some(AcceptRule::Structural);
    }
    morphological_fallback(word)
}

// The DOM side of the decision: steps 1-6 above
fn structural_match(word: &str, page: &RenderedPage) -> bool {
    // 1. No definition region: nothing to look at
    if !page.has_match(DEFINITION_REGION) {
        return false;
    }

    // 2. Explicit negative beats every positive signal below
    let not_found = page
        .select_texts(NOT_FOUND_HEADING)
        .iter()
        .any(|heading| heading.contains(NOT_FOUND_MARKER));
    if not_found {
        return false;
    }

    let pattern = whole_word_pattern(word);
    let matches_any = |texts: Vec<String>| texts.iter().any(|text| pattern.is_match(text));

    // 3. Headword / derived-form / compound-form markers
    if matches_any(page.select_texts(PRIMARY_MARKERS)) {
        return true;
    }

    // 4. Any bold in the definition region (words bolded in examples)
    if matches_any(page.select_texts(ALL_MARKERS)) {
        return true;
    }

    // 5. Root-word cross-reference, common on main entries
    matches_any(page.select_texts(ROOT_WORD_LINK))
}

// Whole-word, case-insensitive pattern for the candidate
//
// The optional trailing digits accept homograph numbering: the entry for
// "kata" may render the marker as "kata1".
fn whole_word_pattern(word: &str) -> Regex {
    // regex::escape guarantees the pattern is valid, hence the unwrap
    Regex::new(&format!(r"(?i)\b{}(?:\d+)?\b", regex::escape(word))).unwrap()
}

// The shape side of the decision: does the word look derived?
fn morphological_fallback(word: &str) -> Option<AcceptRule> {
    if PREFIX_PATTERN.is_match(word) {
        return Some(AcceptRule::PrefixFallback);
    }
    if SUFFIX_PATTERN.is_match(word) {
        return Some(AcceptRule::SuffixFallback);
    }
    if word.contains('-') {
        return Some(AcceptRule::ReduplicationFallback);
    }
    None
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<AcceptRule> instead of bool?
//    - The worker logs WHICH rule accepted a word, and tests pin down the
//      priority order; a bool would throw that information away
//
// 2. What does regex::escape do?
//    - Escapes regex metacharacters in the word before we embed it in a
//      pattern ("kira-kira" is fine, but escaping costs nothing and keeps
//      arbitrary input safe)
//
// 3. Why does the not-found check only look at h3?
//    - That's where the site puts the message; scanning the whole region
//      could false-positive on definitions that quote the phrase
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> RenderedPage {
        RenderedPage::from_html(html)
    }

    #[test]
    fn test_accepts_primary_marker() {
        let p = page(r#"<div id="d1"><b class="main">kata</b> n unsur bahasa</div>"#);
        assert_eq!(validate_entry("kata", &p), Some(AcceptRule::Structural));
    }

    #[test]
    fn test_accepts_homograph_numbering() {
        let p = page(r#"<div id="d1"><b class="main">kata1</b></div>"#);
        assert_eq!(validate_entry("kata", &p), Some(AcceptRule::Structural));
    }

    #[test]
    fn test_accepts_secondary_bold() {
        let p = page(r#"<div id="d1"><b class="main">lari</b> contoh: <b>pelarian</b></div>"#);
        // "pelarian" is only bolded in the body, not a primary marker
        assert_eq!(validate_entry("pelarian", &p), Some(AcceptRule::Structural));
    }

    #[test]
    fn test_accepts_root_word_link() {
        let p = page(
            r#"<div id="d1"><span class="root-word"><a href="/lari">lari</a></span></div>"#,
        );
        assert_eq!(validate_entry("lari", &p), Some(AcceptRule::Structural));
    }

    #[test]
    fn test_requires_whole_word_match() {
        let p = page(r#"<div id="d1"><b class="main">perkataan</b></div>"#);
        // "kata" appears inside "perkataan" but not as a whole word, and it
        // carries no known affix, so it must be rejected
        assert_eq!(validate_entry("kata", &p), None);
    }

    #[test]
    fn test_missing_region_rejects() {
        let p = page("<div><b>kata</b></div>");
        assert_eq!(validate_entry("kata", &p), None);
    }

    #[test]
    fn test_not_found_marker_overrides_bold_match() {
        let p = page(
            r#"<div id="d1"><h3>Entri tidak ditemukan.</h3><b>kata</b></div>"#,
        );
        // The negative marker wins even though a <b> tag matches exactly
        assert_eq!(validate_entry("kata", &p), None);
    }

    #[test]
    fn test_prefix_fallback_survives_structural_reject() {
        let p = page(r#"<div id="d1"><h3>Entri tidak ditemukan.</h3></div>"#);
        assert_eq!(validate_entry("berlari", &p), Some(AcceptRule::PrefixFallback));
    }

    #[test]
    fn test_suffix_fallback() {
        let p = page(r#"<div id="d1"><h3>Entri tidak ditemukan.</h3></div>"#);
        assert_eq!(validate_entry("katanya", &p), Some(AcceptRule::SuffixFallback));
    }

    #[test]
    fn test_reduplication_fallback() {
        let p = page("<div></div>");
        assert_eq!(
            validate_entry("cuma-cuma", &p),
            Some(AcceptRule::ReduplicationFallback)
        );
    }

    #[test]
    fn test_prefix_checked_before_suffix() {
        let p = page("<div></div>");
        // "berjalan" matches both ber- and -an; the prefix rule is reported
        assert_eq!(validate_entry("berjalan", &p), Some(AcceptRule::PrefixFallback));
    }

    #[test]
    fn test_rejects_word_failing_both_paths() {
        let p = page(r#"<div id="d1"><b class="main">lain</b></div>"#);
        assert_eq!(validate_entry("zzz", &p), None);
    }
}
