// src/words.rs
// =============================================================================
// This module extracts candidate words from rendered page text.
//
// A "word" here is a run of letters, optionally hyphen-joined with more
// letter runs (Indonesian reduplicated forms like "kira-kira"). Everything
// is lowercased and deduplicated before it goes anywhere near the frontier.
//
// We use the `regex` crate which:
// - Matches the token pattern in one pass over the text
// - Handles case-insensitive matching for us
// - Compiles once (LazyLock) and is reused by every worker
//
// Rust concepts:
// - LazyLock: Lazily initialized global, built on first use
// - Iterators: find_iter streams matches without allocating a Vec first
// - HashSet: Deduplicates tokens as we collect them
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// The token pattern: one letter run, optionally followed by hyphen-joined
// letter runs. Case-insensitive; the Indonesian alphabet is a-z, so this is
// the whole letter set we care about.
//
// Compiling a regex is not free, so we do it exactly once. The pattern is a
// constant and known to be valid, hence the unwrap.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[a-z]+(?:-[a-z]+)*\b").unwrap());

// Extracts the set of distinct lowercase words from rendered page text
//
// Parameters:
//   text: the rendered text of a page (borrowed as &str)
//   min_len: minimum token length to keep (shorter tokens are dropped)
//
// Returns: HashSet<String> of distinct lowercase tokens
//
// This is a pure function: same input text, same output set, no side
// effects. Empty or garbage input just produces an empty set.
//
// Example:
//   text = "Kata dasar: kira-kira"
//   result = {"kata", "dasar", "kira-kira"}
pub fn extract_words(text: &str, min_len: usize) -> HashSet<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.chars().count() >= min_len)
        .collect()
}

// Checks whether a candidate word fits the configured length bounds
//
// The frontier only accepts words within [min_len, max_len]; overly long
// tokens are usually run-together junk from the page chrome.
pub fn within_bounds(word: &str, min_len: usize, max_len: usize) -> bool {
    let len = word.chars().count();
    len >= min_len && len <= max_len
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A global value that is initialized the first time it's accessed
//    - Every later access reuses the same value (here: the compiled regex)
//    - Thread-safe: two threads racing on first use still initialize once
//
// 2. Why lowercase before deduplicating?
//    - "Kata" and "kata" are the same dictionary word
//    - Lowercasing first means the HashSet collapses them into one entry
//
// 3. Why chars().count() instead of len()?
//    - len() counts bytes, not characters
//    - For ASCII they're the same, but counting chars is correct either way
//
// 4. Why return HashSet instead of Vec?
//    - The caller only cares about membership, not order
//    - Deduplication comes for free while collecting
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_distinct_lowercase_words() {
        let words = extract_words("Kata kata KATA dasar", 1);
        assert_eq!(words.len(), 2);
        assert!(words.contains("kata"));
        assert!(words.contains("dasar"));
    }

    #[test]
    fn test_keeps_hyphenated_reduplication() {
        let words = extract_words("kira-kira itu ukuran", 1);
        assert!(words.contains("kira-kira"));
        assert!(words.contains("itu"));
    }

    #[test]
    fn test_min_length_filter() {
        let words = extract_words("a di rumah", 2);
        assert!(!words.contains("a"));
        assert!(words.contains("di"));
        assert!(words.contains("rumah"));
    }

    #[test]
    fn test_empty_input_gives_empty_set() {
        assert!(extract_words("", 1).is_empty());
        assert!(extract_words("12345 !!! ???", 1).is_empty());
    }

    #[test]
    fn test_pure_and_idempotent() {
        let text = "Entri kamus: berlari, lari, kira-kira.";
        let first = extract_words(text, 1);
        let second = extract_words(text, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_within_bounds() {
        assert!(within_bounds("kata", 1, 30));
        assert!(!within_bounds("kata", 5, 30));
        assert!(!within_bounds("katakatakata", 1, 10));
    }
}
