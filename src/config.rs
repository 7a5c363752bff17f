// src/config.rs
// =============================================================================
// This module holds the crawl's tunable knobs in one struct.
//
// The CLI layer (cli.rs) produces a CrawlConfig; everything below main only
// ever sees this struct, never clap types. Defaults mirror a crawl setup
// that has proven polite enough in practice: 12 workers paced at one
// request per 200ms, entries capped at 30 characters.
//
// Rust concepts:
// - Default trait: the canonical configuration in one place
// - Duration: typed time instead of bare millisecond integers
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// Everything the crawl engine needs to know, resolved and validated
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of concurrent crawl workers
    pub worker_count: usize,
    /// Minimum gap between any two renderer requests
    pub request_interval: Duration,
    /// Words that kick off (or re-kick) the frontier
    pub seed_words: Vec<String>,
    /// Shortest candidate word to keep
    pub min_word_length: usize,
    /// Longest candidate word to keep
    pub max_word_length: usize,
    /// Where the validated word list is written
    pub output_path: PathBuf,
    /// Where the resume checkpoint is written
    pub checkpoint_path: PathBuf,
    /// Root of the dictionary site; entry pages live at <base>/<word>
    pub base_url: Url,
    /// Per-fetch navigation deadline
    pub fetch_timeout: Duration,
    /// Checkpoint after this many validated words
    pub checkpoint_every: usize,
}

impl CrawlConfig {
    // The entry page URL for one word
    //
    // Url::join percent-encodes anything the path can't carry verbatim;
    // our tokens are plain letters and hyphens, but hand-rolling string
    // concatenation would still be the wrong tool here.
    pub fn entry_url(&self, word: &str) -> String {
        match self.base_url.join(word) {
            Ok(url) => url.to_string(),
            // join only fails on cannot-be-a-base URLs, which the CLI
            // already rejected; fall back to something loggable anyway
            Err(_) => format!("{}{}", self.base_url, word),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            worker_count: 12,
            request_interval: Duration::from_millis(200),
            seed_words: ["kamus", "bahasa", "indonesia", "kata", "arti"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_word_length: 1,
            max_word_length: 30,
            output_path: PathBuf::from("indonesian-words.txt"),
            checkpoint_path: PathBuf::from("resume_words.json"),
            // The base must end in '/' so join() appends instead of replacing
            base_url: Url::parse("https://kbbi.web.id/").unwrap(),
            fetch_timeout: Duration::from_secs(35),
            checkpoint_every: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_url_appends_word() {
        let config = CrawlConfig::default();
        assert_eq!(config.entry_url("kata"), "https://kbbi.web.id/kata");
    }

    #[test]
    fn test_entry_url_keeps_hyphens() {
        let config = CrawlConfig::default();
        assert_eq!(config.entry_url("kira-kira"), "https://kbbi.web.id/kira-kira");
    }

    #[test]
    fn test_defaults_are_sane() {
        let config = CrawlConfig::default();
        assert!(config.worker_count > 0);
        assert!(config.min_word_length <= config.max_word_length);
        assert!(!config.seed_words.is_empty());
    }
}
