// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The CLI only recognizes options and hands the crawl engine a finished
// CrawlConfig; nothing below main ever sees clap types.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use crate::config::CrawlConfig;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "word-harvester",
    version = "0.1.0",
    about = "Crawl an online dictionary and harvest validated Indonesian words",
    long_about = "word-harvester starts from a handful of seed words, fetches each word's \
                  dictionary entry page, keeps the words that validate as genuine entries, and \
                  follows every new word it finds until the frontier runs dry. Progress is \
                  checkpointed so an interrupted crawl resumes where it left off."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (crawl, sort)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the dictionary starting from seed words
    ///
    /// Example: word-harvester crawl --workers 8 --interval-ms 300
    Crawl(CrawlArgs),

    /// Sort a harvested word list alphabetically into a new file
    ///
    /// Example: word-harvester sort indonesian-words.txt
    Sort {
        /// The word list to sort (one word per line)
        input: PathBuf,

        /// Where to write the sorted list
        #[arg(long, default_value = "indonesian-wordlist-sorted.txt")]
        output: PathBuf,
    },
}

// All the crawl knobs, one flag each, defaults matching CrawlConfig
#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Seed words that start (or re-start) the frontier, comma separated
    #[arg(long, value_delimiter = ',', default_value = "kamus,bahasa,indonesia,kata,arti")]
    pub seeds: Vec<String>,

    /// Number of concurrent crawl workers
    #[arg(long, default_value_t = 12)]
    pub workers: usize,

    /// Minimum gap between requests, in milliseconds
    ///
    /// Raise this if the site starts erroring or blocking
    #[arg(long, default_value_t = 200)]
    pub interval_ms: u64,

    /// Shortest word to keep (e.g. 'a' and 'i' are real Indonesian words)
    #[arg(long, default_value_t = 1)]
    pub min_word_length: usize,

    /// Longest word to keep; longer tokens are usually run-together junk
    #[arg(long, default_value_t = 30)]
    pub max_word_length: usize,

    /// Where the validated word list is written
    #[arg(long, default_value = "indonesian-words.txt")]
    pub output: PathBuf,

    /// Where the resume checkpoint is written
    #[arg(long, default_value = "resume_words.json")]
    pub checkpoint: PathBuf,

    /// Root of the dictionary site; entry pages live at <base>/<word>
    #[arg(long, default_value = "https://kbbi.web.id/")]
    pub base_url: String,

    /// Per-page navigation timeout, in seconds
    #[arg(long, default_value_t = 35)]
    pub timeout_secs: u64,

    /// Save a checkpoint after this many validated words
    #[arg(long, default_value_t = 100)]
    pub checkpoint_every: usize,
}

impl CrawlArgs {
    // Converts the parsed flags into the engine's CrawlConfig
    //
    // This is where the base URL gets validated: better to fail here, with
    // a clear message, than deep inside a worker
    pub fn to_config(&self) -> Result<CrawlConfig> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base URL '{}'", self.base_url))?;

        Ok(CrawlConfig {
            worker_count: self.workers.max(1),
            request_interval: Duration::from_millis(self.interval_ms),
            seed_words: self.seeds.clone(),
            min_word_length: self.min_word_length,
            max_word_length: self.max_word_length,
            output_path: self.output.clone(),
            checkpoint_path: self.checkpoint.clone(),
            base_url,
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            checkpoint_every: self.checkpoint_every.max(1),
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does value_delimiter do?
//    - It splits one flag value on a character into a Vec
//    - --seeds kamus,kata parses to vec!["kamus", "kata"]
//
// 2. Why .max(1) on workers and checkpoint_every?
//    - Zero workers would make the crawl a no-op, and checkpointing
//      "every 0 words" would divide by zero; clamping beats erroring for
//      values that have one obviously-intended meaning
// -----------------------------------------------------------------------------
