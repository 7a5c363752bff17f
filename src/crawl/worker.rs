// src/crawl/worker.rs
// =============================================================================
// This module runs the crawl: a pool of N concurrent workers sharing one
// CrawlState, one RateLimiter, and one Renderer.
//
// Each worker loops:
// 1. Check the shutdown flag (Ctrl-C sets it); exit promptly when set
// 2. Dequeue a word; if the frontier is empty, back off briefly — another
//    worker may still be mid-page and about to enqueue more. After several
//    empty polls with nothing in flight anywhere, the worker exits
// 3. Claim the word (skip if another worker beat us to it)
// 4. Wait for rate-limiter admission
// 5. Fetch the entry page; on timeout or navigation failure, log, drop the
//    session (a fresh one is opened next time) and abandon the word —
//    no retry, so one unreachable page can't loop forever
// 6. Validate; structurally rejected words without a fallback are dropped
// 7. Extract candidates, enqueue the new ones, record the word as valid
// 8. Every checkpoint_every validated words, save progress
//
// After every worker has exited, exactly one final save runs.
//
// Rust concepts:
// - join_all: Run all worker futures concurrently in one task
// - Atomics: shutdown flag and in-flight counter shared across workers
// - Generics: the pool works against any Renderer implementation
// =============================================================================

use crate::checkpoint;
use crate::config::CrawlConfig;
use crate::limiter::RateLimiter;
use crate::renderer::{RenderSession, Renderer};
use crate::validate::validate_entry;
use crate::words::{extract_words, within_bounds};

use super::state::CrawlState;

use anyhow::Result;
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

// How long a worker sleeps when it finds the frontier empty
const IDLE_BACKOFF: Duration = Duration::from_millis(500);

// Consecutive empty polls (with nothing in flight) before a worker exits
const MAX_IDLE_POLLS: u32 = 3;

// What the crawl produced, for the final summary
pub struct CrawlSummary {
    /// Words that passed validation
    pub valid_words: usize,
    /// Words claimed for processing, valid or not
    pub words_visited: usize,
}

// Runs a full crawl: resume or seed, work until drained, save, summarize
pub async fn run_crawl<R: Renderer>(renderer: &R, config: &CrawlConfig) -> Result<CrawlSummary> {
    // Resume from a checkpoint when one exists; otherwise start fresh
    let state = match checkpoint::load(&config.checkpoint_path) {
        Some(saved) => {
            println!(
                "🔄 Resuming: {} valid word(s), {} queued, {} visited",
                saved.output.len(),
                saved.frontier.len(),
                saved.visited.len()
            );
            CrawlState::restore(saved)
        }
        None => {
            println!("ℹ️  No checkpoint found, starting fresh");
            CrawlState::new()
        }
    };

    // Seed on a fresh start, and also when a resumed frontier came back
    // empty but some seed words were never visited
    if state.frontier_len() == 0 {
        let added = state.seed(&config.seed_words);
        if added > 0 {
            println!("🌱 Seeded the frontier with {} word(s)", added);
        }
    }

    // Ctrl-C flips the shutdown flag; workers notice it on their next
    // iteration and the final save below still runs
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("🛑 Ctrl-C received; letting workers finish and saving...");
                shutdown.store(true, Ordering::SeqCst);
            }
        });
    }

    let pool = WorkerPool {
        renderer,
        config,
        state: &state,
        limiter: RateLimiter::new(config.request_interval),
        shutdown,
        in_flight: AtomicUsize::new(0),
    };

    println!("👷 Running {} worker(s)...", config.worker_count);
    join_all((0..config.worker_count).map(|_| pool.run_worker())).await;
    println!("🏁 All workers finished");

    // Exactly one final save after the pool drains
    save_progress(&state, config);

    Ok(CrawlSummary {
        valid_words: state.output_len(),
        words_visited: state.visited_len(),
    })
}

// Everything a worker needs, shared by reference across the pool
struct WorkerPool<'a, R: Renderer> {
    renderer: &'a R,
    config: &'a CrawlConfig,
    state: &'a CrawlState,
    limiter: RateLimiter,
    shutdown: Arc<AtomicBool>,
    in_flight: AtomicUsize,
}

impl<R: Renderer> WorkerPool<'_, R> {
    // One worker's whole life: loop until shutdown or the frontier settles
    async fn run_worker(&self) {
        // Each worker owns one rendering session, opened lazily and
        // replaced after a fatal fetch error
        let mut session: Option<R::Session> = None;
        let mut idle_polls = 0u32;

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            let Some(word) = self.state.dequeue() else {
                // Empty frontier only means "done" once no worker is
                // mid-page; an in-flight page may enqueue more work
                if self.in_flight.load(Ordering::SeqCst) == 0 {
                    idle_polls += 1;
                    if idle_polls >= MAX_IDLE_POLLS {
                        break;
                    }
                } else {
                    idle_polls = 0;
                }
                sleep(IDLE_BACKOFF).await;
                continue;
            };
            idle_polls = 0;

            // claim() is the dedup gate: false means another worker already
            // owns this word (the frontier can hold transient duplicates)
            if !self.state.claim(&word) {
                continue;
            }

            self.in_flight.fetch_add(1, Ordering::SeqCst);
            self.process_word(&word, &mut session).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        // Dropping the session here releases the worker's renderer resources
    }

    // Fetch, validate, harvest, record — one claimed word, start to finish
    async fn process_word(&self, word: &str, session: &mut Option<R::Session>) {
        self.limiter.acquire().await;

        if session.is_none() {
            match self.renderer.open().await {
                Ok(fresh) => *session = Some(fresh),
                Err(e) => {
                    eprintln!("❌ Could not open a rendering session for \"{}\": {}", word, e);
                    return;
                }
            }
        }
        let Some(live) = session.as_mut() else {
            return;
        };

        let url = self.config.entry_url(word);
        let page = match live.fetch(&url, self.config.fetch_timeout).await {
            Ok(page) => page,
            Err(e) => {
                eprintln!("❌ Failed to fetch \"{}\": {}", word, e);
                // The session may be wedged; the next word gets a fresh one.
                // The word itself is abandoned — it stays visited, so no
                // other worker will hammer the same unreachable page
                *session = None;
                return;
            }
        };

        let Some(rule) = validate_entry(word, &page) else {
            println!("🟡 {} - not an entry, no affix or reduplication shape, skipped", word);
            return;
        };

        if rule.is_fallback() {
            println!("🟡 {} - structurally unverified, kept by {:?}", word, rule);
        } else {
            println!("✔️ {} - confirmed by entry markers, extracting...", word);
        }

        // Harvest candidates from the page and grow the frontier
        let candidates = extract_words(&page.text(), self.config.min_word_length);
        let bounded = candidates.into_iter().filter(|candidate| {
            within_bounds(candidate, self.config.min_word_length, self.config.max_word_length)
        });
        let added = self.state.enqueue_new(bounded, word);

        let total = self.state.record_valid(word);
        println!(
            "✅ {} (valid: {}, queue: {}, +{} new)",
            word,
            total,
            self.state.frontier_len(),
            added
        );

        if total % self.config.checkpoint_every == 0 {
            save_progress(self.state, self.config);
        }
    }
}

// Best-effort save of the word list and the resume checkpoint
//
// Failures are logged and swallowed: losing one checkpoint is recoverable,
// aborting the crawl over it is not
fn save_progress(state: &CrawlState, config: &CrawlConfig) {
    let snapshot = state.snapshot();
    println!(
        "💾 Saving progress... ({} valid, {} visited)",
        snapshot.output.len(),
        snapshot.visited.len()
    );

    if let Err(e) = checkpoint::write_word_list(&config.output_path, &snapshot.output) {
        eprintln!("⚠️  Could not write the word list: {:#}", e);
    }
    if let Err(e) = checkpoint::save(&config.checkpoint_path, &snapshot) {
        eprintln!("⚠️  Could not save the checkpoint: {:#}", e);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why join_all instead of tokio::spawn?
//    - All workers run concurrently inside one task, like buffer_unordered
//      does for a stream of futures
//    - They can then share plain references (&CrawlState) instead of
//      needing 'static + Send everything
//
// 2. Why count in-flight words at all?
//    - An empty frontier is ambiguous: finished, or just momentarily dry?
//    - If any worker is mid-page it may enqueue new words, so the others
//      reset their idle counters and keep polling
//
// 3. Why no retry after a fetch error?
//    - The word was already claimed, so retrying means re-queueing and
//      re-claiming machinery, and a permanently broken page would cycle
//      forever; skipping loses at most one word per failure
// -----------------------------------------------------------------------------
