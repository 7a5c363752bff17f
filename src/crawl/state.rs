// src/crawl/state.rs
// =============================================================================
// This module owns the shared mutable crawl state.
//
// Three collections travel together:
// - frontier: FIFO queue of words awaiting processing (VecDeque)
// - visited: every word ever claimed, valid or not (HashSet)
// - output: words that passed validation, append-only (Vec)
//
// All workers share one CrawlState. A single std::sync::Mutex guards the
// three collections as a unit, which gives us the crawl's core invariant
// for free: claim() checks visited membership and inserts in one critical
// section, so no two workers can ever claim the same word. The lock is
// NEVER held across an .await — every method locks, mutates, and returns.
//
// The frontier may transiently hold duplicates; that's fine, because
// visited is the sole source of truth for "already claimed" and claim()
// filters the duplicates out at dequeue time.
//
// Rust concepts:
// - Mutex<T>: Interior mutability with exclusive access
// - VecDeque: Double-ended queue for FIFO processing (push_back/pop_front)
// - HashSet: O(1) membership checks for the visited set
// =============================================================================

use crate::checkpoint::Checkpoint;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

// The crawl's shared frontier, visited set, and output list
pub struct CrawlState {
    inner: Mutex<StateInner>,
}

struct StateInner {
    frontier: VecDeque<String>,
    visited: HashSet<String>,
    output: Vec<String>,
}

impl CrawlState {
    // Creates an empty state (fresh crawl, before seeding)
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StateInner {
                frontier: VecDeque::new(),
                visited: HashSet::new(),
                output: Vec::new(),
            }),
        }
    }

    // Rebuilds state from a loaded checkpoint
    //
    // Every restored output word is re-added to visited: output ⊆ visited
    // must hold even if an older checkpoint was written by a version that
    // didn't guarantee it.
    pub fn restore(checkpoint: Checkpoint) -> Self {
        let mut visited: HashSet<String> = checkpoint.visited.into_iter().collect();
        for word in &checkpoint.output {
            visited.insert(word.clone());
        }

        Self {
            inner: Mutex::new(StateInner {
                frontier: checkpoint.frontier.into(),
                visited,
                output: checkpoint.output,
            }),
        }
    }

    // Enqueues seed words that have not been visited yet
    //
    // Used on a fresh crawl, and again on resume when the restored frontier
    // came back empty but the configuration gained new seeds since.
    pub fn seed(&self, seeds: &[String]) -> usize {
        let mut state = self.locked();
        let mut added = 0;
        for seed in seeds {
            if !state.visited.contains(seed) {
                state.frontier.push_back(seed.clone());
                added += 1;
            }
        }
        added
    }

    // Removes and returns the head of the frontier, if any
    //
    // Returning None does NOT mean the crawl is done — another worker may
    // still be about to enqueue. Callers poll-and-backoff.
    pub fn dequeue(&self) -> Option<String> {
        self.locked().frontier.pop_front()
    }

    // Atomically claims a word for processing
    //
    // Returns true if this caller is the first to claim it; false means
    // some other worker already has it and the caller must skip. The check
    // and the insert are one uninterruptible step under the lock.
    pub fn claim(&self, word: &str) -> bool {
        self.locked().visited.insert(word.to_string())
    }

    // Appends newly discovered candidates to the frontier tail
    //
    // Words already visited and the word currently being processed are
    // filtered out. Returns how many actually entered the queue.
    pub fn enqueue_new<I>(&self, candidates: I, current: &str) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut state = self.locked();
        let mut added = 0;
        for word in candidates {
            if word != current && !state.visited.contains(&word) {
                state.frontier.push_back(word);
                added += 1;
            }
        }
        added
    }

    // Appends a validated word to the output list
    //
    // Returns the new output length, which the worker uses to decide when
    // to checkpoint. A word reaches here at most once because processing is
    // gated by claim().
    pub fn record_valid(&self, word: &str) -> usize {
        let mut state = self.locked();
        state.output.push(word.to_string());
        state.output.len()
    }

    // Number of words currently queued
    pub fn frontier_len(&self) -> usize {
        self.locked().frontier.len()
    }

    // Number of words ever claimed
    pub fn visited_len(&self) -> usize {
        self.locked().visited.len()
    }

    // Number of validated words so far
    pub fn output_len(&self) -> usize {
        self.locked().output.len()
    }

    // Clones the full state into a serializable snapshot
    pub fn snapshot(&self) -> Checkpoint {
        let state = self.locked();
        Checkpoint {
            output: state.output.clone(),
            frontier: state.frontier.iter().cloned().collect(),
            visited: state.visited.iter().cloned().collect(),
        }
    }

    // A poisoned lock means another worker panicked mid-update; crawl state
    // is no longer trustworthy, so propagating the panic is the right move
    fn locked(&self) -> MutexGuard<'_, StateInner> {
        self.inner.lock().expect("crawl state lock poisoned")
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why std::sync::Mutex and not tokio's?
//    - No method here ever awaits while holding the lock
//    - For short critical sections, the std mutex is cheaper and makes the
//      no-suspension-point rule structurally impossible to break (the guard
//      can't cross an .await)
//
// 2. Why does claim() use HashSet::insert's return value?
//    - insert() returns false if the value was already present
//    - That makes check-and-mark a single operation — no gap for another
//      worker to slip through between "is it there?" and "add it"
//
// 3. Why clone in snapshot() instead of handing out references?
//    - The snapshot outlives the lock; references would keep it locked
//    - Checkpointing is rare, so the copy cost is irrelevant
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(words: &[&str]) -> CrawlState {
        let state = CrawlState::new();
        state.seed(&words.iter().map(|w| w.to_string()).collect::<Vec<_>>());
        state
    }

    #[test]
    fn test_dequeue_is_fifo() {
        let state = seeded(&["satu", "dua", "tiga"]);
        assert_eq!(state.dequeue().as_deref(), Some("satu"));
        assert_eq!(state.dequeue().as_deref(), Some("dua"));
        assert_eq!(state.dequeue().as_deref(), Some("tiga"));
        assert_eq!(state.dequeue(), None);
    }

    #[test]
    fn test_claim_succeeds_exactly_once() {
        let state = CrawlState::new();
        assert!(state.claim("kata"));
        assert!(!state.claim("kata"));
    }

    #[test]
    fn test_concurrent_claims_yield_one_winner() {
        let state = CrawlState::new();
        let wins = std::sync::atomic::AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    if state.claim("rebutan") {
                        wins.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(wins.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_enqueue_new_filters_visited_and_current() {
        let state = CrawlState::new();
        state.claim("lama");

        let added = state.enqueue_new(
            ["lama", "kata", "baru", "dunia"].into_iter().map(String::from),
            "kata",
        );

        // "lama" is visited, "kata" is the word being processed
        assert_eq!(added, 2);
        assert_eq!(state.frontier_len(), 2);
    }

    #[test]
    fn test_seed_skips_visited_words() {
        let state = CrawlState::new();
        state.claim("kamus");
        let added = state.seed(&["kamus".to_string(), "bahasa".to_string()]);
        assert_eq!(added, 1);
        assert_eq!(state.dequeue().as_deref(), Some("bahasa"));
    }

    #[test]
    fn test_restore_puts_output_into_visited() {
        let checkpoint = Checkpoint {
            output: vec!["kata".to_string()],
            frontier: vec!["bahasa".to_string()],
            // Deliberately missing "kata"
            visited: vec!["arti".to_string()],
        };
        let state = CrawlState::restore(checkpoint);

        // Output words count as visited, so re-claiming must fail
        assert!(!state.claim("kata"));
        assert_eq!(state.visited_len(), 2);
        assert_eq!(state.frontier_len(), 1);
    }

    #[test]
    fn test_snapshot_round_trips_through_restore() {
        let state = seeded(&["satu", "dua"]);
        state.claim("kata");
        state.record_valid("kata");

        let snapshot = state.snapshot();
        let restored = CrawlState::restore(snapshot.clone());
        let again = restored.snapshot();

        assert_eq!(again.output, snapshot.output);
        assert_eq!(again.frontier, snapshot.frontier);
        // Visited is a set; order may differ between snapshots
        let a: HashSet<_> = snapshot.visited.iter().collect();
        let b: HashSet<_> = again.visited.iter().collect();
        assert_eq!(a, b);
    }
}
