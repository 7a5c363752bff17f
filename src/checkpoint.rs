// src/checkpoint.rs
// =============================================================================
// This module persists and restores the full crawl state.
//
// Two artifacts live on disk:
// - The checkpoint: a JSON snapshot of (output, frontier, visited), written
//   periodically and at shutdown, loaded at startup to resume a crawl
// - The word list: the validated words, newline-separated, rewritten in full
//   on every checkpoint and at completion
//
// Durability rules:
// - Saves are best-effort and independent: a failed save is logged by the
//   caller and the crawl keeps going
// - A corrupt or unreadable checkpoint must never crash the crawler: it is
//   deleted and treated as absent, so the next run starts from seed words
// - The checkpoint is written atomically (temp file + rename) so a crash
//   mid-write can't leave a half-written file behind
//
// Rust concepts:
// - serde derive: Checkpoint <-> JSON without hand-written parsing
// - NamedTempFile::persist: atomic replace on the same filesystem
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

// A snapshot of the crawl state at one point in time
//
// Field names match the persisted JSON exactly:
//   { "output": [...], "frontier": [...], "visited": [...] }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Words that passed validation, in discovery order
    pub output: Vec<String>,
    /// Words still waiting in the frontier queue
    pub frontier: Vec<String>,
    /// Every word ever claimed for processing (valid or not)
    pub visited: Vec<String>,
}

// Durably writes the checkpoint, overwriting any previous one
//
// The JSON is written to a temp file in the same directory and then renamed
// over the target, so readers never observe a partial checkpoint.
pub fn save(path: &Path, checkpoint: &Checkpoint) -> Result<()> {
    let json = serde_json::to_string_pretty(checkpoint)?;

    // The temp file must live in the target's directory: rename is only
    // atomic within one filesystem
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path)
        .with_context(|| format!("replacing checkpoint at {}", path.display()))?;

    Ok(())
}

// Loads a previously saved checkpoint, or None if there isn't a usable one
//
// A missing file simply means "fresh crawl". A file that exists but fails to
// parse is deleted so we don't trip over it again next run, and we also
// return None — the caller falls back to the seed words.
pub fn load(path: &Path) -> Option<Checkpoint> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            eprintln!("⚠️  Could not read checkpoint {}: {}", path.display(), e);
            let _ = fs::remove_file(path);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(checkpoint) => Some(checkpoint),
        Err(e) => {
            eprintln!(
                "⚠️  Checkpoint {} is corrupt ({}), removing it and starting fresh",
                path.display(),
                e
            );
            let _ = fs::remove_file(path);
            None
        }
    }
}

// Rewrites the result word list in full (one word per line)
pub fn write_word_list(path: &Path, words: &[String]) -> Result<()> {
    fs::write(path, words.join("\n"))
        .with_context(|| format!("writing word list to {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why temp file + rename instead of fs::write?
//    - fs::write can be interrupted halfway (crash, kill -9)
//    - rename() within one filesystem is atomic: the old file stays intact
//      until the new one fully replaces it
//
// 2. Why delete a corrupt checkpoint?
//    - If we left it in place, every restart would log the same warning and
//      resume nothing
//    - Deleting it makes the failure one-time: next run starts from seeds
//
// 3. What is with_context()?
//    - anyhow's way of attaching a human-readable note to an error
//    - The note shows up in the error chain when main prints it
// -----------------------------------------------------------------------------
