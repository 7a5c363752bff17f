// src/renderer/mod.rs
// =============================================================================
// This module is the crawler's window onto the dictionary site.
//
// The crawl engine never talks to the network directly. It asks a Renderer
// for a session, and asks the session to fetch a rendered entry page. That
// indirection buys us two things:
// - The production renderer (http.rs) can be swapped for the in-memory fake
//   (fake.rs) in tests, so the whole pipeline is testable offline
// - A session that hits a fatal transport error is simply dropped and
//   recreated, exactly like closing and reopening a browser tab
//
// Submodules:
// - page: RenderedPage, the parsed DOM handed to the validator/extractor
// - http: the reqwest-backed production implementation
// - fake: an in-memory implementation, tests only
//
// Rust concepts:
// - Traits with associated types: Renderer picks its own Session type
// - async fn in traits: workers await open() and fetch() generically
// =============================================================================

mod http;
mod page;

#[cfg(test)]
pub mod fake;

pub use http::HttpRenderer;
pub use page::RenderedPage;

use std::time::Duration;

// What can go wrong between us and the dictionary site
//
// Both variants are recoverable at the word level: the worker logs, drops
// its session, and moves on. Nothing here is ever fatal to the crawl.
#[derive(Debug)]
pub enum RenderError {
    /// The page did not arrive within the configured timeout
    Timeout,
    /// Navigation or transport failure (connection refused, DNS, ...)
    Navigation(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Timeout => write!(f, "navigation timed out"),
            RenderError::Navigation(reason) => write!(f, "navigation failed: {}", reason),
        }
    }
}

impl std::error::Error for RenderError {}

// A source of rendering sessions
//
// open() can fail at startup (e.g. the HTTP client cannot be built); that is
// the one renderer error the crawl does NOT recover from — main surfaces it
// and exits before any state exists.
pub trait Renderer {
    type Session: RenderSession;

    async fn open(&self) -> Result<Self::Session, RenderError>;
}

// One live rendering session, fetching pages until it errors or is dropped
//
// fetch() takes &mut self because a session is a scoped, stateful resource:
// each worker owns its own and replaces it after a fatal error.
pub trait RenderSession {
    async fn fetch(&mut self, url: &str, timeout: Duration) -> Result<RenderedPage, RenderError>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an associated type instead of Box<dyn RenderSession>?
//    - Each renderer knows concretely what its sessions look like
//    - The worker pool is generic over the renderer, so the compiler
//      monomorphizes everything — no boxing, no dynamic dispatch
//
// 2. Why is Timeout separate from Navigation?
//    - They're handled identically today (drop session, skip word), but the
//      logs distinguish them, which matters when tuning the interval
// -----------------------------------------------------------------------------
