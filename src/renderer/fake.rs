// src/renderer/fake.rs
// =============================================================================
// An in-memory renderer for tests (compiled only under cfg(test)).
//
// Pages are a url -> html map; anything not in the map fails with a
// navigation error, which is how tests exercise the worker's
// drop-and-recreate session handling. open() calls are counted so tests can
// assert that a failed session really was replaced.
// =============================================================================

use super::{RenderError, RenderSession, Renderer, RenderedPage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct FakeRenderer {
    pages: Arc<HashMap<String, String>>,
    opens: AtomicUsize,
}

impl FakeRenderer {
    // Builds a renderer serving the given url -> html map
    pub fn with_pages(pages: HashMap<String, String>) -> Self {
        Self {
            pages: Arc::new(pages),
            opens: AtomicUsize::new(0),
        }
    }

    // How many sessions have been opened so far
    pub fn opened_sessions(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl Renderer for FakeRenderer {
    type Session = FakeSession;

    async fn open(&self) -> Result<FakeSession, RenderError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            pages: Arc::clone(&self.pages),
        })
    }
}

pub struct FakeSession {
    pages: Arc<HashMap<String, String>>,
}

impl RenderSession for FakeSession {
    async fn fetch(&mut self, url: &str, _timeout: Duration) -> Result<RenderedPage, RenderError> {
        match self.pages.get(url) {
            Some(html) => Ok(RenderedPage::from_html(html)),
            None => Err(RenderError::Navigation(format!("no page for {}", url))),
        }
    }
}
