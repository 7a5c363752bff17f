// src/renderer/http.rs
// =============================================================================
// The production renderer, backed by reqwest.
//
// The dictionary's entry pages are server-rendered HTML, so "rendering" a
// page means fetching the top-level document and parsing it — no scripts,
// no stylesheets, no images. That is exactly the subresource-blocking the
// crawl wants for efficiency, and it falls out of using an HTTP client
// instead of a browser.
//
// Status codes are deliberately NOT treated as errors: the site serves its
// "entry not found" page as a normal response, and the validator is the one
// that decides what a page means. Only transport-level failures (timeout,
// connection refused, DNS) become RenderErrors.
//
// Rust concepts:
// - reqwest::Client: connection-pooled HTTP client, cheap to clone
// - tokio::time::timeout: bound any future with a deadline
// =============================================================================

use super::{RenderError, RenderSession, Renderer, RenderedPage};
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

// Builds rendering sessions over a shared HTTP client
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    // Creates the renderer, failing if the HTTP client cannot be built
    //
    // This is the crawl's one fatal startup point: if we can't construct a
    // client, there is nothing to crawl with and main reports the error.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("word-harvester/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }
}

impl Renderer for HttpRenderer {
    type Session = HttpSession;

    async fn open(&self) -> Result<HttpSession, RenderError> {
        // Client is an Arc internally, so each session shares the pool
        Ok(HttpSession {
            client: self.client.clone(),
        })
    }
}

// One logical browsing session
//
// reqwest has no per-tab state to speak of, but the worker still treats the
// session as disposable: after a fatal fetch error it drops this and opens
// a fresh one, mirroring how a crashed browser tab would be replaced.
pub struct HttpSession {
    client: Client,
}

impl RenderSession for HttpSession {
    async fn fetch(&mut self, url: &str, timeout: Duration) -> Result<RenderedPage, RenderError> {
        // The deadline covers the whole round-trip: request, headers, body
        let response = tokio::time::timeout(timeout, self.client.get(url).send())
            .await
            .map_err(|_| RenderError::Timeout)?
            .map_err(categorize)?;

        let html = tokio::time::timeout(timeout, response.text())
            .await
            .map_err(|_| RenderError::Timeout)?
            .map_err(categorize)?;

        Ok(RenderedPage::from_html(&html))
    }
}

// Maps a reqwest error onto our two renderer outcomes
fn categorize(error: reqwest::Error) -> RenderError {
    if error.is_timeout() {
        RenderError::Timeout
    } else {
        RenderError::Navigation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_builds() {
        assert!(HttpRenderer::new().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_navigation_error() {
        let renderer = HttpRenderer::new().unwrap();
        let mut session = renderer.open().await.unwrap();

        // A reserved invalid TLD can never resolve
        let result = session
            .fetch("http://word-harvester.invalid/kata", Duration::from_secs(5))
            .await;

        match result {
            Err(RenderError::Navigation(_)) | Err(RenderError::Timeout) => {}
            Ok(_) => panic!("fetch against .invalid should not succeed"),
        }
    }
}
