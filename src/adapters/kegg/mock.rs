//! In-memory KEGG gateway for tests.
//!
//! Responses are keyed by full URL. Unknown URLs answer 404 with an empty body,
//! which is what KEGG does for unknown identifiers.

use crate::domain::DomainError;
use crate::ports::{KeggGateway, KeggResponse};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Mock gateway. Records every requested URL in call order.
#[derive(Default)]
pub struct MockKeggGateway {
    responses: HashMap<String, KeggResponse>,
    transport_failures: HashSet<String>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl MockKeggGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with 200 and a text body.
    pub fn with_text(mut self, url: impl Into<String>, body: &str) -> Self {
        self.responses
            .insert(url.into(), KeggResponse::new(200, body.as_bytes()));
        self
    }

    /// Answer `url` with 200 and a binary body.
    pub fn with_bytes(mut self, url: impl Into<String>, body: Vec<u8>) -> Self {
        self.responses.insert(url.into(), KeggResponse::new(200, body));
        self
    }

    /// Answer `url` with the given status and an empty body.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), KeggResponse::new(status, Vec::new()));
        self
    }

    /// Fail `url` at the transport level.
    pub fn with_transport_error(mut self, url: impl Into<String>) -> Self {
        self.transport_failures.insert(url.into());
        self
    }

    /// Delay the answer for `url` (used to force out-of-order completion).
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// URLs requested so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl KeggGateway for MockKeggGateway {
    async fn get(&self, url: &str) -> Result<KeggResponse, DomainError> {
        info!(url, "[MOCK] KEGG GET");
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if self.transport_failures.contains(url) {
            return Err(DomainError::Transport(format!("[MOCK] connection reset: {}", url)));
        }
        Ok(self
            .responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| KeggResponse::new(404, Vec::new())))
    }
}
