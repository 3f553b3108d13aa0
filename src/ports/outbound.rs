//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Raw answer from the KEGG REST service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeggResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl KeggResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8 text. Invalid sequences are replaced rather than rejected.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// KEGG REST gateway. One GET per call; no interpretation of the body.
#[async_trait::async_trait]
pub trait KeggGateway: Send + Sync {
    /// Issue a GET against `url`.
    ///
    /// Non-2xx statuses are returned as `Ok` so callers can decide what "not found" means.
    /// `Err(DomainError::Transport)` is reserved for connect/timeout/body-read failures.
    async fn get(&self, url: &str) -> Result<KeggResponse, DomainError>;
}

/// Export port. Persist result artifacts (CSV, PNG, JSON) for download.
#[async_trait::async_trait]
pub trait ExportPort: Send + Sync {
    /// Write `bytes` to `relative` under the export root, creating parent directories.
    /// Returns the path written.
    async fn write_file(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf, DomainError>;
}
