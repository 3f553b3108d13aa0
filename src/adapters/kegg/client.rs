//! reqwest-backed KEGG gateway. Implements KeggGateway.
//!
//! Each call is a single GET. Optional bounded retries with exponential backoff
//! apply to transport errors and 5xx responses only.

use crate::domain::DomainError;
use crate::ports::{KeggGateway, KeggResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP adapter for the KEGG REST API.
pub struct ReqwestKeggGateway {
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ReqwestKeggGateway {
    /// Create a gateway.
    ///
    /// # Arguments
    /// * `timeout` - Per-request timeout (connect + body)
    /// * `user_agent` - Sent on every request
    /// * `max_retries` - Extra attempts after the first (0 = single attempt)
    /// * `retry_backoff` - Initial backoff; doubled after each retry
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        max_retries: u32,
        retry_backoff: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_retries,
            retry_backoff,
        })
    }

    async fn get_once(&self, url: &str) -> Result<KeggResponse, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Transport(format!("reading body of {} failed: {}", url, e)))?;

        Ok(KeggResponse::new(status, body.to_vec()))
    }

    /// Delay before retry number `attempt + 1`: the initial backoff doubled `attempt` times.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

#[async_trait::async_trait]
impl KeggGateway for ReqwestKeggGateway {
    async fn get(&self, url: &str) -> Result<KeggResponse, DomainError> {
        let mut attempt = 0u32;
        loop {
            let result = self.get_once(url).await;
            let retryable = match &result {
                Ok(resp) => resp.status >= 500,
                Err(_) => true,
            };
            if !retryable || attempt >= self.max_retries {
                if let Ok(resp) = &result {
                    debug!(url, status = resp.status, len = resp.body.len(), "KEGG response");
                }
                return result;
            }

            let delay = self.backoff_delay(attempt);
            match &result {
                Ok(resp) => warn!(url, status = resp.status, attempt, ?delay, "KEGG server error, retrying"),
                Err(e) => warn!(url, error = %e, attempt, ?delay, "KEGG request failed, retrying"),
            }
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
