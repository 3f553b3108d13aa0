//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI invokes application use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive lookup loop until the user exits.
    async fn run(&self) -> Result<(), DomainError>;

    /// Resolve the given accessions without prompting (batch mode).
    async fn run_batch(&self, accessions: &[String]) -> Result<(), DomainError>;
}
