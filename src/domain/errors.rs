//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Connect/timeout/body-read failure. Callers treat this as "nothing found".
    #[error("KEGG transport error: {0}")]
    Transport(String),

    #[error("Invalid accession: {0}")]
    InvalidAccession(String),

    #[error("Invalid pathway image: {0}")]
    Image(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
