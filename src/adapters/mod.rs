//! Infrastructure adapters. Implement outbound ports.
//!
//! KEGG REST, filesystem export, terminal UI. Map errors to DomainError.

pub mod export;
pub mod kegg;
pub mod ui;
