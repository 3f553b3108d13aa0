//! KEGG adapter module. Implements KeggGateway over the KEGG REST API.
//!
//! Provides the reqwest gateway, URL templates, response parsers and a mock gateway for testing.

pub mod client;
pub mod endpoints;
pub mod mock;
pub mod parser;

pub use client::ReqwestKeggGateway;
pub use endpoints::{DEFAULT_BASE_URL, DISEASE_PREFIX, KeggEndpoints, PATHWAY_PREFIX};
pub use mock::MockKeggGateway;
