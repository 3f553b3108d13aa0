//! kegg-finder: UniProt accession -> KEGG pathways, diseases and pathway maps, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
