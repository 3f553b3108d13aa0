//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod image;

pub use entities::{
    AccessionId, DiseaseId, DiseaseRecord, EmptyReason, FailureReason, GeneId, NO_DESCRIPTION,
    Notice, PathwayId, PathwayImage, PathwaySummary, PipelineResult, Severity,
};
pub use errors::DomainError;
pub use image::validate_png;
