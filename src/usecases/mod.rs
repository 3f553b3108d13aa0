//! Application use cases. Orchestrate domain logic via ports.

pub mod export_service;
pub mod lookups;
pub mod pipeline_service;

pub use export_service::{ExportReport, ExportService};
pub use pipeline_service::PipelineService;
