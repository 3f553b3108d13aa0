//! Export adapters. CSV serialization and file-system output for downloads.

pub mod csv_export;
pub mod fs_export;

pub use csv_export::{DISEASE_CSV_HEADER, diseases_to_csv};
pub use fs_export::FsExporter;
