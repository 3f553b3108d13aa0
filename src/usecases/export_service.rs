//! Export service. Writes the disease table, pathway maps and a JSON summary for download.
//!
//! Layout under the export root:
//! `{accession}/UniProt_Disease_Associations.csv`, `{accession}/{pathway}.png`, `{accession}/summary.json`.

use crate::adapters::export::diseases_to_csv;
use crate::domain::{AccessionId, DiseaseRecord, DomainError, GeneId, PathwaySummary, PipelineResult};
use crate::ports::ExportPort;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const DISEASE_CSV_FILE: &str = "UniProt_Disease_Associations.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Paths written by one export.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub csv: Option<PathBuf>,
    pub images: Vec<PathBuf>,
    pub summary: Option<PathBuf>,
}

#[derive(Serialize)]
struct Summary<'a> {
    accession: &'a AccessionId,
    gene_id: &'a GeneId,
    generated_at: DateTime<Utc>,
    pathways: &'a [PathwaySummary],
    diseases: &'a [DiseaseRecord],
}

pub struct ExportService {
    sink: Arc<dyn ExportPort>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn ExportPort>) -> Self {
        Self { sink }
    }

    /// Export a successful result. Other outcomes have nothing to download.
    pub async fn export(
        &self,
        accession: &AccessionId,
        result: &PipelineResult,
    ) -> Result<ExportReport, DomainError> {
        let PipelineResult::Success {
            gene_id,
            pathways,
            diseases,
        } = result
        else {
            return Err(DomainError::Export(format!(
                "nothing to export for {}: {}",
                accession,
                result.notice().message
            )));
        };

        let dir = Path::new(accession.as_str());
        let mut report = ExportReport::default();

        let csv = diseases_to_csv(diseases)
            .map_err(|e| DomainError::Export(format!("Failed to generate CSV: {}", e)))?;
        report.csv = Some(self.sink.write_file(&dir.join(DISEASE_CSV_FILE), &csv).await?);

        for image in result.images() {
            let name = format!("{}.png", image.pathway_id);
            report
                .images
                .push(self.sink.write_file(&dir.join(name), &image.bytes).await?);
        }

        let summary = Summary {
            accession,
            gene_id,
            generated_at: Utc::now(),
            pathways,
            diseases,
        };
        let json = serde_json::to_vec_pretty(&summary)
            .map_err(|e| DomainError::Export(format!("Failed to serialize summary: {}", e)))?;
        report.summary = Some(self.sink.write_file(&dir.join(SUMMARY_FILE), &json).await?);

        info!(
            accession = %accession,
            diseases = diseases.len(),
            images = report.images.len(),
            "export complete"
        );
        Ok(report)
    }
}
