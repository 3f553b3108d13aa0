//! KEGG REST URL templates.

use crate::domain::{AccessionId, DiseaseId, GeneId, PathwayId};

pub const DEFAULT_BASE_URL: &str = "https://rest.kegg.jp";

/// Namespace prefix on pathway IDs in link responses.
pub const PATHWAY_PREFIX: &str = "path:";
/// Namespace prefix on disease IDs in link responses.
pub const DISEASE_PREFIX: &str = "ds:";

/// Builds request URLs against a fixed base.
#[derive(Debug, Clone)]
pub struct KeggEndpoints {
    base_url: String,
}

impl KeggEndpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn convert_uniprot(&self, accession: &AccessionId) -> String {
        format!("{}/conv/genes/uniprot:{}", self.base_url, accession)
    }

    pub fn link_pathways(&self, gene_id: &GeneId) -> String {
        format!("{}/link/pathway/{}", self.base_url, gene_id)
    }

    pub fn link_diseases(&self, pathway_id: &PathwayId) -> String {
        format!("{}/link/disease/{}{}", self.base_url, PATHWAY_PREFIX, pathway_id)
    }

    pub fn disease_record(&self, disease_id: &DiseaseId) -> String {
        format!("{}/get/{}{}", self.base_url, DISEASE_PREFIX, disease_id)
    }

    pub fn pathway_image(&self, pathway_id: &PathwayId) -> String {
        format!("{}/get/{}/image", self.base_url, pathway_id)
    }
}

impl Default for KeggEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
