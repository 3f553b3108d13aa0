//! The five KEGG lookups chained by the pipeline.
//!
//! Each is one GET followed by parsing. Transport errors and non-2xx statuses are
//! logged and collapsed into the lookup's "not found" shape:
//! absent for conversion and image, empty for the enumerators, a default record for details.

use crate::adapters::kegg::parser::{parse_conversion, parse_disease_record, parse_link_targets};
use crate::adapters::kegg::{DISEASE_PREFIX, KeggEndpoints, PATHWAY_PREFIX};
use crate::domain::{AccessionId, DiseaseId, DiseaseRecord, GeneId, PathwayId};
use crate::ports::{KeggGateway, KeggResponse};
use tracing::{debug, warn};

/// GET `url`, returning the response only if it is a 2xx.
async fn fetch_success(gateway: &dyn KeggGateway, url: &str) -> Option<KeggResponse> {
    match gateway.get(url).await {
        Ok(resp) if resp.is_success() => Some(resp),
        Ok(resp) => {
            debug!(url, status = resp.status, "KEGG returned non-success status");
            None
        }
        Err(e) => {
            warn!(url, error = %e, "KEGG request failed");
            None
        }
    }
}

/// Successful, non-blank text body.
async fn fetch_text(gateway: &dyn KeggGateway, url: &str) -> Option<String> {
    let resp = fetch_success(gateway, url).await?;
    let text = resp.text();
    if text.trim().is_empty() {
        return None;
    }
    Some(text.into_owned())
}

/// UniProt accession -> KEGG gene. `None` when no mapping exists or the request failed.
pub async fn convert_accession(
    gateway: &dyn KeggGateway,
    endpoints: &KeggEndpoints,
    accession: &AccessionId,
) -> Option<GeneId> {
    let body = fetch_text(gateway, &endpoints.convert_uniprot(accession)).await?;
    parse_conversion(&body)
}

/// Pathways containing `gene_id`, in server order.
pub async fn pathways_for_gene(
    gateway: &dyn KeggGateway,
    endpoints: &KeggEndpoints,
    gene_id: &GeneId,
) -> Vec<PathwayId> {
    match fetch_text(gateway, &endpoints.link_pathways(gene_id)).await {
        Some(body) => parse_link_targets(&body, PATHWAY_PREFIX)
            .into_iter()
            .map(PathwayId::new)
            .collect(),
        None => Vec::new(),
    }
}

/// Diseases linked to `pathway_id`, in server order. Duplicates are kept.
pub async fn diseases_for_pathway(
    gateway: &dyn KeggGateway,
    endpoints: &KeggEndpoints,
    pathway_id: &PathwayId,
) -> Vec<DiseaseId> {
    match fetch_text(gateway, &endpoints.link_diseases(pathway_id)).await {
        Some(body) => parse_link_targets(&body, DISEASE_PREFIX)
            .into_iter()
            .map(DiseaseId::new)
            .collect(),
        None => Vec::new(),
    }
}

/// Name and description of a disease. Never fails: a failed lookup yields
/// [`DiseaseRecord::unavailable`].
pub async fn disease_details(
    gateway: &dyn KeggGateway,
    endpoints: &KeggEndpoints,
    disease_id: &DiseaseId,
) -> DiseaseRecord {
    match fetch_success(gateway, &endpoints.disease_record(disease_id)).await {
        Some(resp) => parse_disease_record(disease_id, &resp.text()),
        None => DiseaseRecord::unavailable(disease_id),
    }
}

/// Raw pathway map bytes. Not validated here.
pub async fn pathway_image(
    gateway: &dyn KeggGateway,
    endpoints: &KeggEndpoints,
    pathway_id: &PathwayId,
) -> Option<Vec<u8>> {
    let resp = fetch_success(gateway, &endpoints.pathway_image(pathway_id)).await?;
    if resp.body.is_empty() {
        return None;
    }
    Some(resp.body)
}
