//! Pipeline service. Orchestrates the accession -> gene -> pathways -> diseases -> details chain.
//!
//! Stages 1 and 2 short-circuit; stage 3 never stops early. With `concurrency > 1`
//! per-pathway and per-disease lookups run in parallel but results keep input order.

use crate::adapters::kegg::KeggEndpoints;
use crate::domain::{
    AccessionId, DiseaseId, DiseaseRecord, EmptyReason, FailureReason, PathwayId, PathwaySummary,
    PipelineResult, validate_png,
};
use crate::ports::KeggGateway;
use crate::usecases::lookups::{
    convert_accession, disease_details, diseases_for_pathway, pathway_image, pathways_for_gene,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Resolves UniProt accessions against KEGG.
pub struct PipelineService {
    gateway: Arc<dyn KeggGateway>,
    endpoints: KeggEndpoints,
    concurrency: usize,
}

impl PipelineService {
    /// Create a pipeline.
    ///
    /// # Arguments
    /// * `gateway` - KEGG gateway (HTTP or mock)
    /// * `endpoints` - URL templates
    /// * `concurrency` - Max in-flight lookups per stage; 1 runs strictly sequentially
    pub fn new(gateway: Arc<dyn KeggGateway>, endpoints: KeggEndpoints, concurrency: usize) -> Self {
        Self {
            gateway,
            endpoints,
            concurrency: concurrency.max(1),
        }
    }

    /// Run the full pipeline for one accession.
    pub async fn resolve(&self, accession: &AccessionId) -> PipelineResult {
        info!(accession = %accession, "converting UniProt ID to KEGG gene ID");
        let Some(gene_id) =
            convert_accession(self.gateway.as_ref(), &self.endpoints, accession).await
        else {
            warn!(accession = %accession, "conversion failed");
            return PipelineResult::Failed {
                reason: FailureReason::ConversionFailed,
            };
        };

        info!(accession = %accession, gene_id = %gene_id, "fetching pathways");
        let pathway_ids = pathways_for_gene(self.gateway.as_ref(), &self.endpoints, &gene_id).await;
        if pathway_ids.is_empty() {
            warn!(gene_id = %gene_id, "no pathways found");
            return PipelineResult::Empty {
                reason: EmptyReason::NoPathways,
                gene_id,
                pathways: Vec::new(),
            };
        }

        info!(
            gene_id = %gene_id,
            pathways = pathway_ids.len(),
            "fetching diseases and images"
        );
        let scanned = self.run_ordered(pathway_ids, scan_pathway).await;

        let mut pathways = Vec::with_capacity(scanned.len());
        let mut disease_ids = Vec::new();
        for (summary, ids) in scanned {
            disease_ids.extend(ids);
            pathways.push(summary);
        }

        if disease_ids.is_empty() {
            info!(gene_id = %gene_id, "no diseases found for the associated pathways");
            return PipelineResult::Empty {
                reason: EmptyReason::NoDiseases,
                gene_id,
                pathways,
            };
        }

        info!(diseases = disease_ids.len(), "fetching disease details");
        let diseases: Vec<DiseaseRecord> = self.run_ordered(disease_ids, fetch_detail).await;

        info!(
            accession = %accession,
            gene_id = %gene_id,
            pathways = pathways.len(),
            diseases = diseases.len(),
            "pipeline complete"
        );
        PipelineResult::Success {
            gene_id,
            pathways,
            diseases,
        }
    }

    /// Apply `task` to every item, returning outputs in input order.
    async fn run_ordered<T, R, F, Fut>(&self, items: Vec<T>, task: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(Arc<dyn KeggGateway>, KeggEndpoints, T) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        let mut out = Vec::with_capacity(items.len());

        if self.concurrency == 1 {
            for item in items {
                out.push(task(Arc::clone(&self.gateway), self.endpoints.clone(), item).await);
            }
            return out;
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let handles: Vec<_> = items
            .into_iter()
            .map(|item| {
                let sem = Arc::clone(&semaphore);
                let fut = task(Arc::clone(&self.gateway), self.endpoints.clone(), item);
                tokio::spawn(async move {
                    let _permit = sem.acquire_owned().await.ok();
                    fut.await
                })
            })
            .collect();

        // Awaiting handles in spawn order restores input order regardless of completion order.
        for handle in handles {
            let value = handle
                .await
                .unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()));
            out.push(value);
        }
        out
    }
}

/// Stage 3 for one pathway: disease list, then the map image if any diseases were linked.
async fn scan_pathway(
    gateway: Arc<dyn KeggGateway>,
    endpoints: KeggEndpoints,
    pathway_id: PathwayId,
) -> (PathwaySummary, Vec<DiseaseId>) {
    let diseases = diseases_for_pathway(gateway.as_ref(), &endpoints, &pathway_id).await;

    let image = if diseases.is_empty() {
        None
    } else {
        info!(pathway_id = %pathway_id, diseases = diseases.len(), "pathway is associated with diseases");
        match pathway_image(gateway.as_ref(), &endpoints, &pathway_id).await {
            Some(bytes) => match validate_png(&pathway_id, bytes) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!(pathway_id = %pathway_id, error = %e, "skipping pathway image");
                    None
                }
            },
            None => {
                warn!(pathway_id = %pathway_id, "pathway image unavailable");
                None
            }
        }
    };

    let summary = PathwaySummary {
        id: pathway_id,
        disease_count: diseases.len(),
        image,
    };
    (summary, diseases)
}

async fn fetch_detail(
    gateway: Arc<dyn KeggGateway>,
    endpoints: KeggEndpoints,
    disease_id: DiseaseId,
) -> DiseaseRecord {
    disease_details(gateway.as_ref(), &endpoints, &disease_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kegg::MockKeggGateway;
    use crate::domain::image::png_header;
    use crate::domain::{GeneId, NO_DESCRIPTION};
    use std::time::Duration;

    const BASE: &str = "http://kegg.test";

    fn endpoints() -> KeggEndpoints {
        KeggEndpoints::new(BASE)
    }

    fn record(name: &str, description: &str) -> String {
        format!(
            "ENTRY       X                           Disease\nNAME        {}\nDESCRIPTION {}\n///\n",
            name, description
        )
    }

    /// P01308 -> hsa:3630 -> [hsa04910 (no diseases), hsa04940 (H00408, H00409)].
    fn insulin_gateway() -> MockKeggGateway {
        let e = endpoints();
        let p1 = PathwayId::new("hsa04910");
        let p2 = PathwayId::new("hsa04940");
        MockKeggGateway::new()
            .with_text(
                e.convert_uniprot(&AccessionId::new("P01308")),
                "up:P01308\thsa:3630\n",
            )
            .with_text(
                e.link_pathways(&GeneId::new("hsa:3630")),
                "hsa:3630\tpath:hsa04910\nhsa:3630\tpath:hsa04940\n",
            )
            .with_text(e.link_diseases(&p1), "\n")
            .with_text(
                e.link_diseases(&p2),
                "path:hsa04940\tds:H00408\npath:hsa04940\tds:H00409\n",
            )
            .with_bytes(e.pathway_image(&p1), png_header(100, 100))
            .with_bytes(e.pathway_image(&p2), png_header(1200, 900))
            .with_text(
                e.disease_record(&DiseaseId::new("H00408")),
                &record("Diabetes mellitus", "A group of metabolic disorders"),
            )
            .with_text(
                e.disease_record(&DiseaseId::new("H00409")),
                &record("Type I diabetes mellitus", "Autoimmune destruction of beta cells"),
            )
    }

    fn service(gateway: MockKeggGateway, concurrency: usize) -> (PipelineService, Arc<MockKeggGateway>) {
        let gateway = Arc::new(gateway);
        let svc = PipelineService::new(
            Arc::clone(&gateway) as Arc<dyn KeggGateway>,
            endpoints(),
            concurrency,
        );
        (svc, gateway)
    }

    fn ids(result: &PipelineResult) -> Vec<&str> {
        result.diseases().iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unmapped_accession_fails_conversion() {
        let (svc, gw) = service(insulin_gateway(), 1);
        let result = svc.resolve(&AccessionId::new("NOPE")).await;
        assert_eq!(
            result,
            PipelineResult::Failed {
                reason: FailureReason::ConversionFailed
            }
        );
        assert_eq!(gw.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_gene_without_pathways_is_empty() {
        let e = endpoints();
        let gw = MockKeggGateway::new()
            .with_text(e.convert_uniprot(&AccessionId::new("Q1")), "up:Q1\thsa:1\n")
            .with_text(e.link_pathways(&GeneId::new("hsa:1")), "");
        let (svc, _) = service(gw, 1);

        let result = svc.resolve(&AccessionId::new("Q1")).await;
        match &result {
            PipelineResult::Empty {
                reason, gene_id, ..
            } => {
                assert_eq!(*reason, EmptyReason::NoPathways);
                assert_eq!(gene_id.as_str(), "hsa:1");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(result.notice().message, "No pathways found for this gene.");
    }

    #[tokio::test]
    async fn test_pathways_without_diseases_is_empty_without_images() {
        let e = endpoints();
        let p1 = PathwayId::new("hsa00010");
        let gw = MockKeggGateway::new()
            .with_text(e.convert_uniprot(&AccessionId::new("Q2")), "up:Q2\thsa:2\n")
            .with_text(
                e.link_pathways(&GeneId::new("hsa:2")),
                "hsa:2\tpath:hsa00010\nhsa:2\tpath:hsa00020\n",
            )
            .with_bytes(e.pathway_image(&p1), png_header(10, 10));
        let (svc, gw) = service(gw, 1);

        let result = svc.resolve(&AccessionId::new("Q2")).await;
        match &result {
            PipelineResult::Empty { reason, pathways, .. } => {
                assert_eq!(*reason, EmptyReason::NoDiseases);
                assert_eq!(pathways.len(), 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(result.images().count(), 0);
        assert!(!gw.requests().iter().any(|u| u.ends_with("/image")));
    }

    #[tokio::test]
    async fn test_order_and_only_disease_pathways_get_images() {
        let (svc, gw) = service(insulin_gateway(), 1);
        let result = svc.resolve(&AccessionId::new("P01308")).await;

        assert!(result.is_success());
        assert_eq!(result.gene_id().map(GeneId::as_str), Some("hsa:3630"));
        assert_eq!(ids(&result), vec!["H00408", "H00409"]);
        assert_eq!(result.diseases()[1].name, "Type I diabetes mellitus");

        let images: Vec<_> = result.images().collect();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].pathway_id.as_str(), "hsa04940");
        assert_eq!((images[0].width, images[0].height), (1200, 900));

        assert_eq!(result.pathways().len(), 2);
        assert_eq!(result.pathways()[0].disease_count, 0);
        assert!(
            !gw.requests()
                .contains(&format!("{}/get/hsa04910/image", BASE))
        );
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let (svc, _) = service(insulin_gateway(), 1);
        let acc = AccessionId::new("P01308");
        let first = svc.resolve(&acc).await;
        let second = svc.resolve(&acc).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_duplicate_disease_across_pathways_kept() {
        let e = endpoints();
        let gw = MockKeggGateway::new()
            .with_text(e.convert_uniprot(&AccessionId::new("Q3")), "up:Q3\thsa:3\n")
            .with_text(
                e.link_pathways(&GeneId::new("hsa:3")),
                "hsa:3\tpath:hsaA\nhsa:3\tpath:hsaB\n",
            )
            .with_text(e.link_diseases(&PathwayId::new("hsaA")), "path:hsaA\tds:H00409\n")
            .with_text(
                e.link_diseases(&PathwayId::new("hsaB")),
                "path:hsaB\tds:H00001\npath:hsaB\tds:H00409\n",
            );
        let (svc, _) = service(gw, 1);

        let result = svc.resolve(&AccessionId::new("Q3")).await;
        assert_eq!(ids(&result), vec!["H00409", "H00001", "H00409"]);
    }

    #[tokio::test]
    async fn test_failed_detail_lookup_uses_default_record() {
        let e = endpoints();
        let gw = MockKeggGateway::new()
            .with_text(e.convert_uniprot(&AccessionId::new("Q4")), "up:Q4\thsa:4\n")
            .with_text(e.link_pathways(&GeneId::new("hsa:4")), "hsa:4\tpath:hsaC\n")
            .with_text(e.link_diseases(&PathwayId::new("hsaC")), "path:hsaC\tds:H00777\n")
            .with_transport_error(e.disease_record(&DiseaseId::new("H00777")));
        let (svc, _) = service(gw, 1);

        let result = svc.resolve(&AccessionId::new("Q4")).await;
        let rec = &result.diseases()[0];
        assert_eq!(rec.id.as_str(), "H00777");
        assert_eq!(rec.name, "H00777");
        assert_eq!(rec.description, NO_DESCRIPTION);
        // Image 404 is skipped, not a failure.
        assert!(result.is_success());
        assert_eq!(result.images().count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_image_bytes_are_skipped() {
        let e = endpoints();
        let p = PathwayId::new("hsa04940");
        let gw = insulin_gateway().with_bytes(e.pathway_image(&p), b"<html>error</html>".to_vec());
        let (svc, _) = service(gw, 1);

        let result = svc.resolve(&AccessionId::new("P01308")).await;
        assert!(result.is_success());
        assert_eq!(result.images().count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_run_preserves_order() {
        let e = endpoints();
        let slow = insulin_gateway()
            .with_delay(e.link_diseases(&PathwayId::new("hsa04910")), Duration::from_millis(50))
            .with_delay(e.disease_record(&DiseaseId::new("H00408")), Duration::from_millis(50));

        let (sequential, _) = service(insulin_gateway(), 1);
        let (parallel, _) = service(slow, 4);
        let acc = AccessionId::new("P01308");

        let expected = sequential.resolve(&acc).await;
        let actual = parallel.resolve(&acc).await;
        assert_eq!(actual, expected);
        assert_eq!(ids(&actual), vec!["H00408", "H00409"]);
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let svc = PipelineService::new(Arc::new(MockKeggGateway::new()), endpoints(), 0);
        assert_eq!(svc.concurrency, 1);
    }
}
