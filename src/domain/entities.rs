//! Domain entities. Transient value records produced by a single pipeline run.
//!
//! No HTTP/IO types here; adapters parse KEGG responses into these.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Description used when the disease record lookup itself fails.
pub const NO_DESCRIPTION: &str = "No description available";

/// Characters that would change which KEGG endpoint an accession addresses.
const URL_DELIMITERS: &[char] = &['/', '?', '#', '%', '\\'];

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// UniProt accession as typed by the user (e.g. `P01308`).
    AccessionId
);
opaque_id!(
    /// KEGG gene identifier (e.g. `hsa:3630`).
    GeneId
);
opaque_id!(
    /// KEGG pathway identifier without the `path:` prefix (e.g. `hsa04940`).
    PathwayId
);
opaque_id!(
    /// KEGG disease identifier without the `ds:` prefix (e.g. `H00409`).
    DiseaseId
);

impl AccessionId {
    /// Trim user input and reject blanks before any request is made.
    ///
    /// The accession is spliced into a URL path segment, so path, query and
    /// fragment delimiters and inner whitespace are refused.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAccession(
                "Please enter a valid UniProt ID".to_string(),
            ));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| URL_DELIMITERS.contains(c) || c.is_whitespace())
        {
            return Err(DomainError::InvalidAccession(format!(
                "{:?} contains {:?}, which is not allowed in a UniProt ID",
                trimmed, bad
            )));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// One row of the disease table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: DiseaseId,
    pub name: String,
    pub description: String,
}

impl DiseaseRecord {
    /// Record manufactured when the detail lookup fails outright.
    pub fn unavailable(id: &DiseaseId) -> Self {
        Self {
            id: id.clone(),
            name: id.as_str().to_string(),
            description: NO_DESCRIPTION.to_string(),
        }
    }
}

/// Validated pathway map image. `bytes` is the PNG exactly as served.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayImage {
    pub pathway_id: PathwayId,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PathwayImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathwayImage")
            .field("pathway_id", &self.pathway_id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A pathway enumerated for the gene. `image` is only fetched for pathways with diseases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwaySummary {
    pub id: PathwayId,
    pub disease_count: usize,
    pub image: Option<PathwayImage>,
}

/// Hard terminal states of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    ConversionFailed,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ConversionFailed => f.write_str("conversion failed"),
        }
    }
}

/// "Nothing found" terminal states of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    NoPathways,
    NoDiseases,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoPathways => f.write_str("no pathways found"),
            EmptyReason::NoDiseases => f.write_str("no diseases found"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// User-visible message for a pipeline outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Outcome of one end-to-end `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineResult {
    Failed {
        reason: FailureReason,
    },
    Empty {
        reason: EmptyReason,
        gene_id: GeneId,
        pathways: Vec<PathwaySummary>,
    },
    Success {
        gene_id: GeneId,
        pathways: Vec<PathwaySummary>,
        diseases: Vec<DiseaseRecord>,
    },
}

impl PipelineResult {
    pub fn gene_id(&self) -> Option<&GeneId> {
        match self {
            PipelineResult::Failed { .. } => None,
            PipelineResult::Empty { gene_id, .. } | PipelineResult::Success { gene_id, .. } => {
                Some(gene_id)
            }
        }
    }

    pub fn pathways(&self) -> &[PathwaySummary] {
        match self {
            PipelineResult::Failed { .. } => &[],
            PipelineResult::Empty { pathways, .. } | PipelineResult::Success { pathways, .. } => {
                pathways
            }
        }
    }

    pub fn diseases(&self) -> &[DiseaseRecord] {
        match self {
            PipelineResult::Success { diseases, .. } => diseases,
            _ => &[],
        }
    }

    /// Images attached to pathways, in pathway order.
    pub fn images(&self) -> impl Iterator<Item = &PathwayImage> {
        self.pathways().iter().filter_map(|p| p.image.as_ref())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success { .. })
    }

    pub fn notice(&self) -> Notice {
        let (severity, message) = match self {
            PipelineResult::Failed {
                reason: FailureReason::ConversionFailed,
            } => (
                Severity::Error,
                "Conversion failed. Please check the UniProt ID and try again.".to_string(),
            ),
            PipelineResult::Empty {
                reason: EmptyReason::NoPathways,
                ..
            } => (
                Severity::Error,
                "No pathways found for this gene.".to_string(),
            ),
            PipelineResult::Empty {
                reason: EmptyReason::NoDiseases,
                ..
            } => (
                Severity::Warning,
                "No diseases found for the associated pathways.".to_string(),
            ),
            PipelineResult::Success {
                pathways, diseases, ..
            } => (
                Severity::Info,
                format!(
                    "Found {} pathway(s) and {} disease association(s).",
                    pathways.len(),
                    diseases.len()
                ),
            ),
        };
        Notice { severity, message }
    }
}
