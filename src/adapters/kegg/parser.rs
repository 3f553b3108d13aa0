//! Map KEGG flat-text responses to domain values.
//!
//! Link and conversion responses are TAB-separated two-field records, one per line.
//! Database records (`/get`) use a 12-column tag area followed by the value.

use crate::domain::{DiseaseId, DiseaseRecord, GeneId};
use tracing::warn;

const NAME_TAG: &str = "NAME";
const DESCRIPTION_TAG: &str = "DESCRIPTION";

/// Second field of a `left\tright` record, trimmed. `None` if the line has no TAB.
fn second_field(line: &str) -> Option<&str> {
    line.split('\t').nth(1).map(str::trim)
}

/// Parse a `/conv` response. Only the first mapping is used.
pub fn parse_conversion(body: &str) -> Option<GeneId> {
    let first = body.lines().map(str::trim).find(|l| !l.is_empty())?;
    match second_field(first) {
        Some(gene) if !gene.is_empty() => Some(GeneId::new(gene)),
        _ => {
            warn!(line = %first, "conversion record has no target field");
            None
        }
    }
}

/// Parse a `/link` response, stripping `prefix` from the target field.
///
/// Blank lines are skipped; lines without a TAB are skipped with a warning.
/// Order follows the response.
pub fn parse_link_targets(body: &str, prefix: &str) -> Vec<String> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match second_field(line) {
            Some(target) if !target.is_empty() => {
                Some(target.strip_prefix(prefix).unwrap_or(target).to_string())
            }
            _ => {
                warn!(line = %line, "skipping malformed link record");
                None
            }
        })
        .collect()
}

/// Value of a tagged record line, or `None` if the line carries a different tag.
fn tagged_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(tag)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

/// Parse a `/get/ds:` record.
///
/// Takes the first NAME line and the first DESCRIPTION line; scanning stops at the
/// DESCRIPTION line, so continuation lines are never read.
pub fn parse_disease_record(id: &DiseaseId, body: &str) -> DiseaseRecord {
    let mut name: Option<String> = None;
    let mut description = String::new();

    for line in body.lines() {
        if name.is_none() {
            if let Some(value) = tagged_value(line, NAME_TAG) {
                name = Some(value.to_string());
                continue;
            }
        }
        if let Some(value) = tagged_value(line, DESCRIPTION_TAG) {
            description = value.to_string();
            break;
        }
    }

    DiseaseRecord {
        id: id.clone(),
        name: name.unwrap_or_default(),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kegg::endpoints::{DISEASE_PREFIX, PATHWAY_PREFIX};

    const INSULIN_RECORD: &str = "\
ENTRY       H00409                      Disease
NAME        Type I diabetes mellitus
DESCRIPTION Type I diabetes mellitus (T1DM) is a multifactorial disorder
            that results from autoimmune destruction of pancreatic beta cells.
CATEGORY    Endocrine and metabolic disease
///
";

    #[test]
    fn test_conversion_basic() {
        let gene = parse_conversion("up:P01308\thsa:3630\n").unwrap();
        assert_eq!(gene.as_str(), "hsa:3630");
    }

    #[test]
    fn test_conversion_multiple_mappings_takes_first() {
        let body = "up:Q99999\thsa:1\nup:Q99999\thsa:2\n";
        assert_eq!(parse_conversion(body).unwrap().as_str(), "hsa:1");
    }

    #[test]
    fn test_conversion_blank_or_malformed() {
        assert!(parse_conversion("").is_none());
        assert!(parse_conversion("\n  \n").is_none());
        assert!(parse_conversion("up:P01308 hsa:3630").is_none());
    }

    #[test]
    fn test_link_pathways_strip_prefix_in_order() {
        let body = "hsa:3630\tpath:hsa04910\nhsa:3630\tpath:hsa04940\nhsa:3630\tpath:hsa04930\n";
        assert_eq!(
            parse_link_targets(body, PATHWAY_PREFIX),
            vec!["hsa04910", "hsa04940", "hsa04930"]
        );
    }

    #[test]
    fn test_link_diseases_filters_blank_and_malformed() {
        let body = "path:hsa04940\tds:H00408\n\n   \ngarbage\npath:hsa04940\tds:H00409\n";
        assert_eq!(
            parse_link_targets(body, DISEASE_PREFIX),
            vec!["H00408", "H00409"]
        );
    }

    #[test]
    fn test_link_without_prefix_kept_verbatim() {
        assert_eq!(parse_link_targets("a\tH00001\n", DISEASE_PREFIX), vec!["H00001"]);
    }

    #[test]
    fn test_disease_record_truncates_description_to_first_line() {
        let rec = parse_disease_record(&DiseaseId::new("H00409"), INSULIN_RECORD);
        assert_eq!(rec.id.as_str(), "H00409");
        assert_eq!(rec.name, "Type I diabetes mellitus");
        assert_eq!(
            rec.description,
            "Type I diabetes mellitus (T1DM) is a multifactorial disorder"
        );
    }

    #[test]
    fn test_disease_record_missing_fields_default_empty() {
        let rec = parse_disease_record(&DiseaseId::new("H00001"), "ENTRY       H00001\n///\n");
        assert_eq!(rec.name, "");
        assert_eq!(rec.description, "");
    }

    #[test]
    fn test_disease_record_first_name_wins() {
        let body = "NAME        First name\nNAME        Second name\n";
        let rec = parse_disease_record(&DiseaseId::new("H1"), body);
        assert_eq!(rec.name, "First name");
    }

    #[test]
    fn test_tag_must_be_whole_word() {
        assert_eq!(tagged_value("NAMES       x", NAME_TAG), None);
        assert_eq!(tagged_value("NAME        x", NAME_TAG), Some("x"));
        assert_eq!(tagged_value("NAME", NAME_TAG), Some(""));
    }

    #[test]
    fn test_description_before_name_stops_scan() {
        let body = "DESCRIPTION Early\nNAME        Late\n";
        let rec = parse_disease_record(&DiseaseId::new("H2"), body);
        assert_eq!(rec.description, "Early");
        assert_eq!(rec.name, "");
    }
}
