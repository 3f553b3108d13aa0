//! Disease table CSV. Uses the `csv` crate for quoting/escaping.

use crate::domain::DiseaseRecord;

/// Header row of the exported table.
pub const DISEASE_CSV_HEADER: [&str; 3] = ["KEGG Disease ID", "Disease Name", "Description"];

/// Convert disease records to CSV bytes (comma-delimited, header row, one row per record).
///
/// Duplicate IDs are written as separate rows.
pub fn diseases_to_csv(records: &[DiseaseRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(DISEASE_CSV_HEADER)?;
    for rec in records {
        wtr.write_record([rec.id.as_str(), rec.name.as_str(), rec.description.as_str()])?;
    }

    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))
}
