use std::collections::BTreeMap;
use std::io::Write;

use log::debug;
use serde::Serialize;

use crate::errors::PseudofinderError;
use crate::overlap_matcher::SampleHits;

const HEADER: [&str; 5] = [
    "sample",
    "gene",
    "max_introns",
    "num_introns_affected",
    "introns_affected",
];

/// One output row: a gene with introns hit in a sample.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct GeneHitRow {
    pub sample: String,
    pub gene: String,
    pub max_introns: usize,
    pub num_introns_affected: usize,
    /// ascending intron indices joined by ';'
    pub introns_affected: String,
}

/// Rows for every gene with at least one hit intron, ordered by gene name.
pub fn gene_hit_rows(
    sample_hits: &SampleHits,
    max_introns: &BTreeMap<String, usize>,
) -> Vec<GeneHitRow> {
    sample_hits
        .genes
        .iter()
        .filter(|(_, introns)| !introns.is_empty())
        .map(|(gene, introns)| GeneHitRow {
            sample: sample_hits.sample.clone(),
            gene: gene.clone(),
            max_introns: max_introns.get(gene).copied().unwrap_or_default(),
            num_introns_affected: introns.len(),
            introns_affected: introns
                .iter()
                .map(|intron| intron.to_string())
                .collect::<Vec<String>>()
                .join(";"),
        })
        .collect()
}

/// Write the CSV header followed by one row per affected gene.
/// Returns the number of data rows written.
pub fn write_results<W: Write>(
    sample_hits: &SampleHits,
    max_introns: &BTreeMap<String, usize>,
    writer: W,
) -> Result<usize, PseudofinderError> {
    let rows = gene_hit_rows(sample_hits, max_introns);
    // header written by hand so it also appears when there are no rows
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for row in rows.iter() {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| PseudofinderError::Output(e.to_string()))?;
    debug!("{} result rows written", rows.len());
    Ok(rows.len())
}
