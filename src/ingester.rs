use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use rust_htslib::bcf;
use rust_htslib::bcf::record::Numeric;
use rust_htslib::bcf::Read;

use crate::containers::{Diagnostic, SvRecord};
use crate::errors::PseudofinderError;
use crate::intron_index::IntronIndex;
use crate::utils;

/// INFO tags copied into `SvRecord::info`
const INFO_TAGS: [&str; 2] = ["SVTYPE", "END"];

/// Reads the exon coordinate file (plain or gzipped) and builds the intron
/// index from it.
pub fn load_intron_index<F>(
    exons_path: &str,
    window: u32,
    sink: &mut F,
) -> Result<IntronIndex, PseudofinderError>
where
    F: FnMut(Diagnostic),
{
    let lines = utils::read_file_from_path(exons_path)?;
    debug!("{} lines read from {}", lines.len(), exons_path);
    let index = IntronIndex::build(lines, window, sink)?;
    info!(
        "Indexed {} introns from {} genes",
        index.intron_count(),
        index.gene_count()
    );
    Ok(index)
}

/// Streams decoded records from a VCF, VCF.GZ or BCF file.
pub struct VcfRecords {
    reader: bcf::Reader,
    header: bcf::header::HeaderView,
}

impl VcfRecords {
    pub fn from_path(vcf_filename: &Path) -> Result<Self, PseudofinderError> {
        if !vcf_filename.exists() {
            return Err(PseudofinderError::io(
                vcf_filename,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }
        let reader = bcf::Reader::from_path(vcf_filename).map_err(|e| {
            PseudofinderError::io(
                vcf_filename,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()),
            )
        })?;
        let header = reader.header().clone();
        Ok(VcfRecords { reader, header })
    }
}

impl Iterator for VcfRecords {
    type Item = Result<SvRecord, PseudofinderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = self.reader.empty_record();
        match self.reader.read(&mut record)? {
            Ok(()) => Some(decode_record(&record, &self.header)),
            Err(e) => Some(Err(PseudofinderError::VcfRead(e.to_string()))),
        }
    }
}

/// Pull the fields the matcher needs out of an htslib record.
fn decode_record(
    record: &bcf::Record,
    header: &bcf::header::HeaderView,
) -> Result<SvRecord, PseudofinderError> {
    let chrom = get_vcf_record_chrom(record, header)?;

    let filters = record
        .filters()
        .map(|id| String::from_utf8_lossy(&header.id_to_name(id)).to_string())
        .collect();

    let mut info = HashMap::new();
    for tag in INFO_TAGS {
        if let Some(value) = get_optional_info_text(record, tag) {
            info.insert(tag.to_string(), value);
        }
    }

    let alts = record
        .alleles()
        .iter()
        .skip(1)
        .map(|allele| String::from_utf8_lossy(allele).to_string())
        .collect();

    Ok(SvRecord {
        chrom,
        pos: record.pos() + 1,
        filters,
        info,
        alts,
    })
}

/// Chromosome name of a record as written in the header, prefix untouched.
fn get_vcf_record_chrom(
    record: &bcf::Record,
    header: &bcf::header::HeaderView,
) -> Result<String, PseudofinderError> {
    let ref_id = record.rid().ok_or_else(|| {
        PseudofinderError::VcfRead("record without chromosome".to_string())
    })?;
    let chrom_bytes = header.rid2name(ref_id).map_err(|_| {
        PseudofinderError::VcfRead(format!("chromosome {} missing from header", ref_id))
    })?;
    Ok(String::from_utf8_lossy(chrom_bytes).to_string())
}

/// Returns an INFO field value as text. Integer fields are stringified, any
/// other single string value is kept verbatim.
fn get_optional_info_text(record: &bcf::Record, field: &str) -> Option<String> {
    if let Ok(Some(values)) = record.info(field.as_bytes()).integer() {
        // "." decodes to the htslib missing sentinel
        return values
            .first()
            .filter(|value| !value.is_missing())
            .map(|value| value.to_string());
    }
    if let Ok(Some(values)) = record.info(field.as_bytes()).string() {
        // the values are an array of strings at this point, make sure we only get one
        if values.len() == 1 {
            return Some(String::from_utf8_lossy(values[0]).to_string());
        }
    }
    None
}
