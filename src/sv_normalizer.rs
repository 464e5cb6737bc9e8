use crate::bnd_parser::parse_bnd_alt;
use crate::containers::{BreakSide, Breakend, Chromosome, Diagnostic, NormalizedSv, SvRecord};
use crate::errors::PseudofinderError;

/// SV types that carry their second breakend in INFO/END
const INTERVAL_SV_TYPES: [&str; 4] = ["DEL", "INV", "DUP", "INS"];

/// Reduce a record to its ordered pair of breakends.
///
/// Returns `Ok(None)` for a BND whose ALT cannot be read; that condition is
/// also reported to `sink`. Unknown SVTYPEs and interval types without a
/// usable END are fatal.
pub fn normalize_sv<F>(
    record: &SvRecord,
    sink: &mut F,
) -> Result<Option<NormalizedSv>, PseudofinderError>
where
    F: FnMut(Diagnostic),
{
    let svtype = record.info_value("SVTYPE").unwrap_or_default();

    if svtype == "BND" {
        let Some(bnd) = parse_bnd_alt(record.alts.as_slice())? else {
            sink(Diagnostic::UnparsableBnd {
                locus: record.to_string(),
                alt: record.alts.join(","),
            });
            return Ok(None);
        };
        let local = Breakend::new(Chromosome::new(&record.chrom)?, record.pos, bnd.local_side);
        let remote = Breakend::new(bnd.remote_chrom, bnd.remote_pos, bnd.remote_side);
        return Ok(Some(NormalizedSv::new(local, remote, bnd.replacement)));
    }

    if INTERVAL_SV_TYPES.contains(&svtype) {
        let end = match record.info_value("END") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| PseudofinderError::InvalidEnd(value.to_string()))?,
            None => return Err(PseudofinderError::MissingEnd(svtype.to_string())),
        };
        let chrom = Chromosome::new(&record.chrom)?;
        let start = Breakend::new(chrom.clone(), record.pos, BreakSide::Unspecified);
        let end = Breakend::new(chrom, end, BreakSide::Unspecified);
        return Ok(Some(NormalizedSv::new(start, end, String::new())));
    }

    let svtype = if svtype.is_empty() { "<missing>" } else { svtype };
    Err(PseudofinderError::UnsupportedSvType(svtype.to_string()))
}
