use regex::Regex;

use crate::containers::{BreakSide, Chromosome};
use crate::errors::PseudofinderError;
use crate::utils::MAX_POSITION;

/// Remote end of a breakend record as described by its ALT allele.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BndAlt {
    pub remote_chrom: Chromosome,
    pub remote_pos: i64,
    /// Bases next to the bracket group
    pub replacement: String,
    pub local_side: BreakSide,
    pub remote_side: BreakSide,
}

lazy_static::lazy_static! {
    /// The four breakend ALT forms (VCF 4.x section 5.4), tried in order.
    /// Each carries (local side, remote side). The chromosome group is greedy
    /// so names containing ':' split on the last colon.
    static ref BND_ALT_FORMS: [(Regex, BreakSide, BreakSide); 4] = [
        // t[p[
        (
            Regex::new(r"^(?P<t>[^\[\]]+)\[(?P<chrom>[^\[\]]+):(?P<pos>\d+)\[$")
                .expect("invalid regex in source code"),
            BreakSide::Right,
            BreakSide::Left,
        ),
        // t]p]
        (
            Regex::new(r"^(?P<t>[^\[\]]+)\](?P<chrom>[^\[\]]+):(?P<pos>\d+)\]$")
                .expect("invalid regex in source code"),
            BreakSide::Right,
            BreakSide::Right,
        ),
        // ]p]t
        (
            Regex::new(r"^\](?P<chrom>[^\[\]]+):(?P<pos>\d+)\](?P<t>[^\[\]]+)$")
                .expect("invalid regex in source code"),
            BreakSide::Left,
            BreakSide::Right,
        ),
        // [p[t
        (
            Regex::new(r"^\[(?P<chrom>[^\[\]]+):(?P<pos>\d+)\[(?P<t>[^\[\]]+)$")
                .expect("invalid regex in source code"),
            BreakSide::Left,
            BreakSide::Left,
        ),
    ];
}

/// Decode the ALT column of a BND record.
///
/// The record must carry exactly one ALT allele, anything else is a fatal
/// `MultiAltBnd`. `Ok(None)` means the allele matched none of the four
/// breakend forms and the caller should skip the record.
pub fn parse_bnd_alt<S: AsRef<str>>(alts: &[S]) -> Result<Option<BndAlt>, PseudofinderError> {
    if alts.len() != 1 {
        return Err(PseudofinderError::MultiAltBnd(alts.len()));
    }
    let alt = alts[0].as_ref();

    for (pattern, local_side, remote_side) in BND_ALT_FORMS.iter() {
        let Some(captures) = pattern.captures(alt) else {
            continue;
        };
        // out of range for a position, treat like any other unreadable allele
        let remote_pos = match captures["pos"].parse::<i64>() {
            Ok(pos) if pos <= MAX_POSITION => pos,
            _ => return Ok(None),
        };
        return Ok(Some(BndAlt {
            remote_chrom: Chromosome::new(&captures["chrom"])?,
            remote_pos,
            replacement: captures["t"].to_string(),
            local_side: *local_side,
            remote_side: *remote_side,
        }));
    }
    Ok(None)
}
