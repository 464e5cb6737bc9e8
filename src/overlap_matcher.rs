use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::containers::{Diagnostic, NormalizedSv, SvRecord};
use crate::errors::PseudofinderError;
use crate::intron_index::IntronIndex;
use crate::sv_normalizer::normalize_sv;
use crate::utils;

/// gene name -> intron indices touched by at least one qualifying variant
pub type GeneHits = BTreeMap<String, BTreeSet<usize>>;

/// Matching results for one sample.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct SampleHits {
    pub sample: String,
    pub genes: GeneHits,
}

/// Counts of what happened to each record during matching.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct MatchStats {
    pub records: usize,
    pub filtered: usize,
    pub unparsable_bnd: usize,
    pub cross_chromosome: usize,
    pub unindexed_chromosome: usize,
    /// records that added introns to at least one gene
    pub contributing: usize,
}

/// Stream variant records against the intron index and collect, per gene,
/// the introns hit by variants that touch two or more distinct introns of
/// that gene.
///
/// Records failing FILTER, BNDs with unreadable ALTs and breakend pairs on
/// different chromosomes are skipped. Any error from the record stream or
/// the normalizer ends the run.
pub fn match_variants<I, F>(
    sample: &str,
    records: I,
    index: &IntronIndex,
    sink: &mut F,
) -> Result<(SampleHits, MatchStats), PseudofinderError>
where
    I: IntoIterator<Item = Result<SvRecord, PseudofinderError>>,
    F: FnMut(Diagnostic),
{
    let mut genes = GeneHits::new();
    let mut stats = MatchStats::default();

    for record_result in records {
        let record = record_result?;
        stats.records += 1;
        if !record.passes_filter() {
            stats.filtered += 1;
            continue;
        }
        let Some(sv) = normalize_sv(&record, sink)? else {
            stats.unparsable_bnd += 1;
            continue;
        };
        if !sv.is_intra_chromosomal() {
            stats.cross_chromosome += 1;
            continue;
        }
        if !index.has_chromosome(&sv.low.chrom) {
            stats.unindexed_chromosome += 1;
            continue;
        }

        let mut contributed = false;
        for (gene, introns) in introns_touched(index, &sv) {
            if introns.len() < utils::MIN_DISTINCT_INTRONS {
                continue;
            }
            debug!(
                "{} touches introns {:?} of {} ({} - {})",
                record, introns, gene, sv.low, sv.high
            );
            genes.entry(gene).or_default().extend(introns);
            contributed = true;
        }
        if contributed {
            stats.contributing += 1;
        }
    }

    Ok((
        SampleHits {
            sample: sample.to_string(),
            genes,
        },
        stats,
    ))
}

/// Introns per gene whose boundary windows contain either breakend position.
/// Both positions are looked up on the low breakend's chromosome.
pub fn introns_touched(index: &IntronIndex, sv: &NormalizedSv) -> GeneHits {
    let mut touched = GeneHits::new();
    for pos in [sv.low.pos, sv.high.pos] {
        for boundary in index.query(&sv.low.chrom, pos) {
            touched
                .entry(boundary.gene)
                .or_default()
                .insert(boundary.intron);
        }
    }
    touched
}
