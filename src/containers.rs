use core::fmt;
use std::collections::HashMap;

use crate::errors::PseudofinderError;

/// Chromosome name with any leading "chr" removed, so that "chr5" and "5"
/// compare equal.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Chromosome {
    name: String,
}

impl Chromosome {
    pub fn new(raw_name: &str) -> Result<Self, PseudofinderError> {
        let name = raw_name.strip_prefix("chr").unwrap_or(raw_name);
        if name.is_empty() {
            return Err(PseudofinderError::EmptyChromosome);
        }
        Ok(Chromosome {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}

/// Side of the reference position a breakpoint joins on, forward strand.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum BreakSide {
    Left,
    Right,
    Unspecified,
}

/// One end of a variant. Ordering is lexicographic over
/// (chromosome, position, side), which the derive gives us from field order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Breakend {
    pub chrom: Chromosome,
    /// 1-based position
    pub pos: i64,
    pub side: BreakSide,
}

impl Breakend {
    pub fn new(chrom: Chromosome, pos: i64, side: BreakSide) -> Self {
        Breakend { chrom, pos, side }
    }
}

impl fmt::Display for Breakend {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{} ({:?})", self.chrom, self.pos, self.side)
    }
}

/// A single variant call reduced to an ordered pair of breakends.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NormalizedSv {
    pub low: Breakend,
    pub high: Breakend,
    /// Inserted/replacement sequence from a BND ALT, empty otherwise
    pub replacement: String,
}

impl NormalizedSv {
    pub fn new(first: Breakend, second: Breakend, replacement: String) -> Self {
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        NormalizedSv {
            low,
            high,
            replacement,
        }
    }

    pub fn is_intra_chromosomal(&self) -> bool {
        self.low.chrom == self.high.chrom
    }
}

/// The fields of one VCF record that the matcher consumes, already decoded
/// from the container format.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct SvRecord {
    pub chrom: String,
    /// 1-based start position
    pub pos: i64,
    /// FILTER column values. Empty when the column is unset.
    pub filters: Vec<String>,
    /// INFO values as text, keyed by tag (SVTYPE, END, ...)
    pub info: HashMap<String, String>,
    pub alts: Vec<String>,
}

impl SvRecord {
    /// Unset FILTER and PASS both count as passing.
    pub fn passes_filter(&self) -> bool {
        self.filters
            .iter()
            .all(|filter| filter == "PASS" || filter == ".")
    }

    pub fn info_value(&self, tag: &str) -> Option<&str> {
        self.info.get(tag).map(|value| value.as_str())
    }
}

impl fmt::Display for SvRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.chrom, self.pos)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum BoundaryKind {
    Start,
    End,
}

/// Tag stored with each window in the intron interval index.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct IntronBoundary {
    pub gene: String,
    /// 0-based index of the intron within its gene, by sorted (start, end)
    pub intron: usize,
    pub kind: BoundaryKind,
}

/// Recoverable conditions, handed to a caller-supplied sink rather than
/// aborting the run.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Diagnostic {
    MalformedExonLine { line_number: usize, reason: String },
    UnparsableBnd { locus: String, alt: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedExonLine {
                line_number,
                reason,
            } => write!(
                formatter,
                "skipping malformed exon file line {line_number}: {reason}"
            ),
            Diagnostic::UnparsableBnd { locus, alt } => {
                write!(formatter, "skipping unparsable BND at {locus}: {alt}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakend(chrom: &str, pos: i64, side: BreakSide) -> Breakend {
        Breakend::new(Chromosome::new(chrom).unwrap(), pos, side)
    }

    #[test]
    fn test_chromosome_strips_prefix() {
        let with_prefix = Chromosome::new("chr5").unwrap();
        let without_prefix = Chromosome::new("5").unwrap();
        assert_eq!(with_prefix, without_prefix);
        assert_eq!(with_prefix.name(), "5");
        // only a leading prefix is removed
        assert_eq!(Chromosome::new("Xchr").unwrap().name(), "Xchr");
    }

    #[test]
    fn test_chromosome_empty() {
        assert!(matches!(
            Chromosome::new(""),
            Err(PseudofinderError::EmptyChromosome)
        ));
        assert!(matches!(
            Chromosome::new("chr"),
            Err(PseudofinderError::EmptyChromosome)
        ));
    }

    #[test]
    fn test_breakend_ordering() {
        let a = breakend("1", 100, BreakSide::Right);
        let b = breakend("1", 200, BreakSide::Left);
        let c = breakend("1", 200, BreakSide::Right);
        let d = breakend("2", 50, BreakSide::Left);
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
        // chromosome order is by name, so "10" sorts before "2"
        assert!(breakend("10", 1, BreakSide::Left) < d);
    }

    #[test]
    fn test_normalized_sv_orders_breakends() {
        let sv = NormalizedSv::new(
            breakend("1", 500, BreakSide::Unspecified),
            breakend("1", 100, BreakSide::Unspecified),
            String::new(),
        );
        assert_eq!(sv.low.pos, 100);
        assert_eq!(sv.high.pos, 500);
        assert!(sv.is_intra_chromosomal());

        let translocation = NormalizedSv::new(
            breakend("chr3", 10, BreakSide::Left),
            breakend("2", 900, BreakSide::Right),
            "A".to_string(),
        );
        assert_eq!(translocation.low.chrom.name(), "2");
        assert!(!translocation.is_intra_chromosomal());
    }

    #[test]
    fn test_passes_filter() {
        let mut record = SvRecord::default();
        assert!(record.passes_filter());
        record.filters = vec!["PASS".to_string()];
        assert!(record.passes_filter());
        record.filters = vec!["LowQual".to_string()];
        assert!(!record.passes_filter());
    }
}
