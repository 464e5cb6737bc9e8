use std::collections::{BTreeMap, BTreeSet, HashMap};

use bio::data_structures::interval_tree::ArrayBackedIntervalTree;
use log::debug;

use crate::containers::{BoundaryKind, Chromosome, Diagnostic, IntronBoundary};
use crate::errors::PseudofinderError;
use crate::utils::MAX_POSITION;

/// Alias for the interval tree that we use.
type IntervalTree = ArrayBackedIntervalTree<i64, IntronBoundary>;

/// Windows around intron boundaries, one interval tree per chromosome, plus
/// the number of introns each gene has.
pub struct IntronIndex {
    /// gene name -> number of distinct introns, degenerate ones included
    pub max_introns: BTreeMap<String, usize>,
    trees: HashMap<Chromosome, IntervalTree>,
}

/// Introns collected for one gene while reading the exon file.
struct GeneIntrons {
    chrom: Chromosome,
    /// (start, end) pairs, deduplicated and kept sorted by the set
    introns: BTreeSet<(i64, i64)>,
}

impl IntronIndex {
    /// Build the index from exon file lines.
    ///
    /// Each data line holds four tab-separated fields: chromosome,
    /// comma-terminated exon starts, comma-terminated exon ends, gene name.
    /// Malformed lines are handed to `sink` and skipped. `window` is halved
    /// with integer division and a `[boundary - half, boundary + half)` window
    /// is indexed for each intron start and end.
    pub fn build<I, S, F>(
        lines: I,
        window: u32,
        sink: &mut F,
    ) -> Result<Self, PseudofinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(Diagnostic),
    {
        let mut genes: BTreeMap<String, GeneIntrons> = BTreeMap::new();

        for (line_idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_number = line_idx + 1;
            let (chrom_name, starts, ends, gene) = match parse_exon_line(line) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    sink(Diagnostic::MalformedExonLine {
                        line_number,
                        reason,
                    });
                    continue;
                }
            };
            let chrom = Chromosome::new(chrom_name)?;

            let gene_introns = genes
                .entry(gene.to_string())
                .or_insert_with(|| GeneIntrons {
                    chrom: chrom.clone(),
                    introns: BTreeSet::new(),
                });
            // a gene seen again on another chromosome keeps the latest one
            gene_introns.chrom = chrom;
            for (exon_end, next_exon_start) in ends.iter().zip(starts.iter().skip(1)) {
                gene_introns.introns.insert((*exon_end, *next_exon_start));
            }
        }

        Ok(Self::from_gene_introns(genes, window))
    }

    fn from_gene_introns(genes: BTreeMap<String, GeneIntrons>, window: u32) -> Self {
        let half_window = i64::from(window / 2);
        let mut max_introns = BTreeMap::new();
        let mut trees: HashMap<Chromosome, IntervalTree> = HashMap::new();
        let mut window_count = 0;

        for (gene, gene_introns) in genes {
            max_introns.insert(gene.clone(), gene_introns.introns.len());
            for (intron, (start, end)) in gene_introns.introns.into_iter().enumerate() {
                if start == end {
                    continue;
                }
                let tree = trees
                    .entry(gene_introns.chrom.clone())
                    .or_insert_with(IntervalTree::new);
                for (boundary, kind) in [(start, BoundaryKind::Start), (end, BoundaryKind::End)] {
                    tree.insert(
                        (boundary - half_window)..(boundary + half_window),
                        IntronBoundary {
                            gene: gene.clone(),
                            intron,
                            kind,
                        },
                    );
                    window_count += 1;
                }
            }
        }
        for tree in trees.values_mut() {
            tree.index();
        }
        debug!(
            "Indexed {} intron boundary windows over {} chromosomes",
            window_count,
            trees.len()
        );

        IntronIndex { max_introns, trees }
    }

    /// All boundary windows containing the 1-based position `pos`.
    pub fn query(&self, chrom: &Chromosome, pos: i64) -> Vec<IntronBoundary> {
        match self.trees.get(chrom) {
            Some(tree) => tree
                .find(pos..pos.saturating_add(1))
                .iter()
                .map(|entry| entry.data().clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_chromosome(&self, chrom: &Chromosome) -> bool {
        self.trees.contains_key(chrom)
    }

    pub fn gene_count(&self) -> usize {
        self.max_introns.len()
    }

    pub fn intron_count(&self) -> usize {
        self.max_introns.values().sum()
    }
}

/// Split a data line into its four fields, parsing the coordinate lists.
/// The error string describes why the line is unusable.
fn parse_exon_line(line: &str) -> Result<(&str, Vec<i64>, Vec<i64>, &str), String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }
    let starts = parse_coordinate_list(fields[1])?;
    let ends = parse_coordinate_list(fields[2])?;
    if starts.len() != ends.len() {
        return Err(format!(
            "{} exon starts but {} exon ends",
            starts.len(),
            ends.len()
        ));
    }
    Ok((fields[0], starts, ends, fields[3]))
}

/// Parse a comma separated integer list, tolerating one trailing comma.
/// Coordinates must lie in `0..=MAX_POSITION`.
fn parse_coordinate_list(field: &str) -> Result<Vec<i64>, String> {
    let field = field.strip_suffix(',').unwrap_or(field);
    field
        .split(',')
        .map(|token| {
            let coordinate = token
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("non-integer coordinate \"{token}\""))?;
            if !(0..=MAX_POSITION).contains(&coordinate) {
                return Err(format!("coordinate {coordinate} out of range"));
            }
            Ok(coordinate)
        })
        .collect()
}
