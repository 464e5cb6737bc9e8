use clap::Parser;
use std::path::PathBuf;

use crate::utils::DEFAULT_WINDOW;

/// Find processed pseudogenes in DNA sequencing data from structural variant calls
#[derive(Clone, Parser)]
#[clap(author, version, about)]
pub struct Arguments {
    /// Structural variant calls (VCF, VCF.GZ or BCF)
    #[clap(required = true)]
    #[clap(value_name = "VCF")]
    pub vcf_filename: PathBuf,

    /// Tab-separated exon coordinates for the genes of interest. GZIP files allowed.
    #[clap(required = true)]
    #[clap(long = "exons")]
    #[clap(value_name = "FILEPATH")]
    pub exons_path: String,

    /// Sample name written to every output row
    #[clap(required = true)]
    #[clap(long = "sample")]
    #[clap(value_name = "STRING")]
    pub sample: String,

    /// Width of the window placed around each intron boundary
    #[clap(required = false)]
    #[clap(long = "window")]
    #[clap(value_name = "INT")]
    #[clap(default_value_t = DEFAULT_WINDOW)]
    pub window: u32,

    /// Record program progress in LOG_FILE instead of standard error
    #[clap(required = false)]
    #[clap(long = "log")]
    #[clap(value_name = "LOG_FILE")]
    pub log_filename: Option<PathBuf>,

    /// Optional flag to print verbose output for debugging purposes.
    #[clap(long = "verbose")]
    pub verbose: bool,
}

pub fn get_args() -> Arguments {
    Arguments::parse()
}
