pub mod bnd_parser;
pub mod cli;
pub mod containers;
pub mod errors;
pub mod ingester;
pub mod intron_index;
pub mod overlap_matcher;
pub mod result_writer;
pub mod sv_normalizer;
pub mod utils;
