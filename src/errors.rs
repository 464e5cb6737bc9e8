use std::path::PathBuf;

use crate::utils;

/// Fatal conditions. Anything recoverable (malformed exon lines, unparsable
/// BND ALT strings) is reported through a `Diagnostic` instead.
#[derive(Debug, thiserror::Error)]
pub enum PseudofinderError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read VCF: {0}")]
    VcfRead(String),

    #[error("BND ALT field without exactly one entry ({0} found)")]
    MultiAltBnd(usize),

    #[error("missing END field for SVTYPE {0}")]
    MissingEnd(String),

    #[error("END field is not an integer: {0}")]
    InvalidEnd(String),

    #[error("unsupported SVTYPE: {0}")]
    UnsupportedSvType(String),

    #[error("empty chromosome name")]
    EmptyChromosome,

    #[error("failed to write output: {0}")]
    Output(String),
}

impl PseudofinderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit status the binary terminates with for this error.
    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            PseudofinderError::Io { .. } | PseudofinderError::Output(_) => {
                utils::EXIT_FILE_IO_ERROR
            }
            PseudofinderError::VcfRead(_)
            | PseudofinderError::MultiAltBnd(_)
            | PseudofinderError::MissingEnd(_)
            | PseudofinderError::InvalidEnd(_)
            | PseudofinderError::UnsupportedSvType(_)
            | PseudofinderError::EmptyChromosome => utils::EXIT_VCF_FORMAT_ERROR,
        }
    }
}

impl From<csv::Error> for PseudofinderError {
    fn from(err: csv::Error) -> Self {
        PseudofinderError::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let io_err = PseudofinderError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(io_err.exit_code(), 1);
        assert_eq!(PseudofinderError::MultiAltBnd(2).exit_code(), 3);
        assert_eq!(
            PseudofinderError::UnsupportedSvType("CNV".to_string()).exit_code(),
            3
        );
        assert_eq!(PseudofinderError::EmptyChromosome.exit_code(), 3);
    }

    #[test]
    fn test_multi_alt_message() {
        let err = PseudofinderError::MultiAltBnd(2);
        assert!(err
            .to_string()
            .starts_with("BND ALT field without exactly one entry"));
    }
}
