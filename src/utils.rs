use std::io::{BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;

use crate::errors::PseudofinderError;

pub const PROGRAM_NAME: &str = "pseudofinder";

/// Default width of the window placed around each intron boundary
pub const DEFAULT_WINDOW: u32 = 10;

/// Minimum number of distinct introns of one gene a single variant must
/// touch before the gene is reported
pub const MIN_DISTINCT_INTRONS: usize = 2;

/// Largest coordinate accepted from either input, matching htslib's 32-bit
/// positions
pub const MAX_POSITION: i64 = i32::MAX as i64;

pub const EXIT_FILE_IO_ERROR: exitcode::ExitCode = 1;
pub const EXIT_COMMAND_LINE_ERROR: exitcode::ExitCode = 2;
pub const EXIT_VCF_FORMAT_ERROR: exitcode::ExitCode = 3;

/// first two bytes of a gzip file that indicate the compression algorithm used
const GZIP_INDICATOR: [u8; 2] = [0x1F, 0x8B];

pub fn is_local_file(filepath: &str) -> bool {
    let path = std::path::Path::new(filepath);

    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file(),
        Err(_) => false, // If there is an error (e.g., path doesn't exist), return false
    }
}

/// Check if a file is a gzipped (or bgzipped) file from a String path
pub fn is_gzipped(path: &str) -> Result<bool, PseudofinderError> {
    if !is_local_file(path) {
        return Ok(false);
    }
    let file_handle = std::fs::File::open(path).map_err(|e| PseudofinderError::io(path, e))?;
    let mut reader = BufReader::new(file_handle);
    let mut gzip_indicator_bytes = [0; 2];
    if reader.read_exact(&mut gzip_indicator_bytes).is_err() {
        // shorter than two bytes, can't be compressed
        return Ok(false);
    }
    Ok(gzip_indicator_bytes == GZIP_INDICATOR)
}

/// Single stderr line reported for a fatal error
pub fn fatal_error_line(message: &str) -> String {
    format!("{PROGRAM_NAME} ERROR: {message}, exiting")
}

/// Read a plain text or gzipped text file into vector of Strings by line
pub fn read_file_from_path(file_path: &str) -> Result<Vec<String>, PseudofinderError> {
    let file = std::fs::File::open(file_path).map_err(|e| PseudofinderError::io(file_path, e))?;

    let lines_result: std::io::Result<Vec<String>> = if is_gzipped(file_path)? {
        BufReader::new(MultiGzDecoder::new(file)).lines().collect()
    } else {
        BufReader::new(file).lines().collect()
    };
    lines_result.map_err(|e| PseudofinderError::io(file_path, e))
}

/// Build a decoded VCF record for tests
#[cfg(test)]
pub fn create_test_record(
    chrom: &str,
    pos: i64,
    info: &[(&str, &str)],
    alts: &[&str],
) -> crate::containers::SvRecord {
    crate::containers::SvRecord {
        chrom: chrom.to_string(),
        pos,
        filters: Vec::new(),
        info: info
            .iter()
            .map(|(tag, value)| (tag.to_string(), value.to_string()))
            .collect(),
        alts: alts.iter().map(|alt| alt.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_read_plain_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# header").unwrap();
        writeln!(file, "1\t100,300,\t200,400,\tG1").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        assert!(is_local_file(&path));
        assert!(!is_gzipped(&path).unwrap());
        let lines = read_file_from_path(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1\t100,300,\t200,400,\tG1");
    }

    #[test]
    fn test_read_gzipped_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), flate2::Compression::default());
        encoder.write_all(b"chr5\t10,50,\t20,60,\tG2\n").unwrap();
        encoder.finish().unwrap();
        let path = file.path().to_str().unwrap().to_string();

        assert!(is_gzipped(&path).unwrap());
        let lines = read_file_from_path(&path).unwrap();
        assert_eq!(lines, vec!["chr5\t10,50,\t20,60,\tG2".to_string()]);
    }

    #[test]
    fn test_fatal_error_line() {
        let err = crate::errors::PseudofinderError::MultiAltBnd(2);
        assert_eq!(
            fatal_error_line(&err.to_string()),
            "pseudofinder ERROR: BND ALT field without exactly one entry (2 found), exiting"
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(!is_local_file("/definitely/not/here.txt"));
        let result = read_file_from_path("/definitely/not/here.txt");
        assert_eq!(result.unwrap_err().exit_code(), EXIT_FILE_IO_ERROR);
    }
}
