use std::io::Write;

use pseudofinder::containers::Diagnostic;
use pseudofinder::errors::PseudofinderError;
use pseudofinder::ingester::{load_intron_index, VcfRecords};
use pseudofinder::overlap_matcher::match_variants;
use pseudofinder::result_writer::write_results;

const VCF_HEADER: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=1,length=100000>\n\
##contig=<ID=2,length=100000>\n\
##FILTER=<ID=PASS,Description=\"All filters passed\">\n\
##FILTER=<ID=LowQual,Description=\"Low quality\">\n\
##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">\n\
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End position\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

fn write_exons(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

fn write_vcf(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".vcf").tempfile().unwrap();
    write!(file, "{}{}", VCF_HEADER, body).unwrap();
    file.flush().unwrap();
    file
}

/// Run the whole pipeline on files, returning the CSV output.
fn run_pipeline(
    exons: &tempfile::NamedTempFile,
    vcf: &tempfile::NamedTempFile,
    window: u32,
) -> (Result<String, PseudofinderError>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut sink = |d: Diagnostic| diagnostics.push(d);
    let result = (|| -> Result<String, PseudofinderError> {
        let index = load_intron_index(exons.path().to_str().unwrap(), window, &mut sink)?;
        let records = VcfRecords::from_path(vcf.path())?;
        let (hits, _) = match_variants("SAMPLE", records, &index, &mut sink)?;
        let mut output = Vec::new();
        write_results(&hits, &index.max_introns, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    })();
    (result, diagnostics)
}

#[test]
fn test_deletion_across_two_introns() {
    let exons = write_exons(&[
        "#chrom\tstarts\tends\tgene",
        "chr1\t100,300,600,\t200,400,700,\tG1",
    ]);
    let vcf = write_vcf("1\t300\tdel1\tN\t<DEL>\t.\t.\tSVTYPE=DEL;END=401\n");
    let (result, diagnostics) = run_pipeline(&exons, &vcf, 10);
    assert_eq!(
        result.unwrap(),
        "sample,gene,max_introns,num_introns_affected,introns_affected\n\
         SAMPLE,G1,2,2,0;1\n"
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_skipped_records_produce_header_only() {
    let exons = write_exons(&["1\t100,300,600,\t200,400,700,\tG1"]);
    let vcf = write_vcf(
        "1\t300\tlowqual\tN\t<DEL>\t.\tLowQual\tSVTYPE=DEL;END=401\n\
         1\t300\tsingle\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=500\n\
         1\t300\ttransloc\tN\tN[2:401[\t.\tPASS\tSVTYPE=BND\n\
         1\t300\tbadalt\tN\t<BND>\t.\tPASS\tSVTYPE=BND\n",
    );
    let (result, diagnostics) = run_pipeline(&exons, &vcf, 10);
    assert_eq!(
        result.unwrap(),
        "sample,gene,max_introns,num_introns_affected,introns_affected\n"
    );
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::UnparsableBnd { .. }));
}

#[test]
fn test_multi_alt_bnd_is_fatal() {
    let exons = write_exons(&["1\t100,300,600,\t200,400,700,\tG1"]);
    let vcf = write_vcf(
        "1\t300\tmulti\tN\tN[1:401[,N[1:402[\t.\tPASS\tSVTYPE=BND\n\
         1\t300\tdel1\tN\t<DEL>\t.\t.\tSVTYPE=DEL;END=401\n",
    );
    let (result, _) = run_pipeline(&exons, &vcf, 10);
    let err = result.unwrap_err();
    assert!(matches!(err, PseudofinderError::MultiAltBnd(2)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_unsupported_svtype_is_fatal() {
    let exons = write_exons(&["1\t100,300,600,\t200,400,700,\tG1"]);
    let vcf = write_vcf("1\t300\tcnv1\tN\t<CNV>\t.\t.\tSVTYPE=CNV;END=401\n");
    let (result, _) = run_pipeline(&exons, &vcf, 10);
    assert_eq!(result.unwrap_err().exit_code(), 3);
}
