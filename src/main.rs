use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::SystemTime;

use log::{debug, error, info, warn, LevelFilter};
use pseudofinder::cli::{get_args, Arguments};
use pseudofinder::containers::Diagnostic;
use pseudofinder::errors::PseudofinderError;
use pseudofinder::ingester::{load_intron_index, VcfRecords};
use pseudofinder::overlap_matcher::match_variants;
use pseudofinder::result_writer;
use pseudofinder::utils::{self, is_local_file, PROGRAM_NAME};

/// Set up logging, either to stderr or to the `--log` file.
fn init_logging(args: &Arguments) {
    let mut builder = env_logger::builder();
    if let Some(log_filename) = &args.log_filename {
        let log_file = match File::create(log_filename) {
            Ok(file) => file,
            Err(e) => {
                eprintln!(
                    "{} ERROR: could not create log file {}: {}, exiting",
                    PROGRAM_NAME,
                    log_filename.display(),
                    e
                );
                std::process::exit(utils::EXIT_FILE_IO_ERROR);
            }
        };
        builder
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .filter_level(LevelFilter::Debug)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} - {}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%z"),
                    record.level(),
                    record.args()
                )
            });
    } else {
        let filter_level: LevelFilter = match args.verbose {
            false => LevelFilter::Info,
            true => LevelFilter::Debug,
        };
        builder.format_timestamp_millis().filter_level(filter_level);
    }
    builder.init();
}

fn set_up() -> Arguments {
    let args = get_args();
    init_logging(&args);

    let version = env!("CARGO_PKG_VERSION");
    info!("program started");
    debug!("{PROGRAM_NAME} v{version}");
    let cmd: Vec<String> = env::args().collect();
    info!("command line: {}", cmd.join(" "));

    if args.sample.is_empty() {
        exit_with_error(
            "--sample must not be empty",
            utils::EXIT_COMMAND_LINE_ERROR,
            &args,
        );
    }
    if !is_local_file(&args.exons_path) {
        exit_with_error(
            &format!("exon file {} not found", args.exons_path),
            utils::EXIT_FILE_IO_ERROR,
            &args,
        );
    }
    if !args.vcf_filename.is_file() {
        exit_with_error(
            &format!("VCF file {} not found", args.vcf_filename.display()),
            utils::EXIT_FILE_IO_ERROR,
            &args,
        );
    }

    args
}

/// Report a fatal error on stderr (and in the log file, if one is used),
/// then terminate with `exit_status`.
fn exit_with_error(message: &str, exit_status: exitcode::ExitCode, args: &Arguments) -> ! {
    if args.log_filename.is_some() {
        error!("{message}");
    }
    eprintln!("{}", utils::fatal_error_line(message));
    std::process::exit(exit_status);
}

fn log_time(start_time: SystemTime) {
    let elapsed_time = start_time.elapsed().map(|d| d.as_secs()).unwrap_or_default();
    let hours = elapsed_time / 3600;
    let minutes = (elapsed_time % 3600) / 60;
    let seconds = elapsed_time % 60;
    debug!("Running time: {hours}h:{minutes}m:{seconds}s");
}

fn run(args: &Arguments) -> Result<(), PseudofinderError> {
    let mut malformed_lines = 0;
    let index = load_intron_index(&args.exons_path, args.window, &mut |diagnostic| {
        malformed_lines += 1;
        warn!("{diagnostic}");
    })?;
    if malformed_lines > 0 {
        warn!("{malformed_lines} malformed exon file lines skipped");
    }

    let records = VcfRecords::from_path(&args.vcf_filename)?;
    let mut warn_sink = |diagnostic: Diagnostic| warn!("{diagnostic}");
    let (sample_hits, stats) = match_variants(&args.sample, records, &index, &mut warn_sink)?;
    info!(
        "{} VCF records read: {} filtered, {} unparsable BND, {} cross-chromosome, \
         {} on chromosomes without introns",
        stats.records,
        stats.filtered,
        stats.unparsable_bnd,
        stats.cross_chromosome,
        stats.unindexed_chromosome
    );
    info!(
        "{} records touch two or more introns of a gene",
        stats.contributing
    );

    let stdout = std::io::stdout();
    let rows_written = result_writer::write_results(
        &sample_hits,
        &index.max_introns,
        BufWriter::new(stdout.lock()),
    )?;
    info!("{rows_written} genes written for sample {}", args.sample);
    Ok(())
}

fn main() {
    let args = set_up();
    let start_time = SystemTime::now();

    if let Err(e) = run(&args) {
        exit_with_error(&e.to_string(), e.exit_code(), &args);
    }
    log_time(start_time);
}
