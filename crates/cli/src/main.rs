//! Convert OVF2 magnetisation files to JSON

// standard library
use std::error::Error as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// mmtools modules
use mmtools_ovf::{Error, JsonArchive, OvfReader, Parsed, Simulation};

// external crates
use clap::{ArgAction, Parser};
use log::{error, info};

/// Convert OVF2 text files to a JSON simulation record
///
/// Every input file becomes one snapshot, indexed in the order given. All
/// files must share the same mesh.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Paths to OVF2 files, in sequence order
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Write JSON to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Pretty print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Keep raw vectors only, skipping the mz slice and average
    #[arg(long)]
    no_slice: bool,

    /// Applied external field (T) for every snapshot
    #[arg(long, num_args = 3, value_names = ["BX", "BY", "BZ"], allow_negative_numbers = true)]
    field: Option<Vec<f64>>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // warnings are on by default, errors are always shown
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("mmtools_ovf")
        .verbosity(cli.verbose as usize + 1)
        .quiet(cli.quiet)
        .init()
    {
        eprintln!("failed to initialise logging: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> mmtools_ovf::Result<()> {
    let parsed = reader(cli).parse_series(&cli.inputs)?;
    if !parsed.is_clean() {
        info!("{} warnings raised", parsed.warnings.len());
    }

    let Parsed { value, .. } = parsed;
    info!("{value}");

    match &cli.output {
        Some(path) => {
            store(&value, create_output(path)?, cli.pretty)?;
            info!("Written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            store(&value, &mut stdout, cli.pretty)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

/// Configure a reader from the command line options
fn reader(cli: &Cli) -> OvfReader {
    let mut reader = OvfReader::new();

    if let Some([x, y, z]) = cli.field.as_deref() {
        reader.set_external_field([*x, *y, *z]);
    }

    if cli.no_slice {
        reader.skip_derived();
    }

    reader
}

/// Buffered writer for the output file, errors name the file
fn create_output(path: &Path) -> mmtools_ovf::Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::from(e).in_file(path))
}

fn store<W: Write>(simulation: &Simulation, writer: W, pretty: bool) -> mmtools_ovf::Result<()> {
    let mut archive = if pretty {
        JsonArchive::pretty(writer)
    } else {
        JsonArchive::new(writer)
    };
    simulation.archive(&mut archive)
}
