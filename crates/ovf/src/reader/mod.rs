//! Parsers and logic for reading OVF2 files
//!
//! All functions are re-exported to the crate root for easy access.
//!
//! # Quickstart
//!
//! The simplest methods for reading magnetisation data are the convenience
//! functions:
//!
//! ```rust, no_run
//! # use mmtools_ovf::{read_ovf, read_ovf_series};
//! // Read a single snapshot
//! let parsed = read_ovf("/path/to/m000000.ovf").unwrap();
//! let simulation = parsed.value;
//!
//! // Read a time series, one snapshot per file in the given order
//! let parsed = read_ovf_series(["m000000.ovf", "m000001.ovf"]).unwrap();
//! assert_eq!(parsed.value.fields.len(), 2);
//! ```
//!
//! Under the hood these initialise the [OvfReader]. This is made public for
//! fine control over the snapshot metadata if needed.
//!
//! ```rust, no_run
//! # use mmtools_ovf::OvfReader;
//! # use std::path::Path;
//! // Initialise the reader and set some options
//! let mut reader = OvfReader::new();
//! reader.set_time(1.0e-9);
//! reader.skip_derived();
//!
//! // Parse the file
//! let parsed = reader.parse(Path::new("/path/to/m000000.ovf")).unwrap();
//! ```
//!
//! # Implementation overview
//!
//! Files are read line-by-line through a buffered stream in three stages:
//!
//! - Header lines up to the `# Begin: Data` sentinel are collected into a
//!   [Header], from which the [Geometry](crate::Geometry) is extracted
//! - Data lines are parsed into raw magnetisation vectors
//! - Vectors are checked against the grid and the derived quantities taken
//!
//! # Formatting notes
//!
//! **Header keys are case insensitive**
//!
//! > `# XNodes: 4` and `# xnodes: 4` are the same key. Any number of leading
//! > `#` characters is allowed, and the last duplicate of a key wins.
//!
//! **Representation tags are allowed on the data sentinel**
//!
//! > Real files usually mark the data block as `# Begin: Data Text`. Any line
//! > starting with `# Begin: Data` ends the header, so `# Begin: DataText` is
//! > accepted as well. Binary data blocks (`Binary 4`, `Binary 8`) are
//! > rejected outright.
//!
//! **Noise in the data block is skipped**
//!
//! > Lines with fewer than three tokens are ignored. An `# End: Data` marker
//! > ends the block early.
//!
//! **Invalid UTF-8 is tolerated**
//!
//! > Bytes that are not valid UTF-8 are replaced rather than aborting the read.

// reader modules
mod data;
mod header;
mod lines;
mod ovf;
mod parsers;

// re-exports for clean API + documentation
#[doc(inline)]
pub use header::Header;

#[doc(inline)]
pub use ovf::OvfReader;

// library imports
use crate::error::Result;
use crate::simulation::Simulation;
use crate::warning::Parsed;
use std::path::Path;

/// Read a single OVF file
///
/// Returns a [Simulation] holding the geometry and one snapshot at index 0,
/// along with any non-fatal warnings.
///
/// - `path` - Path to the OVF file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use mmtools_ovf::read_ovf;
/// let parsed = read_ovf("path/to/m000000.ovf").unwrap();
///
/// for warning in &parsed.warnings {
///     println!("{warning}");
/// }
/// let simulation = parsed.value;
/// ```
pub fn read_ovf<P: AsRef<Path>>(path: P) -> Result<Parsed<Simulation>> {
    OvfReader::new().parse(path.as_ref())
}

/// Read a sequence of OVF files into one [Simulation]
///
/// Each file becomes a snapshot indexed by its position in `paths`. The
/// geometry is taken from the first file, and every later file must share the
/// same node counts. A mismatch is fatal with
/// [Error::InconsistentGeometry](crate::Error::InconsistentGeometry).
/// Differing cell sizes are only logged.
///
/// Warnings from all files are collected in order, each tagged with the
/// index of its snapshot.
///
/// Example
/// ```rust, no_run
/// # use mmtools_ovf::read_ovf_series;
/// let paths = (0..10).map(|i| format!("run.out/m{i:06}.ovf"));
/// let simulation = read_ovf_series(paths).unwrap().value;
/// ```
pub fn read_ovf_series<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<Parsed<Simulation>> {
    OvfReader::new().parse_series(paths)
}
