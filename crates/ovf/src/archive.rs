//! Boundary to external storage of simulation records

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::field::FieldSnapshot;
use crate::geometry::Geometry;
use crate::simulation::Simulation;

// external crates
use serde::Serialize;

/// Anything that can store a finished simulation record
///
/// By the time a record reaches an archive every invariant already holds, or
/// the derived fields are simply absent. Implementations should not need to
/// validate anything.
///
/// ```rust
/// # use mmtools_ovf::{Archive, FieldSnapshot, Geometry, Result};
/// /// Keep count of what was stored
/// #[derive(Default)]
/// struct Counter {
///     snapshots: usize,
/// }
///
/// impl Archive for Counter {
///     fn store(&mut self, _: Option<&Geometry>, fields: &[FieldSnapshot]) -> Result<()> {
///         self.snapshots += fields.len();
///         Ok(())
///     }
/// }
/// ```
pub trait Archive {
    /// Store the geometry and the ordered snapshots of one simulation
    fn store(&mut self, geometry: Option<&Geometry>, fields: &[FieldSnapshot]) -> Result<()>;
}

/// Archive writing JSON to any writer
///
/// Writes a single object with `geometry` and `fields` keys, matching the
/// serialised form of [Simulation].
#[derive(Debug)]
pub struct JsonArchive<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonArchive<W> {
    /// Compact JSON output
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Human readable JSON output
    pub fn pretty(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Borrowed view of a record for serialisation without cloning the data
#[derive(Serialize)]
struct Record<'a> {
    geometry: Option<&'a Geometry>,
    fields: &'a [FieldSnapshot],
}

impl<W: Write> Archive for JsonArchive<W> {
    fn store(&mut self, geometry: Option<&Geometry>, fields: &[FieldSnapshot]) -> Result<()> {
        let record = Record { geometry, fields };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &record)?;
        } else {
            serde_json::to_writer(&mut self.writer, &record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a [Simulation] to a JSON file
///
/// ```rust, no_run
/// # use mmtools_ovf::{read_ovf, write_json};
/// let simulation = read_ovf("./m000000.ovf").unwrap().into_inner();
/// write_json(&simulation, "./m000000.json").unwrap();
/// ```
pub fn write_json<P: AsRef<Path>>(simulation: &Simulation, path: P) -> Result<()> {
    let mut archive = JsonArchive::pretty(init_writer(path)?);
    simulation.archive(&mut archive)
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
