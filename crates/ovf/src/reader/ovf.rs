// crate modules
use crate::error::{Error, Result};
use crate::field::FieldSnapshot;
use crate::geometry::Geometry;
use crate::reader::data::read_vectors;
use crate::reader::header::{read_header, Header};
use crate::reader::lines::LineReader;
use crate::simulation::Simulation;
use crate::warning::Parsed;

// mmtools modules
use mmtools_utils::ValueExt;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// external crates
use log::{debug, info, warn};

/// A reader for OVF2 files with text data
///
/// Reads the header, then the magnetisation vectors, then validates them
/// against the geometry and computes the derived quantities. One file gives
/// one [Simulation] with a single [FieldSnapshot].
///
/// Failures split into two kinds:
///
/// - Fatal [Error]s abort the file and no record is produced. These are a
///   missing `xnodes`/`ynodes`, no data sentinel, binary data, or a data line
///   that is not numeric.
/// - [Warning](crate::Warning)s are returned alongside the record. These
///   cover a short data block, data that do not fit the grid, or a failed
///   slice. The raw vectors are kept and only the derived fields are empty.
///
/// Minimal Example:
/// ```rust, no_run
/// # use mmtools_ovf::OvfReader;
/// # use std::path::Path;
/// let mut reader = OvfReader::new();
/// reader.set_index(3);
/// reader.set_external_field([0.0, 0.0, 0.1]);
///
/// let parsed = reader.parse(Path::new("path/to/m000003.ovf")).unwrap();
/// let simulation = parsed.value;
/// ```
#[derive(Debug, Default, Clone)]
pub struct OvfReader {
    /// Sequence index given to the snapshot
    index: usize,
    /// Fixed simulation time, otherwise taken from the header if available
    time: Option<f64>,
    /// Applied external field for the snapshot
    external_field: [f64; 3],
    /// Only read the raw data?
    skip_derived: bool,
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl OvfReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Setter for the sequence index of the snapshot
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Setter for the simulation time, overrides any time in the header
    pub fn set_time(&mut self, time: f64) {
        self.time = Some(time);
    }

    /// Setter for the applied external field
    pub fn set_external_field(&mut self, external_field: [f64; 3]) {
        self.external_field = external_field;
    }

    /// Do not validate the grid or compute derived quantities
    pub fn skip_derived(&mut self) {
        self.skip_derived = true;
    }

    /// Parse an OVF file into a [Simulation]
    ///
    /// The file is opened here and closed on every return path. Fatal errors
    /// are wrapped in [Error::File] to identify the file.
    pub fn parse(&self, path: &Path) -> Result<Parsed<Simulation>> {
        self.parse_path(path, |reader| self.parse_reader(reader))
    }

    /// Parse OVF data from any buffered reader into a [Simulation]
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Parsed<Simulation>> {
        let parsed = self.parse_snapshot_reader(reader)?;
        Ok(parsed.map(|(geometry, field)| {
            Simulation::builder()
                .geometry(geometry)
                .field(field)
                .build()
        }))
    }

    /// Parse a sequence of OVF files into a single [Simulation]
    ///
    /// Snapshots are indexed by position in `paths`, overriding any index set
    /// on the reader. The first file fixes the geometry and later files must
    /// match its node counts, otherwise [Error::InconsistentGeometry] is
    /// returned. Cell size differences are only logged.
    ///
    /// Every warning is wrapped in [Warning::Snapshot](crate::Warning::Snapshot)
    /// with the index of the file that raised it.
    pub fn parse_series<P: AsRef<Path>>(
        &self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Parsed<Simulation>> {
        let mut reader = self.clone();
        let mut simulation = Simulation::new();
        let mut warnings = Vec::new();

        for (index, path) in paths.into_iter().enumerate() {
            let path = path.as_ref();
            reader.set_index(index);
            let parsed = reader.parse_snapshot(path)?;
            let (geometry, field) = parsed.value;

            if let Some(expected) = &simulation.geometry {
                if expected.nodes() != geometry.nodes() {
                    let error = Error::InconsistentGeometry {
                        expected: expected.nodes(),
                        found: geometry.nodes(),
                    };
                    return Err(error.in_file(path));
                }
                if expected.steps() != geometry.steps() {
                    warn!(
                        "{}: cell size {:?} differs from {:?}",
                        path.display(),
                        geometry.steps(),
                        expected.steps()
                    );
                }
            } else {
                simulation.geometry = Some(geometry);
            }

            warnings.extend(
                parsed
                    .warnings
                    .into_iter()
                    .map(|warning| warning.in_snapshot(index)),
            );
            simulation.fields.push(field);
        }

        info!("Read {} snapshots", simulation.n_fields());
        Ok(Parsed {
            value: simulation,
            warnings,
        })
    }

    /// Parse an OVF file into its geometry and a single snapshot
    pub fn parse_snapshot(&self, path: &Path) -> Result<Parsed<(Geometry, FieldSnapshot)>> {
        self.parse_path(path, |reader| self.parse_snapshot_reader(reader))
    }

    /// Parse OVF data from any buffered reader into geometry and a snapshot
    pub fn parse_snapshot_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<Parsed<(Geometry, FieldSnapshot)>> {
        let mut lines = LineReader::new(reader);

        // header first, everything else depends on it
        let header = read_header(&mut lines)?;
        header.ensure_text()?;
        let geometry = header.geometry()?;
        Self::log_geometry(&geometry);

        // read as much of the data block as there is
        let vectors = read_vectors(&mut lines, geometry.n_cells())?;
        let mut parsed = vectors.map(|m| self.snapshot(&header, &geometry, m));

        // derived quantities are never fatal
        if !self.skip_derived {
            if let Err(warning) = parsed.value.derive(&geometry) {
                parsed.warn(warning);
            }
        }

        Ok(parsed.map(|field| (geometry, field)))
    }
}

// ! ------------------------------------------------------------------------
// !                               Internals
// ! ------------------------------------------------------------------------

impl OvfReader {
    /// Open `path` and run `f` over it, attaching the path to any error
    fn parse_path<T>(
        &self,
        path: &Path,
        f: impl FnOnce(BufReader<File>) -> Result<Parsed<T>>,
    ) -> Result<Parsed<T>> {
        info!("Reading {}", path.display());
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| f(BufReader::new(file)))
            .map_err(|e| e.in_file(path))
    }

    /// Build the snapshot with the configured metadata
    fn snapshot(&self, header: &Header, geometry: &Geometry, m: Vec<[f64; 3]>) -> FieldSnapshot {
        let time = self
            .time
            .or_else(|| header.simulation_time())
            .unwrap_or_default();
        debug!("Time        = {} s", time.sci(4, 2));

        FieldSnapshot::new(self.index, geometry, m)
            .with_time(time)
            .with_external_field(self.external_field)
    }

    fn log_geometry(geometry: &Geometry) {
        debug!("xnodes      = {}", geometry.nx());
        debug!("ynodes      = {}", geometry.ny());
        debug!("znodes      = {}", geometry.nz());
        debug!("xstepsize   = {}", geometry.dx().sci(4, 2));
        debug!("ystepsize   = {}", geometry.dy().sci(4, 2));
        debug!("zstepsize   = {}", geometry.dz().sci(4, 2));
        debug!("n cells     = {}", geometry.n_cells());
    }
}
