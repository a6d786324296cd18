//! Module for magnetisation field snapshots

// crate modules
use crate::derived;
use crate::geometry::Geometry;
use crate::grid::Grid;
use crate::warning::Warning;

// mmtools modules
use mmtools_utils::{f, OptionExt, ValueExt, VectorExt};

// external crates
use serde::{Deserialize, Serialize};

/// One magnetisation field sample, typically one OVF file
///
/// The flattened `m` array is the authoritative data and is always kept,
/// even when it does not match the declared geometry. The derived fields are
/// only filled once the data have been validated against a [Geometry]:
///
/// - `mz_slice` - Mz at `z = 0` as a `(ny, nx)` array, rows are y
/// - `m_average` - the volume-averaged magnetisation vector
///
/// Both are set together by [FieldSnapshot::derive], or both left as `None`.
///
/// ```rust
/// # use mmtools_ovf::{FieldSnapshot, Geometry};
/// let geometry = Geometry::new([2, 1, 1], [1.0; 3]).unwrap();
/// let mut field = FieldSnapshot::new(0, &geometry, vec![[0.0, 0.0, 1.0]; 2])
///     .with_time(1e-9)
///     .with_external_field([0.0, 0.0, 0.1]);
///
/// assert!(field.mz_slice.is_none());
/// field.derive(&geometry).unwrap();
/// assert_eq!(field.mz_slice, Some(vec![vec![1.0, 1.0]]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Position of this snapshot in a sequence (0, 1, 2, ...)
    pub index: usize,
    /// Simulation time (s), 0 if unknown
    pub time: f64,
    /// Applied external field (T), zero if unknown
    pub external_field: [f64; 3],
    /// Number of cells expected on the grid, `nx * ny * nz`
    pub n_cells: usize,
    /// Number of cells along x, binds the columns of `mz_slice`
    pub nx: usize,
    /// Number of cells along y, binds the rows of `mz_slice`
    pub ny: usize,
    /// Magnetisation vectors (Mx, My, Mz) flattened over all cells
    pub m: Vec<[f64; 3]>,
    /// Mz at `z = 0` as a `(ny, nx)` array
    pub mz_slice: Option<Vec<Vec<f64>>>,
    /// Volume-averaged magnetisation vector
    pub m_average: Option<[f64; 3]>,
}

impl FieldSnapshot {
    /// New snapshot for raw data `m` on a known geometry
    ///
    /// The grid dimensions are copied from `geometry` to bind the shape of
    /// the derived arrays. Time and external field start at zero.
    pub fn new(index: usize, geometry: &Geometry, m: Vec<[f64; 3]>) -> Self {
        Self {
            index,
            time: 0.0,
            external_field: [0.0; 3],
            n_cells: geometry.n_cells(),
            nx: geometry.nx(),
            ny: geometry.ny(),
            m,
            mz_slice: None,
            m_average: None,
        }
    }

    /// Set the simulation time
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Set the applied external field vector
    pub fn with_external_field(mut self, external_field: [f64; 3]) -> Self {
        self.external_field = external_field;
        self
    }

    /// Validate against `geometry` and compute the derived quantities
    ///
    /// On success `mz_slice` and `m_average` are both set and the bound
    /// dimensions are refreshed from `geometry`. On failure both are cleared
    /// and the warning is returned, leaving `m` untouched either way.
    pub fn derive(&mut self, geometry: &Geometry) -> Result<(), Warning> {
        let result = Grid::new(&self.m, geometry).and_then(|grid| derived::derive(&grid));

        match result {
            Ok(derived) => {
                self.n_cells = geometry.n_cells();
                self.nx = geometry.nx();
                self.ny = geometry.ny();
                self.mz_slice = Some(derived.mz_slice);
                self.m_average = Some(derived.m_average);
                Ok(())
            }
            Err(warning) => {
                self.mz_slice = None;
                self.m_average = None;
                Err(warning)
            }
        }
    }

    /// True if the derived quantities are available
    pub fn is_derived(&self) -> bool {
        self.mz_slice.is_some()
    }

    /// Number of vectors actually read, may be fewer than `n_cells`
    pub fn n_vectors(&self) -> usize {
        self.m.len()
    }
}

impl std::fmt::Display for FieldSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("FieldSnapshot {} {{\n", self.index);
        s += &f!("    time: {} s\n", self.time.sci(4, 2));
        s += &f!("    field: {} T\n", self.external_field.display_sci(4));
        s += &f!("    vectors: {}/{}\n", self.m.len(), self.n_cells);
        s += &f!(
            "    mz slice: {}\n",
            self.mz_slice
                .as_ref()
                .map(|slice| f!("({}, {})", slice.len(), self.nx))
                .display()
        );
        s += &f!(
            "    average: {}\n}}",
            self.m_average.map(|m| m.display_sci(4)).display()
        );
        write!(f, "{}", s)
    }
}
