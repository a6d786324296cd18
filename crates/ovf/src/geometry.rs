//! Module for the simulation mesh discretisation

// crate modules
use crate::error::{Error, Result};

// mmtools modules
use mmtools_utils::{f, ValueExt};

// external crates
use serde::{Deserialize, Serialize};

/// Discretisation of the simulation mesh
///
/// Cell counts and physical cell sizes along each axis, taken directly from
/// the `xnodes`/`xstepsize` style header values of an OVF file. Lengths are
/// in whatever `meshunit` the file declares, which is metres for mumax3.
///
/// Every count is at least 1 and `nx * ny * nz` fits in a `usize`. This is
/// checked on construction and on deserialisation, so fields are read through
/// accessors only.
///
/// ```rust
/// # use mmtools_ovf::Geometry;
/// let geometry = Geometry::new([64, 32, 2], [5e-9, 5e-9, 1e-9]).unwrap();
/// assert_eq!(geometry.n_cells(), 4096);
/// assert_eq!(geometry.cells_per_plane(), 2048);
///
/// assert!(Geometry::new([64, 32, 0], [1.0; 3]).is_err());
/// assert!(Geometry::new([usize::MAX, 2, 1], [1.0; 3]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct Geometry {
    nx: usize,
    ny: usize,
    nz: usize,
    dx: f64,
    dy: f64,
    dz: f64,
}

/// Unchecked serialised form, validated through [Geometry::new]
#[derive(Deserialize)]
struct RawGeometry {
    nx: usize,
    ny: usize,
    nz: usize,
    dx: f64,
    dy: f64,
    dz: f64,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = Error;

    fn try_from(raw: RawGeometry) -> Result<Self> {
        Geometry::new([raw.nx, raw.ny, raw.nz], [raw.dx, raw.dy, raw.dz])
    }
}

impl Geometry {
    /// Build from `[nx, ny, nz]` cell counts and `[dx, dy, dz]` cell sizes
    ///
    /// Fails with [Error::InvalidGeometry] if any count is zero or the total
    /// cell count overflows.
    pub fn new(nodes: [usize; 3], steps: [f64; 3]) -> Result<Self> {
        let n_cells = nodes.iter().try_fold(1usize, |acc, n| acc.checked_mul(*n));
        if nodes.contains(&0) || n_cells.is_none() {
            return Err(Error::InvalidGeometry(nodes));
        }

        let [nx, ny, nz] = nodes;
        let [dx, dy, dz] = steps;
        Ok(Self {
            nx,
            ny,
            nz,
            dx,
            dy,
            dz,
        })
    }

    /// Number of cells along x
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells along y
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of cells along z
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Cell size along x
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell size along y
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Cell size along z
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Cell counts as `[nx, ny, nz]`
    pub fn nodes(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Cell sizes as `[dx, dy, dz]`
    pub fn steps(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Total number of cells, `nx * ny * nz`
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Number of cells in a single z plane, `nx * ny`
    pub fn cells_per_plane(&self) -> usize {
        self.nx * self.ny
    }

    /// Volume of a single cell
    pub fn cell_volume(&self) -> f64 {
        self.dx * self.dy * self.dz
    }

    /// Physical extent of the whole mesh along each axis
    ///
    /// ```rust
    /// # use mmtools_ovf::Geometry;
    /// let geometry = Geometry::new([4, 2, 1], [2.0, 0.5, 3.0]).unwrap();
    /// assert_eq!(geometry.extent(), [8.0, 1.0, 3.0]);
    /// ```
    pub fn extent(&self) -> [f64; 3] {
        [
            self.nx as f64 * self.dx,
            self.ny as f64 * self.dy,
            self.nz as f64 * self.dz,
        ]
    }
}

impl Default for Geometry {
    /// Single cell of unit size, matching the OVF header defaults
    fn default() -> Self {
        Self {
            nx: 1,
            ny: 1,
            nz: 1,
            dx: 1.0,
            dy: 1.0,
            dz: 1.0,
        }
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Geometry {\n".to_string();
        s += &f!(
            "    cells: {} ({}x{}x{})\n",
            self.n_cells(),
            self.nx,
            self.ny,
            self.nz
        );
        s += &f!(
            "    steps: {} x {} x {}\n}}",
            self.dx.sci(4, 2),
            self.dy.sci(4, 2),
            self.dz.sci(4, 2)
        );
        write!(f, "{}", s)
    }
}
