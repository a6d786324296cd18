//! Reshaping flat vector data onto the simulation grid
//!
//! OVF data blocks list one vector per cell with `x` varying fastest and `z`
//! slowest. A [Grid] is a validated, zero-copy view of that flat data with
//! four axes ordered `(z, y, x, component)`, so that the vector at flat index
//! `i` sits at
//!
//! ```text
//! z = i / (nx * ny)
//! y = (i % (nx * ny)) / nx
//! x = i % nx
//! ```

// crate modules
use crate::geometry::Geometry;
use crate::warning::Warning;

/// Validated `(z, y, x, component)` view over flat magnetisation data
///
/// Construction checks that the number of vectors matches the cell count of
/// the geometry exactly. Every element is a `[f64; 3]`, so the component
/// count is guaranteed by the type.
///
/// ```rust
/// # use mmtools_ovf::{Geometry, Grid};
/// let geometry = Geometry::new([2, 2, 1], [1.0, 1.0, 1.0]).unwrap();
/// let m = vec![
///     [0.0, 0.0, 1.0], [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0], [0.0, 0.0, -1.0],
/// ];
///
/// let grid = Grid::new(&m, &geometry).unwrap();
/// assert_eq!(grid.shape(), [1, 2, 2, 3]);
/// assert_eq!(grid[(0, 1, 0)], [0.0, 1.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid<'a> {
    cells: &'a [[f64; 3]],
    nx: usize,
    ny: usize,
    nz: usize,
}

impl<'a> Grid<'a> {
    /// Validate `m` against the geometry and wrap it as a grid
    ///
    /// Returns [Warning::ShapeMismatch] if the vector count differs from
    /// `nx * ny * nz`, in which case nothing should be derived from `m`.
    pub fn new(m: &'a [[f64; 3]], geometry: &Geometry) -> Result<Self, Warning> {
        let expected = geometry.n_cells();
        if m.len() != expected {
            return Err(Warning::ShapeMismatch {
                expected,
                found: m.len(),
            });
        }

        Ok(Self {
            cells: m,
            nx: geometry.nx(),
            ny: geometry.ny(),
            nz: geometry.nz(),
        })
    }

    /// Shape of the 4D view, `[nz, ny, nx, 3]`
    pub fn shape(&self) -> [usize; 4] {
        [self.nz, self.ny, self.nx, 3]
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a grid with no cells, never the case for a valid [Geometry]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying flat data
    pub fn cells(&self) -> &'a [[f64; 3]] {
        self.cells
    }

    /// Flat index of the cell at `(z, y, x)`, if inside the grid
    ///
    /// ```rust
    /// # use mmtools_ovf::{Geometry, Grid};
    /// let geometry = Geometry::new([3, 2, 2], [1.0; 3]).unwrap();
    /// let m = vec![[0.0; 3]; 12];
    /// let grid = Grid::new(&m, &geometry).unwrap();
    ///
    /// assert_eq!(grid.flat_index(1, 1, 2), Some(11));
    /// assert_eq!(grid.flat_index(0, 2, 0), None);
    /// ```
    pub fn flat_index(&self, z: usize, y: usize, x: usize) -> Option<usize> {
        if z < self.nz && y < self.ny && x < self.nx {
            Some((z * self.ny + y) * self.nx + x)
        } else {
            None
        }
    }

    /// Grid coordinates `(z, y, x)` of a flat index, if inside the grid
    pub fn coordinates(&self, index: usize) -> Option<(usize, usize, usize)> {
        if index >= self.cells.len() {
            return None;
        }

        let plane = self.nx * self.ny;
        Some((index / plane, (index % plane) / self.nx, index % self.nx))
    }

    /// Vector at `(z, y, x)`
    pub fn get(&self, z: usize, y: usize, x: usize) -> Option<&'a [f64; 3]> {
        self.flat_index(z, y, x).map(|i| &self.cells[i])
    }

    /// Single component of the vector at `(z, y, x)`
    pub fn component(&self, z: usize, y: usize, x: usize, c: usize) -> Option<f64> {
        self.get(z, y, x).and_then(|v| v.get(c).copied())
    }

    /// All cells of the z plane at `z`, ordered with x fastest
    pub fn plane(&self, z: usize) -> Option<&'a [[f64; 3]]> {
        if z >= self.nz {
            return None;
        }

        let n = self.nx * self.ny;
        self.cells.get(z * n..(z + 1) * n)
    }

    /// Iterate over `((z, y, x), vector)` in file order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), &'a [f64; 3])> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, v)| {
            let coordinates = self.coordinates(i)?;
            Some((coordinates, v))
        })
    }
}

impl std::ops::Index<(usize, usize, usize)> for Grid<'_> {
    type Output = [f64; 3];

    /// Panics if `(z, y, x)` is outside the grid, use [Grid::get] otherwise
    fn index(&self, (z, y, x): (usize, usize, usize)) -> &Self::Output {
        match self.flat_index(z, y, x) {
            Some(i) => &self.cells[i],
            None => panic!(
                "index ({z}, {y}, {x}) out of bounds for grid of shape {:?}",
                self.shape()
            ),
        }
    }
}
