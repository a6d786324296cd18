//! Derived quantities taken from a validated [Grid]
//!
//! Everything here is a pure selection or reduction of the grid data, so the
//! same grid always gives bit-identical results.
//!
//! - [mz_slice] - z component of the `z = 0` plane as a `(ny, nx)` array
//! - [average] - volume-averaged magnetisation vector
//! - [derive] - both of the above together

// crate modules
use crate::grid::Grid;
use crate::warning::Warning;

// mmtools modules
use mmtools_utils::f;

// external crates
use nalgebra::Vector3;

/// Index of the z component in each magnetisation vector
pub const MZ: usize = 2;

/// Everything derived from one grid
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    /// Mz at `z = 0`, rows are y and columns are x
    pub mz_slice: Vec<Vec<f64>>,
    /// Component-wise mean of every cell
    pub m_average: [f64; 3],
}

/// Compute the default visualisation slice and the average vector
///
/// ```rust
/// # use mmtools_ovf::{Geometry, Grid, derived};
/// let geometry = Geometry::new([2, 2, 1], [1.0; 3]).unwrap();
/// let m = vec![[0.0, 0.0, 1.0]; 4];
/// let grid = Grid::new(&m, &geometry).unwrap();
///
/// let derived = derived::derive(&grid).unwrap();
/// assert_eq!(derived.mz_slice, vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
/// assert_eq!(derived.m_average, [0.0, 0.0, 1.0]);
/// ```
pub fn derive(grid: &Grid) -> Result<Derived, Warning> {
    let mz_slice = mz_slice(grid)?;
    let m_average = average(grid).ok_or_else(|| {
        Warning::SliceExtractionFailure("no cells to average over".to_string())
    })?;

    Ok(Derived {
        mz_slice,
        m_average,
    })
}

/// The z component at `z = 0` as a 2D array of shape `(ny, nx)`
pub fn mz_slice(grid: &Grid) -> Result<Vec<Vec<f64>>, Warning> {
    component_slice(grid, 0, MZ)
}

/// One component of the z plane at `z` as a 2D array of shape `(ny, nx)`
///
/// Row index is y and column index is x. Fails with
/// [Warning::SliceExtractionFailure] if the plane or component does not
/// exist.
pub fn component_slice(grid: &Grid, z: usize, component: usize) -> Result<Vec<Vec<f64>>, Warning> {
    let [nz, _, nx, n_components] = grid.shape();

    if component >= n_components {
        return Err(Warning::SliceExtractionFailure(f!(
            "component {component} out of range for {n_components}-component vectors"
        )));
    }

    let plane = grid.plane(z).ok_or_else(|| {
        Warning::SliceExtractionFailure(f!("plane z = {z} not in grid with nz = {nz}"))
    })?;

    Ok(plane
        .chunks_exact(nx)
        .map(|row| row.iter().map(|v| v[component]).collect())
        .collect())
}

/// Volume-averaged magnetisation of a grid
///
/// Every cell has the same volume, so this is the plain component-wise mean.
/// Returns `None` for an empty grid.
pub fn average(grid: &Grid) -> Option<[f64; 3]> {
    average_magnetisation(grid.cells())
}

/// Component-wise mean of any set of vectors, `None` if there are none
///
/// ```rust
/// # use mmtools_ovf::derived::average_magnetisation;
/// let m = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
/// assert_eq!(average_magnetisation(&m), Some([0.5, 0.5, 0.0]));
/// assert_eq!(average_magnetisation(&[]), None);
/// ```
pub fn average_magnetisation(m: &[[f64; 3]]) -> Option<[f64; 3]> {
    if m.is_empty() {
        return None;
    }

    let total: Vector3<f64> = m.iter().map(|v| Vector3::from(*v)).sum();
    let mean = total / m.len() as f64;
    Some([mean.x, mean.y, mean.z])
}
