//! Non-fatal conditions reported alongside a successful parse

/// Recoverable problems found while reading or deriving quantities
///
/// None of these stop a [Simulation](crate::Simulation) from being produced.
/// The raw magnetisation data are always kept, and only the derived fields
/// that depend on the failed stage are left empty.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// Data block ended before all vectors declared in the header were read
    #[error("number of magnetisation vectors does not match header (expected {expected}, found {found})")]
    VectorCountMismatch { expected: usize, found: usize },

    /// Vectors can not be reshaped onto the declared grid
    #[error("field of {found} cells does not fit the {expected} cell grid")]
    ShapeMismatch { expected: usize, found: usize },

    /// A derived slice could not be taken from a valid grid
    #[error("failed to extract slice: {0}")]
    SliceExtractionFailure(String),

    /// No geometry to validate snapshots against
    #[error("missing geometry (nx, ny, nz), derived quantities skipped")]
    MissingGeometry,

    /// Warning raised for one snapshot of a series
    #[error("snapshot {index}: {warning}")]
    Snapshot { index: usize, warning: Box<Warning> },
}

impl Warning {
    /// Attach the index of the snapshot the warning belongs to
    ///
    /// ```rust
    /// # use mmtools_ovf::Warning;
    /// let warning = Warning::MissingGeometry.in_snapshot(3);
    /// assert_eq!(warning.snapshot(), Some(3));
    /// assert_eq!(warning.root(), &Warning::MissingGeometry);
    /// ```
    pub fn in_snapshot(self, index: usize) -> Self {
        Warning::Snapshot {
            index,
            warning: Box::new(self),
        }
    }

    /// Index of the snapshot, if attached
    pub fn snapshot(&self) -> Option<usize> {
        match self {
            Warning::Snapshot { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The underlying warning, without any snapshot context
    pub fn root(&self) -> &Warning {
        match self {
            Warning::Snapshot { warning, .. } => warning.root(),
            other => other,
        }
    }
}

/// A parsed value with any warnings raised on the way
///
/// Warnings are a side channel, so the value is always usable even when the
/// list is not empty.
///
/// ```rust
/// # use mmtools_ovf::{Parsed, Warning};
/// let mut parsed = Parsed::new(vec![[0.0, 0.0, 1.0]]);
/// assert!(parsed.is_clean());
///
/// parsed.warn(Warning::VectorCountMismatch { expected: 2, found: 1 });
/// assert_eq!(parsed.warnings.len(), 1);
/// assert_eq!(parsed.into_inner().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    /// The successfully parsed value
    pub value: T,
    /// Everything that went wrong without being fatal, in order
    pub warnings: Vec<Warning>,
}

impl<T> Parsed<T> {
    /// Wrap a value with no warnings
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Record a warning, logging it at the same time
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// True if nothing was reported
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discard the warnings and keep the value
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value, keeping the warnings
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
