//! Module for the root simulation record

// crate modules
use crate::archive::Archive;
use crate::error::Result;
use crate::field::FieldSnapshot;
use crate::geometry::Geometry;
use crate::warning::Warning;

// mmtools modules
use mmtools_utils::{f, OptionExt};

// external crates
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Root record for a micromagnetic simulation
///
/// Owns the mesh [Geometry] and every [FieldSnapshot] read for it. Built
/// bottom-up with a [SimulationBuilder], geometry first and snapshots after,
/// then handed off to an [Archive] for storage.
///
/// ```rust
/// # use mmtools_ovf::{FieldSnapshot, Geometry, Simulation};
/// let geometry = Geometry::new([2, 2, 1], [5e-9, 5e-9, 5e-9]).unwrap();
/// let field = FieldSnapshot::new(0, &geometry, vec![[0.0, 0.0, 1.0]; 4]);
///
/// let mut simulation = Simulation::builder()
///     .geometry(geometry)
///     .field(field)
///     .build();
///
/// // validate every snapshot and fill in the derived quantities
/// let warnings = simulation.normalise();
/// assert!(warnings.is_empty());
/// assert!(simulation.fields[0].mz_slice.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Discretisation and cell sizes used for the simulation
    pub geometry: Option<Geometry>,
    /// Magnetisation field snapshots, in sequence order
    pub fields: Vec<FieldSnapshot>,
}

impl Simulation {
    /// Empty record with no geometry and no snapshots
    pub fn new() -> Self {
        Default::default()
    }

    /// Start building a record
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    /// Re-derive quantities for every snapshot against the geometry
    ///
    /// Each snapshot is validated and reshaped independently, so one bad
    /// snapshot never affects the others. Returns every warning raised, in
    /// snapshot order and tagged with the snapshot index.
    ///
    /// Without a geometry nothing can be validated, and a single
    /// [Warning::MissingGeometry] is returned.
    pub fn normalise(&mut self) -> Vec<Warning> {
        let Some(geometry) = self.geometry else {
            warn!("{}", Warning::MissingGeometry);
            return vec![Warning::MissingGeometry];
        };

        if self.fields.is_empty() {
            debug!("No field snapshots to normalise");
        }

        let mut warnings = Vec::new();
        for field in &mut self.fields {
            if let Err(warning) = field.derive(&geometry) {
                let warning = warning.in_snapshot(field.index);
                warn!("{warning}");
                warnings.push(warning);
            }
        }
        warnings
    }

    /// Hand the record over to an external storage collaborator
    pub fn archive<A: Archive>(&self, archive: &mut A) -> Result<()> {
        archive.store(self.geometry.as_ref(), &self.fields)
    }

    /// Number of field snapshots
    pub fn n_fields(&self) -> usize {
        self.fields.len()
    }
}

impl std::fmt::Display for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Simulation {\n".to_string();
        s += &f!(
            "    geometry: {}\n",
            self.geometry
                .map(|g| f!("{}x{}x{}", g.nx(), g.ny(), g.nz()))
                .display()
        );
        s += &f!("    fields: {}\n", self.fields.len());
        s += &f!(
            "    derived: {}/{}\n}}",
            self.fields.iter().filter(|f| f.is_derived()).count(),
            self.fields.len()
        );
        write!(f, "{}", s)
    }
}

/// Builder for a [Simulation]
///
/// Collects the geometry and snapshots in order, see [Simulation::builder].
#[derive(Debug, Default)]
pub struct SimulationBuilder {
    geometry: Option<Geometry>,
    fields: Vec<FieldSnapshot>,
}

impl SimulationBuilder {
    /// Set the mesh geometry
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Append a single snapshot
    pub fn field(mut self, field: FieldSnapshot) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several snapshots in order
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSnapshot>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Finish the record
    pub fn build(self) -> Simulation {
        Simulation {
            geometry: self.geometry,
            fields: self.fields,
        }
    }
}
