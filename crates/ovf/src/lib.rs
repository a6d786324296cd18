//! OVF2 magnetisation file parsing and grid tools
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod archive;
mod error;
mod field;
mod geometry;
mod simulation;
mod warning;

pub mod derived;
pub mod grid;
pub mod reader;

// inline the important types for a nice public API
#[doc(inline)]
pub use reader::{read_ovf, read_ovf_series, Header, OvfReader};

#[doc(inline)]
pub use simulation::{Simulation, SimulationBuilder};

#[doc(inline)]
pub use field::FieldSnapshot;

#[doc(inline)]
pub use geometry::Geometry;

#[doc(inline)]
pub use grid::Grid;

#[doc(inline)]
pub use archive::{write_json, Archive, JsonArchive};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use warning::{Parsed, Warning};
