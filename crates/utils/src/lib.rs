//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, physical cell sizes and magnetisation vectors are printed in
//! consistent scientific notation everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod option_ext;
mod value_ext;

// Flatten
pub use option_ext::OptionExt;
pub use value_ext::{ValueExt, VectorExt};
