//! `mmtools` is a small toolkit of fast and reliable libraries for
//! micromagnetic simulation output
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use mmtools_utils as utils;

#[cfg(feature = "ovf")]
#[cfg_attr(docsrs, doc(cfg(feature = "ovf")))]
#[doc(inline)]
pub use mmtools_ovf as ovf;
