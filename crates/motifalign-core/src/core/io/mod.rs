//! # I/O Module
//!
//! Reading landmark sequences out of motif files and writing score tables.
//!
//! - [`traits`] - The [`traits::LandmarkFile`] interface shared by structure readers
//! - [`motif_json`] - Motif JSON files keyed by residue
//! - [`export`] - CSV output for similarity matrices and pair scores

pub mod export;
pub mod motif_json;
pub mod traits;
