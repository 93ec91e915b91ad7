//! # Core Module
//!
//! Stateless building blocks of the library: the structure data model, point-set
//! geometry, landmark conventions and file I/O. Nothing in here performs alignment;
//! that lives in [`crate::engine`].
//!
//! - **Models** ([`models`]) - Orientations, structures and score containers
//! - **Geometry** ([`utils::geometry`]) - Point rotation and plain RMSD
//! - **Landmarks** ([`topology`]) - Which atom represents each residue
//! - **File I/O** ([`io`]) - Motif JSON reading and CSV export

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
