//! # MotifAlign Core Library
//!
//! Structural alignment and similarity scoring for molecular motifs reduced to one
//! landmark point per residue.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers, each building on the one before it:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Orientation`,
//!   `SimilarityMatrix`), landmark schemes, point-set utilities and file I/O.
//!
//! - **[`engine`]: The Logic Core.** Pure alignment tasks: sliding-window RMSD, the
//!   Kabsch solver and the Kabsch sliding-window aligner, plus configuration, errors
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Collection-level procedures: the all-pairs
//!   similarity matrix, quick scores of a selection, single-pair alignment and the
//!   interactive session.
//!
//! ## Example
//!
//! ```
//! use motifalign::core::models::structure::Structure;
//! use motifalign::workflows::score::score_all;
//! use nalgebra::Point3;
//!
//! let landmarks = vec![
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//!     Point3::new(0.0, 0.0, 3.0),
//! ];
//! let structures = vec![
//!     Structure::new("a", landmarks.clone()),
//!     Structure::new("b", landmarks),
//! ];
//! let matrix = score_all(&structures).unwrap();
//! assert!(matrix.get_by_id("a", "b").unwrap() < 1e-9);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
