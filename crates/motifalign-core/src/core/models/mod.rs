//! # Core Models Module
//!
//! Plain data types shared by the whole library.
//!
//! - [`orientation`] - Validated unit-quaternion orientations that can never hold NaN
//! - [`structure`] - Motif structures (landmarks plus display transform) and the
//!   [`structure::StructureHandle`] view the alignment engine works against
//! - [`scores`] - Alignment results, directed pair scores and similarity matrices
//! - [`ids`] - Slot-map keys for structures held by an interaction session

pub mod ids;
pub mod orientation;
pub mod scores;
pub mod structure;
