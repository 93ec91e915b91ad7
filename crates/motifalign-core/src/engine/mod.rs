//! # Engine Module
//!
//! The alignment and scoring engine: pure functions that superpose landmark
//! sequences and score their similarity.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Scoring mode and numerical settings of the Kabsch solver
//! - **Error Handling** ([`error`]) - Engine error types carrying operation names and structure ids
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for long runs
//! - **Tasks** ([`tasks`]) - Sliding-window RMSD, the Kabsch solver and their combination
//!
//! Structures enter the engine through the
//! [`StructureHandle`](crate::core::models::structure::StructureHandle) trait and are
//! only ever read. Every rotation produces fresh point vectors.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
pub(crate) mod utils;
