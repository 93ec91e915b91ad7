//! # Workflows Module
//!
//! High-level entry points that tie the [`engine`](crate::engine) tasks to collections
//! of structures.
//!
//! - **Similarity Matrix** ([`score`]) - All-pairs scoring in quick or Kabsch mode
//! - **Quick Scores** ([`quick`]) - Selected structures against the collection, as displayed
//! - **Pair Alignment** ([`align`]) - A single Kabsch sliding-window alignment
//! - **Interactive Session** ([`session`]) - Selection, locks and transforms with live quick scores

pub mod align;
pub mod quick;
pub mod score;
pub mod session;
