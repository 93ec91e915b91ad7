//! Computational units of the alignment engine.
//!
//! Each task is a pure function over landmark sequences or structure handles.
//! Workflows compose them; none of them keeps state between calls.

pub mod kabsch;
pub mod kabsch_window;
pub(crate) mod pairwise;
pub mod quick_score;
pub mod sliding_window;
