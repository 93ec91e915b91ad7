use crate::core::utils::geometry::{order_by_length, rmsd};
use crate::engine::error::EngineError;
use nalgebra::Point3;
use tracing::trace;

const OPERATION: &str = "sliding_window_rmsd";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMatch {
    /// Start of the best window within the longer sequence.
    pub offset: usize,
    pub rmsd: f64,
}

/// Minimal plain RMSD of the shorter sequence against every contiguous window of
/// the longer one. See [`best_window`] for the offset as well.
pub fn sliding_window_rmsd(a: &[Point3<f64>], b: &[Point3<f64>]) -> Result<f64, EngineError> {
    best_window(a, b).map(|found| found.rmsd)
}

/// Scans offsets `0..=len(long) - len(short)` in order; the first offset reaching the
/// minimum wins. When both sequences have the same length `a` is treated as the short one.
pub fn best_window(a: &[Point3<f64>], b: &[Point3<f64>]) -> Result<WindowMatch, EngineError> {
    let (short, long) = order_by_length(a, b);
    let window_len = short.len();
    if window_len == 0 {
        return Err(EngineError::degenerate(
            OPERATION,
            "cannot slide an empty landmark sequence",
        ));
    }

    let mut best: Option<WindowMatch> = None;
    for offset in 0..=(long.len() - window_len) {
        let window = &long[offset..offset + window_len];
        let score = rmsd(short, window).map_err(|e| EngineError::shape(OPERATION, e))?;
        trace!(offset, score, "Scored window.");

        if best.is_none_or(|current| score < current.rmsd) {
            best = Some(WindowMatch { offset, rmsd: score });
        }
    }

    best.ok_or_else(|| EngineError::degenerate(OPERATION, "no window could be scored"))
}
