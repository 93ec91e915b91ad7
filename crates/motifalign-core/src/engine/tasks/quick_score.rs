use super::sliding_window::sliding_window_rmsd;
use crate::core::models::structure::StructureHandle;
use crate::engine::error::EngineError;
use crate::engine::utils::landmarks::oriented_landmarks;

/// Sliding-window RMSD of two structures exactly as displayed: each is rotated by
/// its own orientation and no fit is performed.
pub fn quick_score<A, B>(a: &A, b: &B) -> Result<f64, EngineError>
where
    A: StructureHandle + ?Sized,
    B: StructureHandle + ?Sized,
{
    let wrap = |e| EngineError::alignment(b.id(), a.id(), e);
    let a_points = oriented_landmarks(a).map_err(wrap)?;
    let b_points = oriented_landmarks(b).map_err(wrap)?;
    sliding_window_rmsd(&a_points, &b_points).map_err(wrap)
}
