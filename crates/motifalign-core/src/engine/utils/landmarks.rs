use crate::core::models::orientation::OrientationError;
use crate::core::models::structure::StructureHandle;
use crate::core::utils::geometry::rotate_points;
use crate::engine::error::EngineError;
use itertools::Itertools;
use nalgebra::Point3;

/// Landmarks of `structure` rotated by its displayed orientation.
///
/// Refuses to proceed when the orientation is non-finite so NaNs never reach a score.
pub(crate) fn oriented_landmarks<S: StructureHandle + ?Sized>(
    structure: &S,
) -> Result<Vec<Point3<f64>>, EngineError> {
    let orientation = structure.orientation();
    if !orientation.is_finite() {
        return Err(EngineError::Orientation {
            structure_id: structure.id().to_string(),
            source: OrientationError::NonFinite(orientation.to_wxyz()),
        });
    }
    Ok(rotate_points(structure.landmarks(), orientation))
}

/// All unordered index pairs `(i, j)` with `i < j`, in row-major order.
pub(crate) fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    (0..n).tuple_combinations().collect()
}
