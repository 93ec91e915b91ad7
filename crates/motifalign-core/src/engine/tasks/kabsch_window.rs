use super::kabsch::{kabsch_with_config, superposition_orientation};
use crate::core::models::scores::AlignmentResult;
use crate::core::models::structure::StructureHandle;
use crate::core::utils::geometry::{order_by_length, rmsd, rotate_points};
use crate::engine::config::KabschConfig;
use crate::engine::error::EngineError;
use crate::engine::utils::landmarks::oriented_landmarks;
use nalgebra::Point3;
use tracing::{debug, instrument, trace};

const OPERATION: &str = "kabsch_sliding_window";

/// Best Kabsch fit of the shorter structure against every contiguous window of the
/// longer one, both taken in their displayed orientation.
pub fn kabsch_sliding_window<R, M>(reference: &R, moving: &M) -> Result<AlignmentResult, EngineError>
where
    R: StructureHandle + ?Sized,
    M: StructureHandle + ?Sized,
{
    kabsch_sliding_window_with_config(reference, moving, &KabschConfig::default())
}

#[instrument(skip_all, name = "kabsch_window_task", fields(reference = reference.id(), moving = moving.id()))]
pub fn kabsch_sliding_window_with_config<R, M>(
    reference: &R,
    moving: &M,
    config: &KabschConfig,
) -> Result<AlignmentResult, EngineError>
where
    R: StructureHandle + ?Sized,
    M: StructureHandle + ?Sized,
{
    let wrap = |e| EngineError::alignment(reference.id(), moving.id(), e);

    let reference_points = oriented_landmarks(reference).map_err(wrap)?;
    let moving_points = oriented_landmarks(moving).map_err(wrap)?;

    let result = best_fit(&reference_points, &moving_points, config).map_err(wrap)?;
    debug!(offset = result.offset, rmsd = result.rmsd, "Best window found.");
    Ok(result)
}

/// Window scan over already-oriented point sequences.
pub(crate) fn best_fit(
    a: &[Point3<f64>],
    b: &[Point3<f64>],
    config: &KabschConfig,
) -> Result<AlignmentResult, EngineError> {
    let (short, long) = order_by_length(a, b);
    let window_len = short.len();
    if window_len == 0 {
        return Err(EngineError::degenerate(
            OPERATION,
            "cannot fit an empty landmark sequence",
        ));
    }

    let mut best: Option<AlignmentResult> = None;
    for offset in 0..=(long.len() - window_len) {
        let window = &long[offset..offset + window_len];
        let rotation = kabsch_with_config(short, window, config)?;
        let orientation = superposition_orientation(&rotation).map_err(|e| {
            EngineError::degenerate(OPERATION, format!("window {offset} rotation unusable: {e}"))
        })?;
        let fitted = rotate_points(window, &orientation);
        let score = rmsd(short, &fitted).map_err(|e| EngineError::shape(OPERATION, e))?;
        trace!(offset, score, "Fitted window.");

        if best.as_ref().is_none_or(|current| score < current.rmsd) {
            best = Some(AlignmentResult {
                rotation,
                rmsd: score,
                offset,
            });
        }
    }

    best.ok_or_else(|| EngineError::degenerate(OPERATION, "no window could be fitted"))
}
