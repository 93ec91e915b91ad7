use crate::core::models::orientation::{Orientation, OrientationError};
use crate::core::utils::geometry::GeometryError;
use crate::engine::config::KabschConfig;
use crate::engine::error::EngineError;
use nalgebra::{Matrix3, Point3};
use tracing::trace;

const OPERATION: &str = "kabsch";

/// Optimal proper rotation between two equal-length point sequences.
///
/// Returns `R` such that `R * reference_i ≈ moving_i` in the least-squares sense,
/// with `det(R) = +1`. The rotation that superposes `moving` onto `reference` is
/// therefore `Rᵀ`; see [`superposition_orientation`].
pub fn kabsch(
    reference: &[Point3<f64>],
    moving: &[Point3<f64>],
) -> Result<Matrix3<f64>, EngineError> {
    kabsch_with_config(reference, moving, &KabschConfig::default())
}

pub fn kabsch_with_config(
    reference: &[Point3<f64>],
    moving: &[Point3<f64>],
    config: &KabschConfig,
) -> Result<Matrix3<f64>, EngineError> {
    if reference.len() != moving.len() {
        return Err(EngineError::shape(
            OPERATION,
            GeometryError::LengthMismatch {
                left: reference.len(),
                right: moving.len(),
            },
        ));
    }
    if reference.is_empty() {
        return Err(EngineError::shape(OPERATION, GeometryError::Empty));
    }

    let h = cross_covariance(reference, moving);
    if !h.iter().all(|v| v.is_finite()) {
        return Err(EngineError::degenerate(
            OPERATION,
            "cross-covariance matrix has non-finite entries",
        ));
    }

    let svd = h
        .try_svd(true, true, config.svd_epsilon, config.max_svd_iterations)
        .ok_or_else(|| {
            EngineError::degenerate(
                OPERATION,
                format!(
                    "singular value decomposition did not converge within {} iterations",
                    config.max_svd_iterations
                ),
            )
        })?;

    let sigma = svd.singular_values;
    let cutoff = config.rank_tolerance * sigma.max();
    let rank = sigma.iter().filter(|&&s| s > cutoff).count();
    if rank < 2 {
        return Err(EngineError::degenerate(
            OPERATION,
            format!("cross-covariance matrix has rank {rank}; the rotation is undetermined"),
        ));
    }

    let u = svd
        .u
        .ok_or_else(|| EngineError::degenerate(OPERATION, "decomposition produced no U"))?;
    let mut v_t = svd
        .v_t
        .ok_or_else(|| EngineError::degenerate(OPERATION, "decomposition produced no Vᵀ"))?;

    let mut rotation = v_t.transpose() * u.transpose();
    if rotation.determinant() < 0.0 {
        // Flip the singular vector paired with the smallest singular value.
        let weakest = sigma.imin();
        trace!(weakest, "Correcting reflection.");
        for col in 0..3 {
            v_t[(weakest, col)] = -v_t[(weakest, col)];
        }
        rotation = v_t.transpose() * u.transpose();
    }

    Ok(rotation)
}

/// The orientation that superposes the `moving` sequence of a [`kabsch`] call onto
/// its `reference`, i.e. the rotation `Rᵀ`.
pub fn superposition_orientation(rotation: &Matrix3<f64>) -> Result<Orientation, OrientationError> {
    Orientation::from_rotation_matrix(&rotation.transpose())
}

fn cross_covariance(reference: &[Point3<f64>], moving: &[Point3<f64>]) -> Matrix3<f64> {
    reference
        .iter()
        .zip(moving)
        .fold(Matrix3::zeros(), |acc, (r, m)| acc + r.coords * m.coords.transpose())
}
