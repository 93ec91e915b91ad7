use nalgebra::{Matrix3, Point3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_NORM: f64 = 1e-12;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrientationError {
    #[error("Orientation quaternion is not finite: [w, x, y, z] = {0:?}")]
    NonFinite([f64; 4]),

    #[error("Orientation quaternion has zero norm")]
    ZeroNorm,

    #[error("Rotation axis must be finite and non-zero")]
    InvalidAxis(Vector3<f64>),

    #[error("Rotation angle must be finite (got {0})")]
    NonFiniteAngle(f64),

    #[error("Rotation matrix contains non-finite entries")]
    NonFiniteMatrix,
}

/// A rigid rotation stored as a unit quaternion.
///
/// Every constructor and composition validates its result, so an `Orientation`
/// can never hold NaN or infinite components. Deserialization goes through the
/// same checks via the `[w, x, y, z]` array form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Orientation(UnitQuaternion<f64>);

impl Orientation {
    pub fn identity() -> Self {
        Self(UnitQuaternion::identity())
    }

    /// Builds an orientation from raw quaternion components, normalizing them.
    pub fn from_wxyz(w: f64, x: f64, y: f64, z: f64) -> Result<Self, OrientationError> {
        let raw = [w, x, y, z];
        if raw.iter().any(|c| !c.is_finite()) {
            return Err(OrientationError::NonFinite(raw));
        }
        let quaternion = Quaternion::new(w, x, y, z);
        if quaternion.norm() < MIN_NORM {
            return Err(OrientationError::ZeroNorm);
        }
        Self::from_unit_quaternion(UnitQuaternion::from_quaternion(quaternion))
    }

    pub fn from_unit_quaternion(quaternion: UnitQuaternion<f64>) -> Result<Self, OrientationError> {
        let candidate = Self(quaternion);
        if candidate.is_finite() {
            Ok(candidate)
        } else {
            Err(OrientationError::NonFinite(candidate.to_wxyz()))
        }
    }

    /// Rotation of `angle` radians about `axis` (need not be normalized).
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Result<Self, OrientationError> {
        if !axis.iter().all(|c| c.is_finite()) || axis.norm() < MIN_NORM {
            return Err(OrientationError::InvalidAxis(*axis));
        }
        if !angle.is_finite() {
            return Err(OrientationError::NonFiniteAngle(angle));
        }
        Self::from_unit_quaternion(UnitQuaternion::from_axis_angle(
            &Unit::new_normalize(*axis),
            angle,
        ))
    }

    /// Interprets `matrix` as a proper rotation acting on column vectors.
    pub fn from_rotation_matrix(matrix: &Matrix3<f64>) -> Result<Self, OrientationError> {
        if !matrix.iter().all(|c| c.is_finite()) {
            return Err(OrientationError::NonFiniteMatrix);
        }
        let rotation = Rotation3::from_matrix_unchecked(*matrix);
        Self::from_unit_quaternion(UnitQuaternion::from_rotation_matrix(&rotation))
    }

    /// World-space composition: `delta` is applied after `self`.
    pub fn rotated_by(&self, delta: &Orientation) -> Result<Self, OrientationError> {
        Self::from_unit_quaternion(delta.0 * self.0)
    }

    #[inline]
    pub fn rotate_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.0 * point
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Angle in radians of the rotation taking `self` to `other`.
    pub fn angle_to(&self, other: &Orientation) -> f64 {
        self.0.angle_to(&other.0)
    }

    pub fn is_finite(&self) -> bool {
        self.to_wxyz().iter().all(|c| c.is_finite())
    }

    pub fn as_unit_quaternion(&self) -> &UnitQuaternion<f64> {
        &self.0
    }

    pub fn to_rotation_matrix(&self) -> Matrix3<f64> {
        self.0.to_rotation_matrix().into_inner()
    }

    pub fn to_wxyz(&self) -> [f64; 4] {
        [self.0.w, self.0.i, self.0.j, self.0.k]
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<[f64; 4]> for Orientation {
    type Error = OrientationError;

    fn try_from([w, x, y, z]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::from_wxyz(w, x, y, z)
    }
}

impl From<Orientation> for [f64; 4] {
    fn from(orientation: Orientation) -> Self {
        orientation.to_wxyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn from_wxyz_normalizes_components() {
        let orientation = Orientation::from_wxyz(2.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(orientation.to_wxyz(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn from_wxyz_rejects_nan_components() {
        let result = Orientation::from_wxyz(f64::NAN, 0.0, 0.0, 1.0);
        assert!(matches!(result, Err(OrientationError::NonFinite(_))));
    }

    #[test]
    fn from_wxyz_rejects_zero_quaternion() {
        assert_eq!(
            Orientation::from_wxyz(0.0, 0.0, 0.0, 0.0),
            Err(OrientationError::ZeroNorm)
        );
    }

    #[test]
    fn from_axis_angle_rejects_zero_axis_and_infinite_angle() {
        assert!(matches!(
            Orientation::from_axis_angle(&Vector3::zeros(), 1.0),
            Err(OrientationError::InvalidAxis(_))
        ));
        assert!(matches!(
            Orientation::from_axis_angle(&Vector3::z(), f64::INFINITY),
            Err(OrientationError::NonFiniteAngle(_))
        ));
    }

    #[test]
    fn rotated_by_applies_delta_in_world_space() {
        let about_z = Orientation::from_axis_angle(&Vector3::z(), FRAC_PI_2).unwrap();
        let about_x = Orientation::from_axis_angle(&Vector3::x(), FRAC_PI_2).unwrap();

        let composed = about_z.rotated_by(&about_x).unwrap();
        let rotated = composed.rotate_point(&Point3::new(1.0, 0.0, 0.0));

        // z turn sends x to y, then the x turn sends y to z.
        assert!((rotated - Point3::new(0.0, 0.0, 1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn rotation_matrix_round_trips_through_orientation() {
        let orientation = Orientation::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), 0.7).unwrap();
        let matrix = orientation.to_rotation_matrix();
        let recovered = Orientation::from_rotation_matrix(&matrix).unwrap();
        assert!(orientation.angle_to(&recovered) < TOLERANCE);
    }

    #[test]
    fn from_rotation_matrix_rejects_nan_entries() {
        let mut matrix = Matrix3::identity();
        matrix[(1, 2)] = f64::NAN;
        assert_eq!(
            Orientation::from_rotation_matrix(&matrix),
            Err(OrientationError::NonFiniteMatrix)
        );
    }

    #[test]
    fn inverse_undoes_rotation() {
        let orientation = Orientation::from_axis_angle(&Vector3::y(), PI / 3.0).unwrap();
        let point = Point3::new(0.3, -1.2, 2.5);
        let back = orientation
            .inverse()
            .rotate_point(&orientation.rotate_point(&point));
        assert!((back - point).norm() < TOLERANCE);
    }

    #[test]
    fn deserialization_validates_components() {
        #[derive(Deserialize)]
        struct Wrapper {
            orientation: Orientation,
        }

        let ok: Wrapper = serde_json::from_str(r#"{"orientation": [1.0, 0.0, 0.0, 0.0]}"#).unwrap();
        assert_eq!(ok.orientation, Orientation::identity());

        let zero = serde_json::from_str::<Wrapper>(r#"{"orientation": [0.0, 0.0, 0.0, 0.0]}"#);
        assert!(zero.is_err());
    }
}
