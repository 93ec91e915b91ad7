use super::orientation::{Orientation, OrientationError};
use crate::core::utils::geometry::rotate_points;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// Read-only view of a structure as consumed by the alignment engine.
pub trait StructureHandle {
    /// Stable identity, used to skip self comparisons and to label results.
    fn id(&self) -> &str;
    /// One landmark point per residue, in residue sequence order.
    fn landmarks(&self) -> &[Point3<f64>];
    /// The orientation the structure is currently displayed with.
    fn orientation(&self) -> &Orientation;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error(transparent)]
    Orientation(#[from] OrientationError),

    #[error("Translation must be finite")]
    NonFiniteTranslation,

    #[error("Scale must be finite and positive (got {0})")]
    InvalidScale(f64),
}

/// A motif: landmark points plus its current display transform.
///
/// Only the orientation takes part in scoring. Position and scale are display
/// state carried for the interaction layer. All mutators validate the new value
/// and keep the previous one when validation fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    id: String,
    landmarks: Vec<Point3<f64>>,
    orientation: Orientation,
    position: Point3<f64>,
    scale: f64,
}

impl Structure {
    pub fn new(id: impl Into<String>, landmarks: Vec<Point3<f64>>) -> Self {
        Self {
            id: id.into(),
            landmarks,
            orientation: Orientation::identity(),
            position: Point3::origin(),
            scale: 1.0,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Applies `delta` on top of the current orientation in world space.
    pub fn rotate_by(&mut self, delta: &Orientation) -> Result<(), TransformError> {
        self.orientation = self.orientation.rotated_by(delta)?;
        Ok(())
    }

    pub fn rotate_axis_angle(&mut self, axis: &Vector3<f64>, angle: f64) -> Result<(), TransformError> {
        let delta = Orientation::from_axis_angle(axis, angle)?;
        self.rotate_by(&delta)
    }

    pub fn translate(&mut self, delta: &Vector3<f64>) -> Result<(), TransformError> {
        let moved = self.position + delta;
        if !moved.iter().all(|c| c.is_finite()) {
            return Err(TransformError::NonFiniteTranslation);
        }
        self.position = moved;
        Ok(())
    }

    pub fn set_position(&mut self, position: Point3<f64>) -> Result<(), TransformError> {
        if !position.iter().all(|c| c.is_finite()) {
            return Err(TransformError::NonFiniteTranslation);
        }
        self.position = position;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), TransformError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TransformError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    pub fn multiply_scale(&mut self, factor: f64) -> Result<(), TransformError> {
        self.set_scale(self.scale * factor)
    }

    /// Landmarks rotated by the current orientation, as a fresh vector.
    pub fn displayed_landmarks(&self) -> Vec<Point3<f64>> {
        rotate_points(&self.landmarks, &self.orientation)
    }
}

impl StructureHandle for Structure {
    fn id(&self) -> &str {
        &self.id
    }

    fn landmarks(&self) -> &[Point3<f64>] {
        &self.landmarks
    }

    fn orientation(&self) -> &Orientation {
        &self.orientation
    }
}

impl<T: StructureHandle + ?Sized> StructureHandle for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn landmarks(&self) -> &[Point3<f64>] {
        (**self).landmarks()
    }

    fn orientation(&self) -> &Orientation {
        (**self).orientation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-9;

    fn sample() -> Structure {
        Structure::new(
            "hairpin",
            vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
        )
    }

    #[test]
    fn new_structure_starts_untransformed() {
        let structure = sample();
        assert_eq!(structure.id(), "hairpin");
        assert_eq!(structure.len(), 2);
        assert_eq!(*structure.orientation(), Orientation::identity());
        assert_eq!(*structure.position(), Point3::origin());
        assert_eq!(structure.scale(), 1.0);
    }

    #[test]
    fn rotate_axis_angle_updates_displayed_landmarks_but_not_raw_ones() {
        let mut structure = sample();
        structure.rotate_axis_angle(&Vector3::z(), FRAC_PI_2).unwrap();

        let displayed = structure.displayed_landmarks();
        assert!((displayed[0] - Point3::new(0.0, 1.0, 0.0)).norm() < TOLERANCE);
        assert_eq!(structure.landmarks()[0], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_rotation_keeps_last_good_orientation() {
        let mut structure = sample();
        structure.rotate_axis_angle(&Vector3::x(), 0.3).unwrap();
        let before = *structure.orientation();

        let result = structure.rotate_axis_angle(&Vector3::x(), f64::NAN);

        assert!(matches!(result, Err(TransformError::Orientation(_))));
        assert_eq!(*structure.orientation(), before);
    }

    #[test]
    fn invalid_translation_and_scale_are_rejected() {
        let mut structure = sample();
        structure.translate(&Vector3::new(1.0, 2.0, 3.0)).unwrap();

        assert_eq!(
            structure.translate(&Vector3::new(f64::INFINITY, 0.0, 0.0)),
            Err(TransformError::NonFiniteTranslation)
        );
        assert_eq!(*structure.position(), Point3::new(1.0, 2.0, 3.0));

        structure.multiply_scale(1.1).unwrap();
        assert!(matches!(
            structure.multiply_scale(0.0),
            Err(TransformError::InvalidScale(_))
        ));
        assert!((structure.scale() - 1.1).abs() < TOLERANCE);
    }
}
