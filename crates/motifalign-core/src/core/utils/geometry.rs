use crate::core::models::orientation::Orientation;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Point sequences must have equal length ({left} vs {right} points)")]
    LengthMismatch { left: usize, right: usize },

    #[error("Cannot compute RMSD of empty point sequences")]
    Empty,
}

/// Returns a rotated copy of `points`; the input slice is left untouched.
pub fn rotate_points(points: &[Point3<f64>], orientation: &Orientation) -> Vec<Point3<f64>> {
    points.iter().map(|p| orientation.rotate_point(p)).collect()
}

pub fn rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Result<f64, GeometryError> {
    if coords1.len() != coords2.len() {
        return Err(GeometryError::LengthMismatch {
            left: coords1.len(),
            right: coords2.len(),
        });
    }
    if coords1.is_empty() {
        return Err(GeometryError::Empty);
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Ok((squared_dist_sum / n).sqrt())
}

/// Splits two sequences into `(short, long)`; on equal length `a` is the short one.
pub fn order_by_length<'a, T>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    if a.len() <= b.len() { (a, b) } else { (b, a) }
}
