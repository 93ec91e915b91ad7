use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid rotation '{0}'. Expected 'AXIS:DEGREES' (e.g., '0,0,1:90' or 'z:90').")]
    InvalidRotationFormat(String),

    #[error("Invalid axis '{0}'. Expected 'x', 'y', 'z' or three comma-separated numbers.")]
    InvalidAxis(String),

    #[error("Invalid angle '{0}'. Expected a finite number of degrees.")]
    InvalidAngle(String),

    #[error("Rotation axis '{0}' must not be the zero vector.")]
    ZeroAxis(String),
}

/// A world-space rotation requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSpec {
    pub axis: Vector3<f64>,
    pub degrees: f64,
}

impl RotationSpec {
    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }
}

/// Parses `AXIS:DEGREES`, where `AXIS` is `x`, `y`, `z` or `ax,ay,az`.
pub fn parse_rotation(input: &str) -> Result<RotationSpec, ParseError> {
    let (axis_part, angle_part) = input
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidRotationFormat(input.to_string()))?;

    let axis = parse_axis(axis_part.trim())?;
    let degrees: f64 = angle_part
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ParseError::InvalidAngle(angle_part.to_string()))?;

    Ok(RotationSpec { axis, degrees })
}

fn parse_axis(text: &str) -> Result<Vector3<f64>, ParseError> {
    let axis = match text.to_ascii_lowercase().as_str() {
        "x" => Vector3::x(),
        "y" => Vector3::y(),
        "z" => Vector3::z(),
        _ => {
            let components = text
                .split(',')
                .map(|c| c.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ParseError::InvalidAxis(text.to_string()))?;
            if components.len() != 3 {
                return Err(ParseError::InvalidAxis(text.to_string()));
            }
            Vector3::new(components[0], components[1], components[2])
        }
    };

    if axis.norm() == 0.0 {
        return Err(ParseError::ZeroAxis(text.to_string()));
    }
    Ok(axis)
}
