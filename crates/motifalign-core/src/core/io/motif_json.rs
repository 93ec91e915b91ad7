use crate::core::io::traits::LandmarkFile;
use crate::core::topology::landmarks::LandmarkSpec;
use nalgebra::Point3;
use serde_json::{Map, Value};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum MotifFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object keyed by residue at the top level")]
    NotAnObject,
    #[error("Residue '{residue}': {kind}")]
    Residue {
        residue: String,
        kind: MotifResidueErrorKind,
    },
    #[error("No residue carries the landmark atom '{atom}'")]
    NoLandmarks { atom: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotifResidueErrorKind {
    #[error("expected an array whose first element maps atom names to coordinates")]
    MissingAtomMap,
    #[error("atom '{atom}' must have exactly 3 coordinates (found {found})")]
    WrongArity { atom: String, found: usize },
    #[error("atom '{atom}' has an invalid coordinate '{value}'")]
    InvalidCoordinate { atom: String, value: String },
}

/// Motif JSON files as exported by the motif viewer.
///
/// The top-level object is keyed by residue in sequence order. Each value is an
/// array whose first element maps atom names (optionally wrapped in literal
/// double quotes) to `[x, y, z]`, given as numbers or numeric strings. Later
/// array elements hold mesh data and are ignored here.
pub struct MotifJsonFile;

impl LandmarkFile for MotifJsonFile {
    type Error = MotifFileError;

    fn read_landmarks(
        reader: &mut impl BufRead,
        spec: &LandmarkSpec,
    ) -> Result<Vec<Point3<f64>>, Self::Error> {
        let document: Value = serde_json::from_reader(reader)?;
        let residues = document.as_object().ok_or(MotifFileError::NotAnObject)?;

        let mut landmarks = Vec::with_capacity(residues.len());
        for (residue, value) in residues {
            let atom_map = atom_map_of(value).ok_or_else(|| MotifFileError::Residue {
                residue: residue.clone(),
                kind: MotifResidueErrorKind::MissingAtomMap,
            })?;

            match find_landmark(atom_map, spec) {
                Some((atom, coords)) => {
                    let point = parse_point(atom, coords).map_err(|kind| MotifFileError::Residue {
                        residue: residue.clone(),
                        kind,
                    })?;
                    trace!(residue = %residue, ?point, "Extracted landmark.");
                    landmarks.push(point);
                }
                None => debug!(
                    "Residue '{}' has no '{}' atom; skipping.",
                    residue,
                    spec.atom_name()
                ),
            }
        }

        if landmarks.is_empty() {
            return Err(MotifFileError::NoLandmarks {
                atom: spec.atom_name().to_string(),
            });
        }
        debug!(
            "Read {} landmark(s) from {} residue(s).",
            landmarks.len(),
            residues.len()
        );
        Ok(landmarks)
    }
}

fn atom_map_of(value: &Value) -> Option<&Map<String, Value>> {
    value.as_array()?.first()?.as_object()
}

fn find_landmark<'a>(
    atom_map: &'a Map<String, Value>,
    spec: &LandmarkSpec,
) -> Option<(&'a str, &'a Value)> {
    atom_map
        .iter()
        .find(|(name, _)| spec.matches(name))
        .map(|(name, coords)| (name.as_str(), coords))
}

fn parse_point(atom: &str, coords: &Value) -> Result<Point3<f64>, MotifResidueErrorKind> {
    let items = coords
        .as_array()
        .ok_or_else(|| MotifResidueErrorKind::WrongArity {
            atom: atom.to_string(),
            found: 0,
        })?;
    if items.len() != 3 {
        return Err(MotifResidueErrorKind::WrongArity {
            atom: atom.to_string(),
            found: items.len(),
        });
    }

    let mut xyz = [0.0; 3];
    for (slot, item) in xyz.iter_mut().zip(items) {
        let parsed = match item {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        *slot = parsed
            .filter(|v| v.is_finite())
            .ok_or_else(|| MotifResidueErrorKind::InvalidCoordinate {
                atom: atom.to_string(),
                value: item.to_string(),
            })?;
    }
    Ok(Point3::new(xyz[0], xyz[1], xyz[2]))
}
