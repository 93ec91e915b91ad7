use crate::core::models::structure::Structure;
use crate::core::topology::landmarks::LandmarkSpec;
use nalgebra::Point3;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading landmark point sequences from structure files.
///
/// Implementors reduce each residue of a file to a single landmark point chosen by
/// a [`LandmarkSpec`], keeping residue sequence order.
pub trait LandmarkFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads the landmark sequence from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `spec` - Which atom of each residue to take as its landmark.
    ///
    /// # Return
    ///
    /// Returns one point per residue carrying the landmark atom, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_landmarks(
        reader: &mut impl BufRead,
        spec: &LandmarkSpec,
    ) -> Result<Vec<Point3<f64>>, Self::Error>;

    /// Reads a structure from a file path, using the file stem as its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_structure_from_path<P: AsRef<Path>>(
        path: P,
        spec: &LandmarkSpec,
    ) -> Result<Structure, Self::Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let landmarks = Self::read_landmarks(&mut reader, spec)?;
        Ok(Structure::new(structure_id_from_path(path), landmarks))
    }
}

pub fn structure_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
