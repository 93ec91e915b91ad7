use phf::{Map, phf_map};
use thiserror::Error;

pub const DEFAULT_LANDMARK_ATOM: &str = "C1'";

/// Representative atom per polymer kind.
pub static POLYMER_LANDMARKS: Map<&'static str, &'static str> = phf_map! {
    "rna" => "C1'",
    "dna" => "C1'",
    "protein" => "CA",
};

/// Legacy spellings mapped to their canonical atom names.
#[rustfmt::skip]
pub static ATOM_NAME_ALIASES: Map<&'static str, &'static str> = phf_map! {
    // --- Sugar ring (old PDB star notation) ---
    "C1*" => "C1'", "C2*" => "C2'", "C3*" => "C3'", "C4*" => "C4'", "C5*" => "C5'",
    "O2*" => "O2'", "O3*" => "O3'", "O4*" => "O4'", "O5*" => "O5'",

    // --- Phosphate ---
    "O1P" => "OP1", "O2P" => "OP2",
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("Unknown polymer kind '{0}'. Expected one of: rna, dna, protein.")]
    UnknownPolymer(String),

    #[error("Landmark atom name cannot be empty")]
    EmptyAtomName,
}

/// Which atom of each residue becomes its landmark point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkSpec {
    atom_name: String,
}

impl LandmarkSpec {
    pub fn for_atom(atom_name: &str) -> Result<Self, LandmarkError> {
        let name = normalize_atom_name(atom_name);
        if name.is_empty() {
            return Err(LandmarkError::EmptyAtomName);
        }
        Ok(Self { atom_name: name })
    }

    pub fn for_polymer(kind: &str) -> Result<Self, LandmarkError> {
        POLYMER_LANDMARKS
            .get(kind.to_ascii_lowercase().as_str())
            .map(|atom| Self {
                atom_name: (*atom).to_string(),
            })
            .ok_or_else(|| LandmarkError::UnknownPolymer(kind.to_string()))
    }

    pub fn atom_name(&self) -> &str {
        &self.atom_name
    }

    /// Whether a raw atom name from a motif file names this landmark.
    pub fn matches(&self, raw_name: &str) -> bool {
        normalize_atom_name(raw_name) == self.atom_name
    }
}

impl Default for LandmarkSpec {
    fn default() -> Self {
        Self {
            atom_name: DEFAULT_LANDMARK_ATOM.to_string(),
        }
    }
}

/// Strips surrounding quotes and whitespace and resolves legacy aliases.
pub fn normalize_atom_name(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"').trim();
    ATOM_NAME_ALIASES
        .get(trimmed)
        .copied()
        .unwrap_or(trimmed)
        .to_string()
}
