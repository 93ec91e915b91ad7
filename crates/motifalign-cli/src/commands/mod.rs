pub mod align;
pub mod matrix;
pub mod quick;

use crate::config::{AppConfig, MotifEntry};
use crate::error::{CliError, Result};
use motifalign::core::io::motif_json::MotifJsonFile;
use motifalign::core::io::traits::LandmarkFile;
use motifalign::core::models::structure::{Structure, StructureHandle};
use motifalign::core::topology::landmarks::LandmarkSpec;
use std::path::Path;
use tracing::info;

/// A motif read from disk together with the session state it starts in.
pub struct LoadedMotif {
    pub structure: Structure,
    pub selected: bool,
    pub locked: bool,
}

pub fn load_motif(path: &Path, landmarks: &LandmarkSpec) -> Result<Structure> {
    MotifJsonFile::read_structure_from_path(path, landmarks).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn load_entry(entry: &MotifEntry, landmarks: &LandmarkSpec) -> Result<LoadedMotif> {
    let mut structure = load_motif(&entry.path, landmarks)?;
    if let Some(id) = &entry.id {
        structure = Structure::new(id.clone(), structure.landmarks().to_vec());
    }
    if let Some(orientation) = entry.orientation {
        structure = structure.with_orientation(orientation);
    }
    Ok(LoadedMotif {
        structure,
        selected: entry.selected,
        locked: entry.locked,
    })
}

/// Loads every configured motif, failing when none are given.
pub fn load_all(config: &AppConfig) -> Result<Vec<LoadedMotif>> {
    if config.motifs.is_empty() {
        return Err(CliError::Argument(
            "No motif files given. Pass them as arguments or list them under [[motifs]] in the config file."
                .to_string(),
        ));
    }

    let motifs = config
        .motifs
        .iter()
        .map(|entry| load_entry(entry, &config.landmarks))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Loaded {} motif(s) using landmark atom '{}'.",
        motifs.len(),
        config.landmarks.atom_name()
    );
    Ok(motifs)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::config::{CliOverrides, PartialAppConfig};
    use motifalign::core::models::orientation::Orientation;
    use tempfile::tempdir;

    #[test]
    fn load_all_applies_configured_id_and_orientation() {
        let dir = tempdir().unwrap();
        let path = write_motif(dir.path(), "hairpin", &MOTIF);
        let turned = Orientation::from_wxyz(0.0, 0.0, 0.0, 1.0).unwrap();
        let config = AppConfig {
            motifs: vec![MotifEntry {
                path,
                id: Some("renamed".to_string()),
                orientation: Some(turned),
                selected: true,
                locked: false,
            }],
            ..PartialAppConfig::default().merge_with_cli(&CliOverrides::default()).unwrap()
        };

        let loaded = load_all(&config).unwrap();
        assert_eq!(loaded[0].structure.id(), "renamed");
        assert_eq!(loaded[0].structure.orientation(), &turned);
        assert_eq!(loaded[0].structure.landmarks().len(), 4);
        assert!(loaded[0].selected);
    }

    #[test]
    fn load_all_requires_at_least_one_motif() {
        let config = PartialAppConfig::default()
            .merge_with_cli(&CliOverrides::default())
            .unwrap();
        assert!(matches!(load_all(&config), Err(CliError::Argument(_))));
    }

    #[test]
    fn unreadable_motif_reports_its_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_motif(&missing, &LandmarkSpec::default()).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
