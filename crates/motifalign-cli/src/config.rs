use crate::error::{CliError, Result};
use motifalign::core::models::orientation::Orientation;
use motifalign::core::topology::landmarks::LandmarkSpec;
use motifalign::engine::config::{self as core_config, ScoringMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLandmarkConfig {
    atom: Option<String>,
    polymer: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialScoringConfig {
    mode: Option<ScoringMode>,
    #[serde(rename = "svd-epsilon")]
    svd_epsilon: Option<f64>,
    #[serde(rename = "max-svd-iterations")]
    max_svd_iterations: Option<usize>,
    #[serde(rename = "rank-tolerance")]
    rank_tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialMotifEntry {
    path: PathBuf,
    id: Option<String>,
    /// Initial orientation as a `[w, x, y, z]` quaternion.
    orientation: Option<Orientation>,
    #[serde(default)]
    selected: bool,
    #[serde(default)]
    locked: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    landmarks: Option<PartialLandmarkConfig>,
    scoring: Option<PartialScoringConfig>,
    #[serde(default)]
    motifs: Vec<PartialMotifEntry>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Values given on the command line; every `Some` wins over the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub landmark_atom: Option<&'a str>,
    pub polymer: Option<&'a str>,
    pub mode: Option<ScoringMode>,
    pub files: &'a [PathBuf],
}

/// A motif to load, with the state it starts in.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifEntry {
    pub path: PathBuf,
    pub id: Option<String>,
    pub orientation: Option<Orientation>,
    pub selected: bool,
    pub locked: bool,
}

impl MotifEntry {
    fn from_path(path: PathBuf) -> Self {
        Self {
            path,
            id: None,
            orientation: None,
            selected: false,
            locked: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub landmarks: LandmarkSpec,
    pub scoring: core_config::ScoringConfig,
    pub motifs: Vec<MotifEntry>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, overrides: &CliOverrides) -> Result<AppConfig> {
        let landmarks = Self::merge_landmarks(self.landmarks.unwrap_or_default(), overrides)?;
        let scoring = Self::merge_scoring(self.scoring.unwrap_or_default(), overrides)?;

        let base_dir = self.base_dir;
        let mut motifs: Vec<MotifEntry> = self
            .motifs
            .into_iter()
            .map(|entry| MotifEntry {
                path: resolve_relative(base_dir.as_deref(), entry.path),
                id: entry.id,
                orientation: entry.orientation,
                selected: entry.selected,
                locked: entry.locked,
            })
            .collect();
        motifs.extend(overrides.files.iter().cloned().map(MotifEntry::from_path));

        debug!(
            atom = landmarks.atom_name(),
            mode = %scoring.mode,
            motifs = motifs.len(),
            "Configuration merged."
        );
        Ok(AppConfig {
            landmarks,
            scoring,
            motifs,
        })
    }

    fn merge_landmarks(
        file: PartialLandmarkConfig,
        overrides: &CliOverrides,
    ) -> Result<LandmarkSpec> {
        if file.atom.is_some() && file.polymer.is_some() {
            return Err(CliError::Config(
                "`landmarks.atom` and `landmarks.polymer` are mutually exclusive.".to_string(),
            ));
        }

        let spec = if let Some(atom) = overrides.landmark_atom {
            LandmarkSpec::for_atom(atom)
        } else if let Some(polymer) = overrides.polymer {
            LandmarkSpec::for_polymer(polymer)
        } else if let Some(atom) = file.atom.as_deref() {
            LandmarkSpec::for_atom(atom)
        } else if let Some(polymer) = file.polymer.as_deref() {
            LandmarkSpec::for_polymer(polymer)
        } else {
            Ok(LandmarkSpec::default())
        };
        spec.map_err(|e| CliError::Config(e.to_string()))
    }

    fn merge_scoring(
        file: PartialScoringConfig,
        overrides: &CliOverrides,
    ) -> Result<core_config::ScoringConfig> {
        let mut builder = core_config::ScoringConfigBuilder::new();
        if let Some(mode) = overrides.mode.or(file.mode) {
            builder = builder.mode(mode);
        }
        if let Some(epsilon) = file.svd_epsilon {
            builder = builder.svd_epsilon(epsilon);
        }
        if let Some(iterations) = file.max_svd_iterations {
            builder = builder.max_svd_iterations(iterations);
        }
        if let Some(tolerance) = file.rank_tolerance {
            builder = builder.rank_tolerance(tolerance);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

fn resolve_relative(base_dir: Option<&Path>, path: PathBuf) -> PathBuf {
    match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("motifalign.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = PartialAppConfig::load(None)
            .unwrap()
            .merge_with_cli(&CliOverrides::default())
            .unwrap();

        assert_eq!(config.landmarks.atom_name(), "C1'");
        assert_eq!(config.scoring, core_config::ScoringConfig::default());
        assert!(config.motifs.is_empty());
    }

    #[test]
    fn file_values_are_loaded_and_motif_paths_resolved() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [landmarks]
            polymer = "protein"

            [scoring]
            mode = "quick"
            rank-tolerance = 1e-8

            [[motifs]]
            path = "a.json"
            orientation = [0.0, 0.0, 0.0, 1.0]
            selected = true

            [[motifs]]
            path = "/abs/b.json"
            id = "bee"
            locked = true
            "#,
        );

        let config = PartialAppConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&CliOverrides::default())
            .unwrap();

        assert_eq!(config.landmarks.atom_name(), "CA");
        assert_eq!(config.scoring.mode, ScoringMode::Quick);
        assert_eq!(config.scoring.kabsch.rank_tolerance, 1e-8);

        assert_eq!(config.motifs.len(), 2);
        assert_eq!(config.motifs[0].path, dir.path().join("a.json"));
        assert!(config.motifs[0].selected);
        assert_eq!(
            config.motifs[0].orientation.map(|o| o.to_wxyz()),
            Some([0.0, 0.0, 0.0, 1.0])
        );
        assert_eq!(config.motifs[1].path, PathBuf::from("/abs/b.json"));
        assert_eq!(config.motifs[1].id.as_deref(), Some("bee"));
        assert!(config.motifs[1].locked);
    }

    #[test]
    fn cli_values_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [landmarks]
            atom = "P"

            [scoring]
            mode = "quick"
            "#,
        );
        let files = [PathBuf::from("extra.json")];
        let overrides = CliOverrides {
            landmark_atom: Some("C4'"),
            mode: Some(ScoringMode::Kabsch),
            files: &files,
            ..Default::default()
        };

        let config = PartialAppConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&overrides)
            .unwrap();

        assert_eq!(config.landmarks.atom_name(), "C4'");
        assert_eq!(config.scoring.mode, ScoringMode::Kabsch);
        assert_eq!(config.motifs, vec![MotifEntry::from_path(PathBuf::from("extra.json"))]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[scoring]\nwindow = 3\n");
        assert!(matches!(
            PartialAppConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn zero_norm_orientation_is_rejected_at_load_time() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[[motifs]]\npath = \"a.json\"\norientation = [0.0, 0.0, 0.0, 0.0]\n",
        );
        assert!(matches!(
            PartialAppConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn invalid_values_become_config_errors() {
        let dir = tempdir().unwrap();
        let both = write_config(dir.path(), "[landmarks]\natom = \"P\"\npolymer = \"rna\"\n");
        let result = PartialAppConfig::from_file(&both)
            .unwrap()
            .merge_with_cli(&CliOverrides::default());
        assert!(matches!(result, Err(CliError::Config(_))));

        let overrides = CliOverrides {
            polymer: Some("lipid"),
            ..Default::default()
        };
        let result = PartialAppConfig::default().merge_with_cli(&overrides);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("lipid")));

        let negative = write_config(dir.path(), "[scoring]\nsvd-epsilon = -1.0\n");
        let result = PartialAppConfig::from_file(&negative)
            .unwrap()
            .merge_with_cli(&CliOverrides::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
