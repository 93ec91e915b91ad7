use super::load_all;
use crate::cli::QuickArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use motifalign::core::io::export::{write_pair_scores_csv, write_pair_scores_csv_to_path};
use motifalign::core::models::scores::PairScore;
use motifalign::core::models::structure::StructureHandle;
use motifalign::workflows::session::{Interaction, InteractionOutcome, Session};
use tracing::{info, warn};

pub fn run(args: &QuickArgs, config: &AppConfig) -> Result<()> {
    let session = build_session(args, config)?;

    let scores: Vec<&PairScore> = session.quick_scores().iter().flatten().collect();
    if scores.is_empty() {
        warn!("No quick scores to report: select at least one motif with partners.");
        println!("Warning: nothing selected, no scores computed.");
        return Ok(());
    }

    match &args.output {
        Some(path) => {
            write_pair_scores_csv_to_path(scores, path).map_err(|source| CliError::Export {
                path: path.clone(),
                source,
            })?;
            println!("✓ Quick scores written to: {}", path.display());
        }
        None => {
            write_pair_scores_csv(scores, std::io::stdout().lock()).map_err(|source| {
                CliError::Export {
                    path: "<stdout>".into(),
                    source,
                }
            })?;
        }
    }
    Ok(())
}

/// Loads the motifs into a session, applies the requested selection, then the
/// requested rotations in order.
fn build_session(args: &QuickArgs, config: &AppConfig) -> Result<Session> {
    let mut session = Session::new();
    let mut to_select = Vec::new();

    for motif in load_all(config)? {
        let id = motif.structure.id().to_string();
        let key = session.add(motif.structure, motif.locked)?;
        if motif.selected || args.select.contains(&id) {
            to_select.push(key);
        }
    }

    for id in &args.select {
        if session.key_of(id).is_none() {
            return Err(CliError::Argument(format!(
                "Cannot select '{}': no loaded motif has this id.",
                id
            )));
        }
    }

    for key in to_select {
        let outcome = session.apply(Interaction::Select {
            key,
            multi_select: true,
        })?;
        if outcome == InteractionOutcome::Ignored {
            warn!("Motif {:?} is locked and cannot be selected.", key);
        }
    }

    for rotation in &args.rotate {
        info!(
            "Rotating selection by {} degrees about {:?}.",
            rotation.degrees, rotation.axis
        );
        session.apply(Interaction::Rotate {
            axis: rotation.axis,
            angle: rotation.radians(),
        })?;
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{MOTIF, write_motif};
    use crate::config::{CliOverrides, PartialAppConfig};
    use crate::utils::parser::parse_rotation;
    use tempfile::tempdir;

    fn config_for(files: &[std::path::PathBuf]) -> AppConfig {
        PartialAppConfig::default()
            .merge_with_cli(&CliOverrides {
                files,
                ..Default::default()
            })
            .unwrap()
    }

    fn args(select: &[&str], rotate: &[&str]) -> QuickArgs {
        QuickArgs {
            files: Vec::new(),
            select: select.iter().map(|s| s.to_string()).collect(),
            rotate: rotate.iter().map(|r| parse_rotation(r).unwrap()).collect(),
            output: None,
        }
    }

    #[test]
    fn selected_motif_is_rotated_and_rescored() {
        let dir = tempdir().unwrap();
        let files = vec![
            write_motif(dir.path(), "a", &MOTIF),
            write_motif(dir.path(), "b", &MOTIF),
        ];
        let config = config_for(&files);

        let unrotated = build_session(&args(&["b"], &[]), &config).unwrap();
        assert!(unrotated.quick_scores()[0][0].score < 1e-12);

        let rotated = build_session(&args(&["b"], &["z:90"]), &config).unwrap();
        let scores = rotated.quick_scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0][0].subject_id, "b");
        assert_eq!(scores[0][0].reference_id, "a");
        assert!(scores[0][0].score > 0.5);

        let back = build_session(&args(&["b"], &["z:90", "z:-90"]), &config).unwrap();
        assert!(back.quick_scores()[0][0].score < 1e-9);
    }

    #[test]
    fn unknown_selection_is_an_argument_error() {
        let dir = tempdir().unwrap();
        let files = vec![write_motif(dir.path(), "a", &MOTIF)];
        let result = build_session(&args(&["nope"], &[]), &config_for(&files));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn locked_motifs_are_not_selected() {
        let dir = tempdir().unwrap();
        let files = vec![
            write_motif(dir.path(), "a", &MOTIF),
            write_motif(dir.path(), "b", &MOTIF),
        ];
        let mut config = config_for(&files);
        config.motifs[0].locked = true;

        let session = build_session(&args(&["a"], &["x:45"]), &config).unwrap();
        assert!(session.quick_scores().is_empty());
        let (_, first) = session.structures().next().unwrap();
        assert_eq!(first.id(), "a");
        assert!(first.orientation().angle_to(&Default::default()) < 1e-12);
    }
}
