use crate::core::models::scores::PairScore;
use crate::core::models::structure::StructureHandle;
use crate::engine::error::EngineError;
use crate::engine::tasks::sliding_window::sliding_window_rmsd;
use crate::engine::utils::landmarks::oriented_landmarks;
use nalgebra::Point3;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Quick scores of each selected structure against every other structure in `all`.
///
/// One list per selected structure, in selection order, scoring it against the
/// members of `all` in their order. A structure is never scored against itself
/// (same id), and selected structures left without partners produce no list.
/// Every structure is rotated into its displayed orientation exactly once.
#[instrument(skip_all, name = "quick_scores_workflow", fields(selected = selected.len(), all = all.len()))]
pub fn quick_scores<A, B>(selected: &[A], all: &[B]) -> Result<Vec<Vec<PairScore>>, EngineError>
where
    A: StructureHandle + Sync,
    B: StructureHandle + Sync,
{
    let oriented_all = all
        .iter()
        .map(oriented_landmarks)
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let iterator = selected.iter();

    #[cfg(feature = "parallel")]
    let iterator = selected.par_iter();

    let lists = iterator
        .map(|subject| score_subject(subject, all, &oriented_all))
        .collect::<Result<Vec<_>, _>>()?;

    let lists: Vec<Vec<PairScore>> = lists.into_iter().filter(|list| !list.is_empty()).collect();
    debug!(lists = lists.len(), "Quick scores computed.");
    Ok(lists)
}

fn score_subject<A, B>(
    subject: &A,
    all: &[B],
    oriented_all: &[Vec<Point3<f64>>],
) -> Result<Vec<PairScore>, EngineError>
where
    A: StructureHandle,
    B: StructureHandle,
{
    let subject_points = match all.iter().position(|s| s.id() == subject.id()) {
        Some(index) => oriented_all[index].clone(),
        None => oriented_landmarks(subject)?,
    };

    all.iter()
        .zip(oriented_all)
        .filter(|(reference, _)| reference.id() != subject.id())
        .map(|(reference, reference_points)| {
            sliding_window_rmsd(&subject_points, reference_points)
                .map(|score| PairScore {
                    subject_id: subject.id().to_string(),
                    reference_id: reference.id().to_string(),
                    score,
                })
                .map_err(|e| EngineError::alignment(reference.id(), subject.id(), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::orientation::Orientation;
    use crate::core::models::structure::Structure;
    use crate::engine::tasks::quick_score::quick_score;
    use nalgebra::Vector3;

    fn motif(shift: f64) -> Vec<Point3<f64>> {
        vec![
            Point3::new(1.0 + shift, 0.0, 0.0),
            Point3::new(0.0, 2.0 + shift, 0.0),
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(1.0, 1.0, 1.0 + shift),
        ]
    }

    fn collection() -> Vec<Structure> {
        vec![
            Structure::new("a", motif(0.0)),
            Structure::new("b", motif(0.5))
                .with_orientation(Orientation::from_axis_angle(&Vector3::x(), 0.3).unwrap()),
            Structure::new("c", motif(1.0)),
        ]
    }

    #[test]
    fn each_selected_structure_is_scored_against_all_others() {
        let all = collection();
        let selected = vec![&all[0], &all[2]];

        let lists = quick_scores(&selected, &all).unwrap();

        assert_eq!(lists.len(), 2);
        let first: Vec<_> = lists[0].iter().map(|s| s.reference_id.as_str()).collect();
        let second: Vec<_> = lists[1].iter().map(|s| s.reference_id.as_str()).collect();
        assert_eq!(first, ["b", "c"]);
        assert_eq!(second, ["a", "b"]);
        assert!(lists[0].iter().all(|s| s.subject_id == "a"));
    }

    #[test]
    fn scores_match_pairwise_quick_score() {
        let all = collection();
        let lists = quick_scores(&all[1..2], &all).unwrap();
        for entry in &lists[0] {
            let reference = all.iter().find(|s| s.id() == entry.reference_id).unwrap();
            assert_eq!(entry.score, quick_score(&all[1], reference).unwrap());
        }
    }

    #[test]
    fn lone_selected_structure_produces_no_list() {
        let all = vec![Structure::new("solo", motif(0.0))];
        assert!(quick_scores(&all, &all).unwrap().is_empty());
    }

    #[test]
    fn empty_selection_produces_no_lists() {
        let all = collection();
        let selected: Vec<Structure> = Vec::new();
        assert!(quick_scores(&selected, &all).unwrap().is_empty());
    }

    #[test]
    fn selected_structure_outside_collection_is_still_scored() {
        let all = collection();
        let outsider = vec![Structure::new("z", motif(0.0))];
        let lists = quick_scores(&outsider, &all).unwrap();
        assert_eq!(lists[0].len(), 3);
        assert!(lists[0][0].score < 1e-12);
    }
}
