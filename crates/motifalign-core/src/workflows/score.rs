use crate::core::models::scores::SimilarityMatrix;
use crate::core::models::structure::StructureHandle;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::pairwise;
use tracing::{info, instrument};

/// All-pairs Kabsch similarity matrix with default settings.
pub fn score_all<S>(structures: &[S]) -> Result<SimilarityMatrix, EngineError>
where
    S: StructureHandle + Sync,
{
    run(structures, &ScoringConfig::default(), &ProgressReporter::new())
}

/// Builds the symmetric, zero-diagonal similarity matrix of `structures` in the
/// configured scoring mode. Each unordered pair is scored exactly once.
#[instrument(skip_all, name = "score_workflow")]
pub fn run<S>(
    structures: &[S],
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> Result<SimilarityMatrix, EngineError>
where
    S: StructureHandle + Sync,
{
    reporter.report(Progress::PhaseStart {
        name: "Pairwise Scoring",
    });
    info!(
        "Scoring {} structure(s) in {} mode.",
        structures.len(),
        config.mode
    );

    let ids = structures.iter().map(|s| s.id().to_string()).collect();
    let mut matrix = SimilarityMatrix::zeros(ids);

    for pair in pairwise::run(structures, config, reporter)? {
        matrix.set_symmetric(pair.i, pair.j, pair.score);
    }

    reporter.report(Progress::PhaseFinish);
    info!("Similarity matrix complete.");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::orientation::Orientation;
    use crate::core::models::structure::Structure;
    use crate::engine::config::{ScoringConfigBuilder, ScoringMode};
    use nalgebra::{Point3, Vector3};
    use std::sync::Mutex;

    fn motif() -> Vec<Point3<f64>> {
        vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-2.0, 0.5, 1.5),
        ]
    }

    fn different_motif() -> Vec<Point3<f64>> {
        vec![
            Point3::new(4.0, -1.0, 2.0),
            Point3::new(-3.0, 3.0, 0.5),
            Point3::new(0.5, -4.0, -2.0),
            Point3::new(2.0, 2.0, -3.0),
            Point3::new(-1.0, -1.5, 4.0),
        ]
    }

    fn assert_symmetric_with_zero_diagonal(matrix: &SimilarityMatrix) {
        for i in 0..matrix.len() {
            assert_eq!(matrix.get(i, i), Some(0.0));
            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn identical_structures_score_zero_and_different_ones_do_not() {
        let structures = vec![
            Structure::new("one", motif()),
            Structure::new("two", motif()),
            Structure::new("three", different_motif()),
        ];

        let matrix = score_all(&structures).unwrap();

        assert_eq!(matrix.ids(), ["one", "two", "three"]);
        assert!(matrix.get_by_id("one", "two").unwrap() < 1e-9);
        assert!(matrix.get_by_id("one", "three").unwrap() > 0.1);
        assert!(matrix.get_by_id("two", "three").unwrap() > 0.1);
        assert_symmetric_with_zero_diagonal(&matrix);
    }

    #[test]
    fn matrix_shape_holds_for_small_collections() {
        let none: Vec<Structure> = Vec::new();
        assert!(score_all(&none).unwrap().is_empty());

        let single = vec![Structure::new("only", motif())];
        let matrix = score_all(&single).unwrap();
        assert_eq!(matrix.len(), 1);
        assert_symmetric_with_zero_diagonal(&matrix);
    }

    #[test]
    fn quick_mode_respects_displayed_orientation() {
        let turned = Orientation::from_axis_angle(&Vector3::y(), 1.0).unwrap();
        let structures = vec![
            Structure::new("a", motif()),
            Structure::new("b", motif()).with_orientation(turned),
        ];

        let quick = ScoringConfigBuilder::new().mode(ScoringMode::Quick).build().unwrap();
        let quick_matrix = run(&structures, &quick, &ProgressReporter::new()).unwrap();
        let kabsch_matrix = score_all(&structures).unwrap();

        assert!(quick_matrix.get(0, 1).unwrap() > 0.5);
        assert!(kabsch_matrix.get(0, 1).unwrap() < 1e-7);
    }

    #[test]
    fn failing_pair_reports_both_ids() {
        let structures = vec![
            Structure::new("full", motif()),
            Structure::new("empty", Vec::new()),
        ];
        let err = score_all(&structures).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("full") && text.contains("empty"));
    }

    #[test]
    fn progress_counts_one_increment_per_pair() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let structures = vec![
            Structure::new("a", motif()),
            Structure::new("b", motif()),
            Structure::new("c", different_motif()),
            Structure::new("d", different_motif()),
        ];

        run(&structures, &ScoringConfig::default(), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let increments = events.iter().filter(|e| **e == Progress::TaskIncrement).count();
        assert_eq!(increments, 6);
        assert!(events.contains(&Progress::TaskStart { total_steps: 6 }));
        assert_eq!(events.last(), Some(&Progress::PhaseFinish));
    }
}
