use super::kabsch_window::best_fit;
use super::sliding_window::sliding_window_rmsd;
use crate::core::models::structure::StructureHandle;
use crate::engine::config::{ScoringConfig, ScoringMode};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::utils::landmarks::{oriented_landmarks, pair_indices};
use nalgebra::Point3;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub(crate) struct PairResult {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// Scores every unordered pair `i < j` of `structures` once.
///
/// Landmarks are oriented once per structure up front. Results come back in
/// row-major pair order whether or not the pairs were scored in parallel.
#[instrument(skip_all, name = "pairwise_scoring_task", fields(mode = %config.mode, structures = structures.len()))]
pub(crate) fn run<S>(
    structures: &[S],
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PairResult>, EngineError>
where
    S: StructureHandle + Sync,
{
    let oriented = structures
        .iter()
        .map(oriented_landmarks)
        .collect::<Result<Vec<_>, _>>()?;

    let pairs = pair_indices(structures.len());
    info!(pairs = pairs.len(), "Scoring structure pairs.");
    reporter.report(Progress::TaskStart {
        total_steps: pairs.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let results: Vec<Result<PairResult, EngineError>> = iterator
        .map(|&(i, j)| {
            let score = score_pair(&oriented[i], &oriented[j], config).map_err(|e| {
                EngineError::alignment(structures[i].id(), structures[j].id(), e)
            });
            reporter.report(Progress::TaskIncrement);
            score.map(|score| PairResult { i, j, score })
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    results.into_iter().collect()
}

fn score_pair(
    a: &[Point3<f64>],
    b: &[Point3<f64>],
    config: &ScoringConfig,
) -> Result<f64, EngineError> {
    match config.mode {
        ScoringMode::Quick => sliding_window_rmsd(a, b),
        ScoringMode::Kabsch => best_fit(a, b, &config.kabsch).map(|result| result.rmsd),
    }
}
