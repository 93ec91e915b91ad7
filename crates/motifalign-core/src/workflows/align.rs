use crate::core::models::scores::AlignmentResult;
use crate::core::models::structure::StructureHandle;
use crate::engine::config::ScoringConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::kabsch_window::kabsch_sliding_window_with_config;
use tracing::{info, instrument};

/// Aligns `moving` onto `reference` with the Kabsch sliding window.
///
/// The scoring mode of `config` is ignored: a single alignment always fits.
#[instrument(skip_all, name = "align_workflow")]
pub fn run<R, M>(
    reference: &R,
    moving: &M,
    config: &ScoringConfig,
    reporter: &ProgressReporter,
) -> Result<AlignmentResult, EngineError>
where
    R: StructureHandle + ?Sized,
    M: StructureHandle + ?Sized,
{
    reporter.report(Progress::PhaseStart { name: "Alignment" });
    info!(
        "Aligning '{}' ({} landmarks) onto '{}' ({} landmarks).",
        moving.id(),
        moving.landmarks().len(),
        reference.id(),
        reference.landmarks().len()
    );

    let result = kabsch_sliding_window_with_config(reference, moving, &config.kabsch)?;

    info!(
        offset = result.offset,
        rmsd = result.rmsd,
        "Alignment complete."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(result)
}
