use super::load_motif;
use crate::cli::AlignArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::ProgressDisplay;
use motifalign::core::models::scores::AlignmentResult;
use motifalign::core::models::structure::StructureHandle;
use motifalign::engine::progress::ProgressReporter;
use motifalign::workflows;
use tracing::info;

pub fn run(args: &AlignArgs, config: &AppConfig) -> Result<()> {
    let reference = load_motif(&args.reference, &config.landmarks)?;
    let moving = load_motif(&args.moving, &config.landmarks)?;

    let progress_display = ProgressDisplay::new();
    let reporter = ProgressReporter::with_callback(progress_display.callback());

    info!("Invoking the alignment workflow...");
    let result = workflows::align::run(&reference, &moving, &config.scoring, &reporter)?;

    println!("{}", render(reference.id(), moving.id(), &result)?);
    Ok(())
}

fn render(reference_id: &str, moving_id: &str, result: &AlignmentResult) -> Result<String> {
    let superposition = result.superposition().map_err(|e| {
        crate::error::CliError::Other(anyhow::anyhow!("Alignment produced an unusable rotation: {}", e))
    })?;
    let [w, x, y, z] = superposition.to_wxyz();
    let rotation = superposition.to_rotation_matrix();

    let mut lines = vec![
        format!("Reference: {reference_id}"),
        format!("Moving:    {moving_id}"),
        format!("Offset:    {}", result.offset),
        format!("RMSD:      {:.6}", result.rmsd),
        format!("Superposing quaternion [w, x, y, z]: [{w:.6}, {x:.6}, {y:.6}, {z:.6}]"),
        "Superposing rotation matrix:".to_string(),
    ];
    lines.extend(rotation.row_iter().map(|row| {
        format!("  [{:>10.6}, {:>10.6}, {:>10.6}]", row[0], row[1], row[2])
    }));
    Ok(lines.join("\n"))
}
