use super::load_all;
use crate::cli::MatrixArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::ProgressDisplay;
use motifalign::core::io::export::{write_matrix_csv, write_matrix_csv_to_path};
use motifalign::core::models::scores::SimilarityMatrix;
use motifalign::engine::progress::ProgressReporter;
use motifalign::workflows;
use std::path::Path;
use tracing::info;

pub fn run(args: &MatrixArgs, config: &AppConfig) -> Result<()> {
    let structures: Vec<_> = load_all(config)?
        .into_iter()
        .map(|motif| motif.structure)
        .collect();

    let progress_display = ProgressDisplay::new();
    let reporter = ProgressReporter::with_callback(progress_display.callback());

    info!(
        "Invoking the scoring workflow on {} motif(s)...",
        structures.len()
    );
    let matrix = workflows::score::run(&structures, &config.scoring, &reporter)?;

    write_matrix(&matrix, args.output.as_deref())
}

fn write_matrix(matrix: &SimilarityMatrix, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_matrix_csv_to_path(matrix, path).map_err(|source| CliError::Export {
                path: path.to_path_buf(),
                source,
            })?;
            println!("✓ Similarity matrix written to: {}", path.display());
        }
        None => {
            write_matrix_csv(matrix, std::io::stdout().lock()).map_err(|source| {
                CliError::Export {
                    path: "<stdout>".into(),
                    source,
                }
            })?;
        }
    }
    Ok(())
}
