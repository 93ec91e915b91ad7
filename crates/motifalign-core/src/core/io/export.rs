use crate::core::models::scores::{PairScore, SimilarityMatrix};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes the matrix as CSV: an `id` header followed by one column per structure,
/// then one row per structure.
pub fn write_matrix_csv(matrix: &SimilarityMatrix, writer: impl Write) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let header = std::iter::once("id").chain(matrix.ids().iter().map(String::as_str));
    csv_writer.write_record(header)?;

    for (i, id) in matrix.ids().iter().enumerate() {
        let mut record = Vec::with_capacity(matrix.len() + 1);
        record.push(id.clone());
        record.extend(matrix.row(i).into_iter().flatten().map(|value| format!("{:.6}", value)));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_matrix_csv_to_path<P: AsRef<Path>>(
    matrix: &SimilarityMatrix,
    path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_matrix_csv(matrix, io::BufWriter::new(file))
}

/// Writes `subject_id,reference_id,score` records, one per directed comparison.
pub fn write_pair_scores_csv<'a>(
    scores: impl IntoIterator<Item = &'a PairScore>,
    writer: impl Write,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for score in scores {
        csv_writer.serialize(score)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_pair_scores_csv_to_path<'a, P: AsRef<Path>>(
    scores: impl IntoIterator<Item = &'a PairScore>,
    path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_pair_scores_csv(scores, io::BufWriter::new(file))
}
