use super::orientation::{Orientation, OrientationError};
use nalgebra::{DMatrix, Matrix3};
use serde::Serialize;

/// Outcome of a fitted sliding-window alignment between two structures.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Kabsch rotation `R` with `R * short ≈ window` for the winning window.
    pub rotation: Matrix3<f64>,
    pub rmsd: f64,
    /// Start of the winning window within the longer landmark sequence.
    pub offset: usize,
}

impl AlignmentResult {
    /// The rotation that superposes the window onto the shorter sequence (`Rᵀ`).
    pub fn superposition(&self) -> Result<Orientation, OrientationError> {
        Orientation::from_rotation_matrix(&self.rotation.transpose())
    }
}

/// One directed comparison: `subject_id` scored against `reference_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub subject_id: String,
    pub reference_id: String,
    pub score: f64,
}

/// Square, symmetric, zero-diagonal table of pairwise scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    ids: Vec<String>,
    values: DMatrix<f64>,
}

impl SimilarityMatrix {
    pub fn zeros(ids: Vec<String>) -> Self {
        let n = ids.len();
        Self {
            ids,
            values: DMatrix::zeros(n, n),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.len() && j < self.len()).then(|| self.values[(i, j)])
    }

    pub fn get_by_id(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.get(i, j)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    /// Writes `score` at `(i, j)` and `(j, i)`. Diagonal writes are ignored.
    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, score: f64) {
        if i == j {
            return;
        }
        self.values[(i, j)] = score;
        self.values[(j, i)] = score;
    }

    /// Scores of structure `i` against every structure, or `None` when `i` is out of range.
    pub fn row(&self, i: usize) -> Option<impl Iterator<Item = f64> + '_> {
        (i < self.len()).then(|| (0..self.len()).map(move |j| self.values[(i, j)]))
    }
}
