//! Batch determinant computation over binary matrix files
//!
//! Each file holds a header (`i32` count, `i32` order) followed by square
//! matrices of `f64` in row-major order. Matrices of a file are spread over
//! the generic parallel pool and reported back in file order.

pub mod determinant;
pub mod reader;

pub use determinant::SquareMatrix;
pub use reader::{MatrixFile, read_matrix_file};

use anyhow::Result;
use std::path::PathBuf;

use crate::error::MatrixError;
use crate::parallel::{ParallelConfig, ParallelProcessor};

/// Determinants computed for one file
#[derive(Debug, Clone)]
pub struct FileDeterminants {
    pub path: PathBuf,
    pub declared_count: i32,
    pub order: usize,
    pub determinants: Vec<f64>,
}

/// Per-file outcome; unusable files carry the reason they were skipped
pub type DeterminantOutcome = std::result::Result<FileDeterminants, MatrixError>;

/// Compute determinants for every file, in input order.
pub fn determinants_for_files(paths: &[PathBuf], config: &ParallelConfig) -> Result<Vec<DeterminantOutcome>> {
    let processor = ParallelProcessor::new(config.clone());
    let mut outcomes = Vec::with_capacity(paths.len());

    for path in paths {
        let file = match read_matrix_file(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Skipping matrix file: {}", e);
                outcomes.push(Err(e));
                continue;
            }
        };

        tracing::debug!(
            "{}: {} matrices of order {}",
            path.display(),
            file.matrices.len(),
            file.order
        );

        let determinants = processor.process(file.matrices, |m| Ok(m.determinant()), "determinants")?;

        outcomes.push(Ok(FileDeterminants {
            path: file.path,
            declared_count: file.declared_count,
            order: file.order,
            determinants,
        }));
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::reader::tests::encode;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_outcomes_in_input_order() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.bin");
        let missing = dir.path().join("missing.bin");

        let mut values = Vec::new();
        for k in 1..=20 {
            values.extend_from_slice(&[k as f64, 0.0, 0.0, 1.0]);
        }
        fs::write(&good, encode(20, 2, &values)).unwrap();

        let config = ParallelConfig {
            threads: 4,
            ..Default::default()
        };
        let outcomes = determinants_for_files(&[missing, good.clone()], &config).unwrap();

        assert!(matches!(outcomes[0], Err(MatrixError::Open { .. })));
        let file = outcomes[1].as_ref().unwrap();
        assert_eq!(file.path, good);
        assert_eq!(file.determinants.len(), 20);
        for (i, det) in file.determinants.iter().enumerate() {
            assert_eq!(*det, (i + 1) as f64);
        }
    }
}
