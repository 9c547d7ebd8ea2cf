//! Distance metric for winner selection.

use crate::error::{KohonetError, Result};

/// Computes the Euclidean distance between two vectors.
///
/// Vectors of different lengths are rejected.
pub fn euclidean(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(KohonetError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }

    let sum: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum();

    Ok(sum.sqrt())
}
