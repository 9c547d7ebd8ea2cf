//! Activation functions for lattice nodes.

use serde::{Deserialize, Serialize};

/// Activation function applied to a node's weighted sum.
///
/// A node without an activation function passes the raw weighted sum
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Threshold step: 0 at or below zero, else 1.
    Step,
    /// Logistic sigmoid: 1 / (1 + e^-x).
    Logistic,
}

impl Activation {
    /// Applies the activation function to a value.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Step => {
                if x <= 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Activation::Logistic => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Parses a selector token from the network text format.
    ///
    /// `step` and `log` select a function; anything else selects none.
    pub fn from_token(token: &str) -> Option<Activation> {
        match token {
            "step" => Some(Activation::Step),
            "log" => Some(Activation::Logistic),
            _ => None,
        }
    }

    /// The selector token this function is written as.
    pub fn token(&self) -> &'static str {
        match self {
            Activation::Step => "step",
            Activation::Logistic => "log",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        assert_eq!(Activation::Step.apply(-1.5), 0.0);
        assert_eq!(Activation::Step.apply(0.0), 0.0);
        assert_eq!(Activation::Step.apply(0.001), 1.0);
    }

    #[test]
    fn test_logistic() {
        let mid = Activation::Logistic.apply(0.0);
        assert!((mid - 0.5).abs() < 1e-10);

        // Saturates towards 0 and 1
        assert!(Activation::Logistic.apply(-10.0) < 0.001);
        assert!(Activation::Logistic.apply(10.0) > 0.999);
    }

    #[test]
    fn test_logistic_symmetry() {
        let a = Activation::Logistic.apply(2.0);
        let b = Activation::Logistic.apply(-2.0);
        assert!((a + b - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_token_parsing() {
        assert_eq!(Activation::from_token("step"), Some(Activation::Step));
        assert_eq!(Activation::from_token("log"), Some(Activation::Logistic));
        assert_eq!(Activation::from_token("tanh"), None);
        assert_eq!(Activation::from_token(""), None);
    }

    #[test]
    fn test_token_roundtrip() {
        for f in [Activation::Step, Activation::Logistic] {
            assert_eq!(Activation::from_token(f.token()), Some(f));
        }
    }
}
