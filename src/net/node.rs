//! Node representation shared by the feed-forward stack and the map.

use crate::net::Activation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A computational node in the lattice.
///
/// Nodes are plain data: one weight per incoming connection, a bias, the
/// last-computed output, and the layer the node sits in. Map-layer nodes
/// additionally carry a conscience score once an engine takes ownership
/// of the lattice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// One weight per incoming connection.
    pub weights: Vec<f64>,
    /// Subtracted from the weighted sum before activation.
    pub bias: f64,
    /// Last-computed activation; overwritten each computation pass.
    pub output: f64,
    /// Fairness score, present on map-layer nodes only.
    pub conscience: Option<f64>,
    /// Index of the layer this node belongs to.
    pub layer: usize,
    /// Activation function; `None` passes the weighted sum through.
    pub activation: Option<Activation>,
}

impl Node {
    /// Creates a node with the given incoming weights.
    pub fn new(layer: usize, weights: Vec<f64>, bias: f64, activation: Option<Activation>) -> Self {
        Self {
            weights,
            bias,
            output: 0.0,
            conscience: None,
            layer,
            activation,
        }
    }

    /// Creates a weightless input-layer node.
    pub fn input() -> Self {
        Self::new(0, Vec::new(), 0.0, None)
    }

    /// Computes the weighted sum of the previous layer's outputs minus
    /// the bias.
    ///
    /// Pairs weights with inputs up to the weight length, so an input
    /// slice longer than the weight vector contributes only its prefix.
    #[inline]
    pub fn weighted_sum(&self, inputs: &[f64]) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .zip(inputs.iter())
            .map(|(w, x)| w * x)
            .sum();
        dot - self.bias
    }

    /// Recomputes this node's output from the previous layer's outputs.
    pub fn activate(&mut self, inputs: &[f64]) {
        let sum = self.weighted_sum(inputs);
        self.output = match self.activation {
            Some(f) => f.apply(sum),
            None => sum,
        };
    }

    /// Moves the weight vector towards a target vector.
    ///
    /// `learning_rate` is the current learning rate and `proximity` the
    /// neighborhood influence (1.0 for the winner, the inverse grid
    /// distance for neighbors).
    pub fn update_weights(&mut self, target: &[f64], learning_rate: f64, proximity: f64) {
        let influence = learning_rate * proximity;

        for (w, t) in self.weights.iter_mut().zip(target.iter()) {
            *w += influence * (t - *w);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "w: {:?}, bias: {}, output: {}",
            self.weights, self.bias, self.output
        )
    }
}
