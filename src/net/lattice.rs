//! Layered node stack and the generic feed-forward pass.

use crate::error::{KohonetError, Result};
use crate::net::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of nodes; order carries the grid geometry.
pub type Layer = Vec<Node>;

/// A stack of node layers.
///
/// Layer 0 is the input buffer: weightless nodes whose outputs are set
/// from the caller's vector. Every later layer is computed from the
/// previous layer's outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// The layers, input buffer first.
    pub layers: Vec<Layer>,
}

impl Lattice {
    /// Creates a lattice from pre-built layers.
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Number of nodes in the input layer.
    #[inline]
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.len())
    }

    /// Materializes one layer's outputs in node order.
    pub fn layer_outputs(&self, index: usize) -> Vec<f64> {
        self.layers[index].iter().map(|node| node.output).collect()
    }

    /// Writes raw values into the input layer's outputs, in order.
    pub fn load_input(&mut self, values: &[f64]) -> Result<()> {
        let expected = self.input_size();
        if values.len() != expected {
            return Err(KohonetError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }

        for (node, &value) in self.layers[0].iter_mut().zip(values.iter()) {
            node.output = value;
        }
        Ok(())
    }

    /// Recomputes every non-input layer from the layer below it.
    pub fn forward(&mut self) {
        for index in 1..self.layers.len() {
            let inputs = self.layer_outputs(index - 1);
            for node in &mut self.layers[index] {
                node.activate(&inputs);
            }
        }
    }

    /// Runs the full feed-forward pass on a raw (unnormalized) input.
    pub fn compute(&mut self, input: &[f64]) -> Result<()> {
        self.load_input(input)?;
        self.forward();
        Ok(())
    }

    /// The final layer's output vector.
    pub fn result(&self) -> Vec<f64> {
        match self.layers.last() {
            Some(layer) => layer.iter().map(|node| node.output).collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, layer) in self.layers.iter().enumerate() {
            writeln!(f, "layer {}:", index)?;
            for node in layer {
                writeln!(f, "  {}", node)?;
            }
        }
        Ok(())
    }
}
