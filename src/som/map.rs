//! The self-organizing map engine.

use log::{debug, info};

use crate::config::MapConfig;
use crate::error::{KohonetError, Result};
use crate::metric::euclidean;
use crate::net::Lattice;
use crate::som::Neighborhood;

/// How the engine selects the winning node for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerPolicy {
    /// Every map node competes on distance alone.
    Nearest,
    /// Only nodes whose conscience exceeds the threshold may compete.
    Conscience,
}

/// A self-organizing map driving a two-layer lattice.
///
/// The first lattice layer holds the current (normalized) input; the
/// second layer is the competitive map whose node weights migrate toward
/// the training vectors. Training is online: vectors are presented one
/// at a time and each presentation updates the map immediately.
#[derive(Debug, Clone)]
pub struct KohonenMap {
    lattice: Lattice,
    /// Neighborhood reach around each winner, in grid steps; fixed for
    /// the run.
    pub radius: usize,
    /// Current learning rate; annealed after every training pass.
    pub learning_rate: f64,
    /// Learning rate at step zero; the annealing anchor.
    pub max_learning_rate: f64,
    /// Winner selection mode.
    pub policy: WinnerPolicy,
    /// Conscience level below which a node may not win.
    pub conscience_threshold: f64,
    /// Grid geometry for neighbor lookup.
    pub neighborhood: Neighborhood,
}

impl KohonenMap {
    /// Wraps a lattice in a map engine.
    ///
    /// The lattice must carry an input layer and a non-empty map layer,
    /// every map node's weight vector must match the input layer's size,
    /// and a grid neighborhood requires a square map. Each map node's
    /// conscience starts full.
    pub fn new(mut lattice: Lattice, config: &MapConfig) -> Result<Self> {
        if lattice.layers.len() < 2 {
            return Err(KohonetError::Lattice(format!(
                "map lattice needs an input layer and a map layer, got {} layer(s)",
                lattice.layers.len()
            )));
        }

        let input_size = lattice.input_size();
        let map_size = lattice.layers[1].len();
        if map_size == 0 {
            return Err(KohonetError::Lattice("map layer is empty".to_string()));
        }
        for node in &lattice.layers[1] {
            if node.weights.len() != input_size {
                return Err(KohonetError::DimensionMismatch {
                    expected: input_size,
                    actual: node.weights.len(),
                });
            }
        }
        config.neighborhood.validate(map_size)?;

        for node in &mut lattice.layers[1] {
            node.conscience = Some(1.0);
        }

        let policy = if config.conscience {
            WinnerPolicy::Conscience
        } else {
            WinnerPolicy::Nearest
        };

        info!(
            "created {}x{} kohonen map (radius {}, rate {}, {:?} winners)",
            input_size, map_size, config.radius, config.learning_rate, policy
        );

        Ok(Self {
            lattice,
            radius: config.radius,
            learning_rate: config.learning_rate,
            max_learning_rate: config.learning_rate,
            policy,
            conscience_threshold: config.conscience_threshold,
            neighborhood: config.neighborhood,
        })
    }

    /// Read access to the underlying lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of nodes in the map layer.
    pub fn map_size(&self) -> usize {
        self.lattice.layers[1].len()
    }

    /// Normalizes a vector and loads it into the input layer.
    ///
    /// Each component is divided by the vector's sum of squares. The sum
    /// itself (not its square root) is the divisor, so the output is not
    /// unit length; it is the scaling the training dynamics expect. An
    /// all-zero vector has no such scaling and is rejected.
    pub fn set_input(&mut self, input: &[f64]) -> Result<()> {
        let expected = self.lattice.input_size();
        if input.len() != expected {
            return Err(KohonetError::DimensionMismatch {
                expected,
                actual: input.len(),
            });
        }

        let sum_sq: f64 = input.iter().map(|v| v * v).sum();
        if sum_sq == 0.0 {
            return Err(KohonetError::DegenerateInput);
        }

        let normalized: Vec<f64> = input.iter().map(|v| v / sum_sq).collect();
        self.lattice.load_input(&normalized)
    }

    /// Finds the map node closest to the current input.
    ///
    /// Under the conscience policy only nodes above the threshold compete;
    /// if that disqualifies every node the map is starved and an error is
    /// returned. Ties go to the lowest index.
    pub fn winner(&self) -> Result<usize> {
        let input = self.lattice.layer_outputs(0);

        let mut best: Option<(usize, f64)> = None;
        for (index, node) in self.lattice.layers[1].iter().enumerate() {
            if self.policy == WinnerPolicy::Conscience {
                let conscience = node.conscience.unwrap_or(0.0);
                if conscience <= self.conscience_threshold {
                    continue;
                }
            }
            let distance = euclidean(&node.weights, &input)?;
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }

        best.map(|(index, _)| index).ok_or(KohonetError::NoCandidates)
    }

    /// Applies the fairness bookkeeping after a win.
    ///
    /// The winner pays the threshold out of its conscience; every other
    /// node recovers by 1/map_size, saturating at full conscience.
    fn update_conscience(&mut self, winner: usize) {
        let recovery = 1.0 / self.map_size() as f64;
        for (index, node) in self.lattice.layers[1].iter_mut().enumerate() {
            let level = node.conscience.unwrap_or(1.0);
            let next = if index == winner {
                level - self.conscience_threshold
            } else {
                (level + recovery).min(1.0)
            };
            node.conscience = Some(next);
        }
    }

    /// Pulls the winner and its neighbors toward the current input.
    fn update_weights(&mut self, winner: usize) -> Result<()> {
        let target = self.lattice.layer_outputs(0);
        let neighbors =
            self.neighborhood
                .neighbors(winner, self.map_size(), self.radius)?;

        self.lattice.layers[1][winner].update_weights(&target, self.learning_rate, 1.0);
        for (index, grid_distance) in neighbors {
            let proximity = 1.0 / grid_distance as f64;
            self.lattice.layers[1][index].update_weights(&target, self.learning_rate, proximity);
        }
        Ok(())
    }

    /// Learning rate after `step` of `total_steps` annealing steps.
    ///
    /// The rate falls from the configured maximum along a square-root
    /// curve and reaches exactly zero at the final step.
    pub fn annealed_rate(&self, step: usize, total_steps: usize) -> f64 {
        let progress = (step as f64 / total_steps as f64).sqrt();
        self.max_learning_rate - self.max_learning_rate * progress
    }

    /// Presents one round of training vectors to the map.
    ///
    /// Vectors are processed strictly in order: normalize, pick the
    /// winner, settle consciences, move weights. After the round the
    /// learning rate is annealed to `annealed_rate(step, total_steps)`,
    /// so callers count steps from 1 and the rate hits zero on the last.
    pub fn train(
        &mut self,
        step: usize,
        total_steps: usize,
        training_set: &[Vec<f64>],
    ) -> Result<()> {
        if total_steps == 0 || step > total_steps {
            return Err(KohonetError::Schedule { step, total_steps });
        }

        for vector in training_set {
            self.set_input(vector)?;
            let winner = self.winner()?;
            self.update_conscience(winner);
            self.update_weights(winner)?;
        }

        self.learning_rate = self.annealed_rate(step, total_steps);
        debug!(
            "training step {}/{} done, learning rate now {:.6}",
            step, total_steps, self.learning_rate
        );
        Ok(())
    }

    /// Runs a vector through the lattice and returns the map response.
    ///
    /// Inference only reads the learned weights; no conscience or weight
    /// state changes, so repeated calls with the same vector agree.
    pub fn infer(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.set_input(input)?;
        self.lattice.forward();
        Ok(self.lattice.result())
    }

    /// Output of the map layer from the most recent computation.
    pub fn result(&self) -> Vec<f64> {
        self.lattice.result()
    }

    /// Index of the strongest map response, if any.
    ///
    /// Ties go to the first occurrence.
    pub fn best_match(&self) -> Option<usize> {
        let outputs = self.result();
        let mut best: Option<(usize, f64)> = None;
        for (index, value) in outputs.into_iter().enumerate() {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((index, value)),
            }
        }
        best.map(|(index, _)| index)
    }
}
