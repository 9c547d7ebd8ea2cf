//! Configuration for the map engine.

use serde::{Deserialize, Serialize};

use crate::som::Neighborhood;

/// Hyperparameters for a Kohonen map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Neighborhood reach around a winner, in grid steps. The reach stays
    /// fixed for the whole run; only the learning rate decays.
    /// Default: 1.
    pub radius: usize,

    /// Learning rate at step zero; annealing works down from here.
    /// Default: 0.06.
    pub learning_rate: f64,

    /// Gate winner selection on node conscience.
    /// Default: true.
    pub conscience: bool,

    /// Conscience level a node must exceed to compete.
    /// Default: 0.75.
    pub conscience_threshold: f64,

    /// Grid geometry for neighbor lookup.
    /// Default: [`Neighborhood::Grid`].
    pub neighborhood: Neighborhood,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 1,
            learning_rate: 0.06,
            conscience: true,
            conscience_threshold: 0.75,
            neighborhood: Neighborhood::Grid,
        }
    }
}
