//! # Kohonet - Kohonen Network Engine
//!
//! Kohonet trains and queries self-organizing maps (Kohonen networks) and
//! runs the plain feed-forward networks they are built on.
//!
//! ## Overview
//!
//! A map is a two-layer lattice: an input layer and a competitive layer of
//! nodes whose weight vectors migrate toward the training data. Training is
//! online with conscience-gated winner selection, so no node can monopolize
//! the map while the rest stay cold. Inference is a plain feed-forward pass
//! over the learned weights.
//!
//! ## Key Features
//!
//! - **Online Kohonen training** with inverse-grid-distance neighborhood
//!   updates and square-root learning-rate annealing
//! - **Conscience mechanism** for fair winner distribution
//! - **Line and grid neighborhoods**, chosen at configuration time
//! - **Feed-forward substrate** with step and logistic activations
//! - **Text definition format** for building, saving and reloading networks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kohonet::{build, KohonenMap, MapConfig};
//! use kohonet::net::Activation;
//!
//! // Build a 2-input, 3x3 map with seeded random weights
//! let lattice = build::random_map(&[2, 9], Some(Activation::Logistic), Some(42))?;
//! let mut map = KohonenMap::new(lattice, &MapConfig::default())?;
//!
//! // Train over 100 steps
//! let data = build::load_vectors("train.txt")?;
//! for step in 1..=100 {
//!     map.train(step, 100, &data)?;
//! }
//!
//! // Query
//! map.infer(&[0.9, 0.1])?;
//! let node = map.best_match();
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`net`] - Lattice substrate: nodes, layers, activations
//! - [`som`] - Map engine: training, conscience, neighborhoods
//! - [`build`] - Construction provider: random and file-based builds
//! - [`metric`] - Distance metric for winner selection
//! - [`config`] - Engine hyperparameters
//! - [`error`] - Error type shared across the crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod build;
pub mod config;
pub mod error;
pub mod metric;
pub mod net;
pub mod som;

// Re-export commonly used types
pub use config::MapConfig;
pub use error::{KohonetError, Result};
pub use net::{Activation, Lattice, Layer, Node};
pub use som::{KohonenMap, Neighborhood, WinnerPolicy};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default learning rate at step zero.
pub const DEFAULT_LEARNING_RATE: f64 = 0.06;

/// Default neighborhood radius.
pub const DEFAULT_RADIUS: usize = 1;

/// Default conscience threshold.
pub const DEFAULT_CONSCIENCE_THRESHOLD: f64 = 0.75;
