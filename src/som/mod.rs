//! Self-organizing map training and inference.
//!
//! The engine wraps a two-layer [`crate::net::Lattice`]: the input layer
//! carries the normalized vector being presented and the map layer holds
//! the competing nodes. Training is strictly online; each vector updates
//! the winner and its lattice neighborhood before the next is looked at.
//!
//! Winner selection can be gated by a conscience mechanism so that no
//! node monopolizes the map early in a run.

mod map;
mod neighborhood;

pub use map::{KohonenMap, WinnerPolicy};
pub use neighborhood::Neighborhood;
