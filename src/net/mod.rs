//! Feed-forward substrate shared by plain networks and the map engine.
//!
//! A [`Lattice`] is a stack of [`Node`] layers: layer 0 buffers the input
//! vector, each later layer computes weighted sums of the layer below.
//! The self-organizing map reuses this substrate for its inference pass.

mod activation;
mod lattice;
mod node;

pub use activation::Activation;
pub use lattice::{Lattice, Layer};
pub use node::Node;
