//! Construction provider.
//!
//! Builds lattices so the engines never have to: random initialization for
//! fresh runs and a plain text format for predefined or saved networks.
//! Training vectors load through here as well. Construction hands the
//! finished lattice over by value; nothing here keeps a handle on it.

mod file;
mod random;

pub use file::{from_file, from_reader, load_vectors, write, write_to_file};
pub use random::{random_map, random_network};
