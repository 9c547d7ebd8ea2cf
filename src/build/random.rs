//! Random lattice construction.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{KohonetError, Result};
use crate::net::{Activation, Lattice, Layer, Node};

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(KohonetError::Lattice(format!(
            "need an input size and at least one layer size, got {} size(s)",
            sizes.len()
        )));
    }
    if sizes.contains(&0) {
        return Err(KohonetError::Lattice(
            "layer sizes must be positive".to_string(),
        ));
    }
    Ok(())
}

fn input_layer(size: usize) -> Layer {
    (0..size).map(|_| Node::input()).collect()
}

/// Builds a feed-forward lattice with random weights.
///
/// `sizes` gives the node count per layer, input layer first. Weights are
/// drawn uniformly from [0, 1), biases start at zero and every non-input
/// node gets the given activation (`None` leaves outputs as raw weighted
/// sums). Pass a seed for a reproducible build.
pub fn random_network(
    sizes: &[usize],
    activation: Option<Activation>,
    seed: Option<u64>,
) -> Result<Lattice> {
    validate_sizes(sizes)?;
    let mut rng = rng_for(seed);

    let mut layers = vec![input_layer(sizes[0])];
    for (layer_index, &size) in sizes.iter().enumerate().skip(1) {
        let fan_in = sizes[layer_index - 1];
        let layer: Layer = (0..size)
            .map(|_| {
                let weights: Vec<f64> = (0..fan_in).map(|_| rng.gen_range(0.0..1.0)).collect();
                Node::new(layer_index, weights, 0.0, activation)
            })
            .collect();
        layers.push(layer);
    }

    debug!("built random feed-forward lattice, layer sizes {:?}", sizes);
    Ok(Lattice::new(layers))
}

/// Builds a map lattice with random weights.
///
/// Same layout as [`random_network`] but weights are drawn uniformly from
/// [-1, 1], the usual starting span for a competitive layer.
pub fn random_map(
    sizes: &[usize],
    activation: Option<Activation>,
    seed: Option<u64>,
) -> Result<Lattice> {
    validate_sizes(sizes)?;
    let mut rng = rng_for(seed);

    let mut layers = vec![input_layer(sizes[0])];
    for (layer_index, &size) in sizes.iter().enumerate().skip(1) {
        let fan_in = sizes[layer_index - 1];
        let layer: Layer = (0..size)
            .map(|_| {
                let weights: Vec<f64> = (0..fan_in).map(|_| rng.gen_range(-1.0..=1.0)).collect();
                Node::new(layer_index, weights, 0.0, activation)
            })
            .collect();
        layers.push(layer);
    }

    debug!("built random map lattice, layer sizes {:?}", sizes);
    Ok(Lattice::new(layers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_shape() {
        let lattice = random_network(&[2, 3, 1], Some(Activation::Step), Some(7)).unwrap();
        assert_eq!(lattice.layers.len(), 3);
        assert_eq!(lattice.layers[0].len(), 2);
        assert_eq!(lattice.layers[1].len(), 3);
        assert_eq!(lattice.layers[2].len(), 1);

        for node in &lattice.layers[0] {
            assert!(node.weights.is_empty());
            assert_eq!(node.activation, None);
        }
        for node in &lattice.layers[1] {
            assert_eq!(node.weights.len(), 2);
            assert_eq!(node.bias, 0.0);
            assert_eq!(node.activation, Some(Activation::Step));
        }
        for node in &lattice.layers[2] {
            assert_eq!(node.weights.len(), 3);
        }
    }

    #[test]
    fn test_network_without_activation() {
        let lattice = random_network(&[2, 2], None, Some(7)).unwrap();
        for node in &lattice.layers[1] {
            assert_eq!(node.activation, None);
        }
    }

    #[test]
    fn test_network_weight_span() {
        let lattice = random_network(&[4, 16], Some(Activation::Logistic), Some(11)).unwrap();
        for node in &lattice.layers[1] {
            for w in &node.weights {
                assert!((0.0..1.0).contains(w));
            }
        }
    }

    #[test]
    fn test_map_weight_span() {
        let lattice = random_map(&[4, 16], Some(Activation::Logistic), Some(11)).unwrap();
        for node in &lattice.layers[1] {
            for w in &node.weights {
                assert!((-1.0..=1.0).contains(w));
            }
        }
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = random_map(&[3, 9], Some(Activation::Logistic), Some(42)).unwrap();
        let b = random_map(&[3, 9], Some(Activation::Logistic), Some(42)).unwrap();
        for (x, y) in a.layers[1].iter().zip(b.layers[1].iter()) {
            assert_eq!(x.weights, y.weights);
        }

        let c = random_map(&[3, 9], Some(Activation::Logistic), Some(43)).unwrap();
        let same = a
            .layers[1]
            .iter()
            .zip(c.layers[1].iter())
            .all(|(x, y)| x.weights == y.weights);
        assert!(!same);
    }

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(matches!(
            random_network(&[3], Some(Activation::Step), None),
            Err(KohonetError::Lattice(_))
        ));
        assert!(matches!(
            random_network(&[3, 0, 2], Some(Activation::Step), None),
            Err(KohonetError::Lattice(_))
        ));
        assert!(matches!(
            random_map(&[], Some(Activation::Step), None),
            Err(KohonetError::Lattice(_))
        ));
    }
}
