//! Text definition files and training-vector files.
//!
//! A definition file holds one node per line: whitespace-separated weights,
//! a bias, and optionally a trailing activation selector (`step` / `log`).
//! A line containing `---` closes the current layer. The input layer is
//! implicit: its size is the token count of the first line, and that first
//! line is then parsed again as the first node line. Files written for the
//! historical layout (where the bias token pads the input count by one)
//! load unchanged.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{KohonetError, Result};
use crate::net::{Activation, Lattice, Layer, Node};

const LAYER_SEPARATOR: &str = "---";

fn parse_value(token: &str, line_number: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| {
        KohonetError::Format(format!("line {}: invalid number '{}'", line_number, token))
    })
}

/// Parses one node line. The last token is either the bias (builder default
/// activation applies) or an activation selector preceded by the bias.
fn parse_node(
    tokens: &[&str],
    line_number: usize,
    layer: usize,
    default_activation: Option<Activation>,
) -> Result<Node> {
    let Some((&last, head)) = tokens.split_last() else {
        return Err(KohonetError::Format(format!(
            "line {}: empty node line",
            line_number
        )));
    };

    let (weights, bias, activation) = if let Ok(bias) = last.parse::<f64>() {
        (head, bias, default_activation)
    } else {
        let Some((&bias_token, head)) = head.split_last() else {
            return Err(KohonetError::Format(format!(
                "line {}: selector '{}' without a bias",
                line_number, last
            )));
        };
        let bias = parse_value(bias_token, line_number)?;
        (head, bias, Activation::from_token(last))
    };

    let weights: Vec<f64> = weights
        .iter()
        .map(|token| parse_value(token, line_number))
        .collect::<Result<_>>()?;

    Ok(Node::new(layer, weights, bias, activation))
}

/// Reads a lattice from a text definition.
///
/// Nothing is returned until the whole definition parses; a malformed line
/// surfaces as [`KohonetError::Format`] with its line number.
pub fn from_reader<R: BufRead>(
    reader: R,
    default_activation: Option<Activation>,
) -> Result<Lattice> {
    let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;

    let Some(first) = lines.first() else {
        return Err(KohonetError::Format("empty network definition".to_string()));
    };
    if first.contains(LAYER_SEPARATOR) {
        return Err(KohonetError::Format(
            "first line must be a node line, not a layer separator".to_string(),
        ));
    }
    let input_size = first.split_whitespace().count();

    let mut layers: Vec<Layer> = vec![(0..input_size).map(|_| Node::input()).collect()];
    let mut current: Layer = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if line.contains(LAYER_SEPARATOR) {
            if !current.is_empty() {
                layers.push(std::mem::take(&mut current));
            }
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        current.push(parse_node(
            &tokens,
            index + 1,
            layers.len(),
            default_activation,
        )?);
    }
    if !current.is_empty() {
        layers.push(current);
    }

    if layers.len() < 2 {
        return Err(KohonetError::Format(
            "definition holds no node lines".to_string(),
        ));
    }
    Ok(Lattice::new(layers))
}

/// Reads a lattice from a definition file on disk.
pub fn from_file<P: AsRef<Path>>(
    path: P,
    default_activation: Option<Activation>,
) -> Result<Lattice> {
    let file = File::open(path.as_ref())?;
    let lattice = from_reader(BufReader::new(file), default_activation)?;
    debug!(
        "loaded lattice from {}: {} layer(s), input size {}",
        path.as_ref().display(),
        lattice.layers.len(),
        lattice.input_size()
    );
    Ok(lattice)
}

/// Writes a lattice back out in the definition format.
///
/// The input layer is not written; reloading derives its size from the
/// first node line, the same way the reader sized this lattice. Nodes
/// without an activation are written bare and pick up the reader's default
/// on reload.
pub fn write<W: Write>(lattice: &Lattice, writer: &mut W) -> Result<()> {
    for (index, layer) in lattice.layers.iter().enumerate().skip(1) {
        if index > 1 {
            writeln!(writer, "{}", LAYER_SEPARATOR)?;
        }
        for node in layer {
            let mut tokens: Vec<String> = node.weights.iter().map(|w| w.to_string()).collect();
            tokens.push(node.bias.to_string());
            if let Some(activation) = node.activation {
                tokens.push(activation.token().to_string());
            }
            writeln!(writer, "{}", tokens.join(" "))?;
        }
    }
    Ok(())
}

/// Writes a lattice to a definition file on disk.
pub fn write_to_file<P: AsRef<Path>>(lattice: &Lattice, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(lattice, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Loads training vectors, one whitespace-separated vector per line.
pub fn load_vectors<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut vectors = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(KohonetError::Format(format!(
                "line {}: empty training vector",
                index + 1
            )));
        }
        let vector: Vec<f64> = tokens
            .iter()
            .map(|token| parse_value(token, index + 1))
            .collect::<Result<_>>()?;
        vectors.push(vector);
    }
    debug!(
        "loaded {} training vector(s) from {}",
        vectors.len(),
        path.as_ref().display()
    );
    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn parse(text: &str) -> Result<Lattice> {
        from_reader(text.as_bytes(), Some(Activation::Step))
    }

    #[test]
    fn test_first_line_sizes_input_and_is_a_node() {
        let lattice = parse("1 1 1.5\n0.3 0.7 0.1\n").unwrap();
        // Three tokens on line one: three input nodes.
        assert_eq!(lattice.layers.len(), 2);
        assert_eq!(lattice.input_size(), 3);
        assert_eq!(lattice.layers[1].len(), 2);
        assert_eq!(lattice.layers[1][0].weights, vec![1.0, 1.0]);
        assert!((lattice.layers[1][0].bias - 1.5).abs() < 1e-10);
        assert_eq!(lattice.layers[1][1].weights, vec![0.3, 0.7]);
    }

    #[test]
    fn test_separator_starts_new_layer() {
        let lattice = parse("1 0\n---\n0.5 0.25\n").unwrap();
        assert_eq!(lattice.layers.len(), 3);
        assert_eq!(lattice.input_size(), 2);
        assert_eq!(lattice.layers[1].len(), 1);
        assert_eq!(lattice.layers[2].len(), 1);
        assert_eq!(lattice.layers[2][0].weights, vec![0.5]);
        assert_eq!(lattice.layers[2][0].layer, 2);
    }

    #[test]
    fn test_repeated_separators_make_no_empty_layers() {
        let lattice = parse("1 0\n---\n---\n0.5 0.25\n---\n").unwrap();
        assert_eq!(lattice.layers.len(), 3);
        assert!(lattice.layers.iter().all(|layer| !layer.is_empty()));
    }

    #[test]
    fn test_activation_selectors() {
        let lattice = parse("0.5 1.5 step\n0.5 1.5 log\n0.5 1.5\n0.5 1.5 tanh\n").unwrap();
        let nodes = &lattice.layers[1];
        assert_eq!(nodes[0].activation, Some(Activation::Step));
        assert_eq!(nodes[1].activation, Some(Activation::Logistic));
        // No selector: the builder default applies.
        assert_eq!(nodes[2].activation, Some(Activation::Step));
        // Unknown selector: no activation at all.
        assert_eq!(nodes[3].activation, None);
        for node in nodes {
            assert_eq!(node.weights, vec![0.5]);
            assert!((node.bias - 1.5).abs() < 1e-10);
        }
    }

    #[test]
    fn test_no_default_activation() {
        let lattice = from_reader("0.5 0.5 1.5\n".as_bytes(), None).unwrap();
        assert_eq!(lattice.layers[1][0].activation, None);
    }

    #[test]
    fn test_blank_line_is_format_error() {
        let result = parse("1 1 1.5\n\n0.3 0.7 0.1\n");
        assert!(matches!(result, Err(KohonetError::Format(_))));
    }

    #[test]
    fn test_bad_number_is_error() {
        let result = parse("1 x 1.5\n");
        assert!(matches!(result, Err(KohonetError::Format(_))));
    }

    #[test]
    fn test_selector_without_bias_is_error() {
        let result = parse("1 1 1.5\nlog\n");
        assert!(matches!(result, Err(KohonetError::Format(_))));
    }

    #[test]
    fn test_empty_definition_is_error() {
        assert!(matches!(parse(""), Err(KohonetError::Format(_))));
        assert!(matches!(parse("---\n"), Err(KohonetError::Format(_))));
    }

    #[test]
    fn test_write_then_reload_matches() {
        let original = parse("0.25 -0.75 1.5 log\n0.5 0.5 0 step\n---\n1 2 0.5\n").unwrap();

        let mut buffer = Vec::new();
        write(&original, &mut buffer).unwrap();
        let reloaded = from_reader(buffer.as_slice(), Some(Activation::Step)).unwrap();

        assert_eq!(reloaded.layers.len(), original.layers.len());
        assert_eq!(reloaded.input_size(), original.input_size());
        for (a, b) in original.layers[1..].iter().flatten().zip(
            reloaded.layers[1..].iter().flatten(),
        ) {
            assert_eq!(a.weights, b.weights);
            assert_eq!(a.bias, b.bias);
            assert_eq!(a.activation, b.activation);
        }
    }

    #[test]
    fn test_load_vectors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1").unwrap();
        writeln!(file, "0.5 -0.5").unwrap();
        file.flush().unwrap();

        let vectors = load_vectors(file.path()).unwrap();
        assert_eq!(vectors, vec![vec![0.0, 1.0], vec![0.5, -0.5]]);
    }

    #[test]
    fn test_load_vectors_rejects_blank_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "1 0").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            load_vectors(file.path()),
            Err(KohonetError::Format(_))
        ));
    }

    #[test]
    fn test_load_vectors_rejects_bad_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 one").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            load_vectors(file.path()),
            Err(KohonetError::Format(_))
        ));
    }
}
