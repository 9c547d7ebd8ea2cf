//! Kohonet CLI - Kohonen Network Engine
//!
//! Command-line interface for building, training and querying networks.

use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use kohonet::{
    build, Activation, KohonenMap, KohonetError, Lattice, MapConfig, Neighborhood, Result,
};
use log::error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kohonet")]
#[command(author = "Kohonet Contributors")]
#[command(version)]
#[command(about = "Kohonen Network Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a feed-forward network on vectors read from stdin
    Run {
        /// Build a random network with these layer sizes (input layer first)
        #[arg(short, long, num_args = 2.., value_name = "SIZE")]
        random: Option<Vec<usize>>,

        /// Load the network from a definition file
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Activation for built nodes (step, log); none means raw sums
        #[arg(short, long)]
        fun: Option<String>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Train a Kohonen map, then query it on vectors read from stdin
    Train {
        /// Build a random map: input size and map size
        #[arg(short, long, num_args = 2, value_name = "SIZE")]
        random: Option<Vec<usize>>,

        /// Load the map from a definition file
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Activation for built nodes (step, log); none means raw sums
        #[arg(short, long)]
        fun: Option<String>,

        /// Training vector file (one vector per line)
        #[arg(short, long)]
        train_file: PathBuf,

        /// Number of training steps
        #[arg(short = 'n', long, default_value = "100")]
        steps: usize,

        /// Neighborhood radius
        #[arg(long, default_value = "1")]
        radius: usize,

        /// Learning rate at step zero
        #[arg(long, default_value = "0.06")]
        rate: f64,

        /// Conscience level a node must exceed to compete
        #[arg(long, default_value = "0.75")]
        conscience_threshold: f64,

        /// Let every node compete regardless of conscience
        #[arg(long)]
        no_conscience: bool,

        /// Neighborhood geometry (grid, line)
        #[arg(long, default_value = "grid")]
        neighborhood: String,

        /// Save the trained map to a definition file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Run {
            random,
            data,
            fun,
            seed,
        } => run_network(random, data, fun, seed),

        Commands::Train {
            random,
            data,
            fun,
            train_file,
            steps,
            radius,
            rate,
            conscience_threshold,
            no_conscience,
            neighborhood,
            output,
            seed,
        } => train_map(
            random,
            data,
            fun,
            train_file,
            steps,
            radius,
            rate,
            conscience_threshold,
            no_conscience,
            neighborhood,
            output,
            seed,
        ),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_activation(token: Option<&str>) -> Result<Option<Activation>> {
    match token {
        None => Ok(None),
        Some(token) => Activation::from_token(token).map(Some).ok_or_else(|| {
            KohonetError::Config(format!(
                "unknown activation '{}' (expected step or log)",
                token
            ))
        }),
    }
}

fn parse_neighborhood(token: &str) -> Result<Neighborhood> {
    match token {
        "grid" => Ok(Neighborhood::Grid),
        "line" => Ok(Neighborhood::Line),
        other => Err(KohonetError::Config(format!(
            "unknown neighborhood '{}' (expected grid or line)",
            other
        ))),
    }
}

/// Builds from exactly one source: random sizes or a definition file.
fn build_lattice(
    random: Option<Vec<usize>>,
    data: Option<PathBuf>,
    activation: Option<Activation>,
    seed: Option<u64>,
    map_weights: bool,
) -> Result<Lattice> {
    match (random, data) {
        (Some(sizes), None) if map_weights => build::random_map(&sizes, activation, seed),
        (Some(sizes), None) => build::random_network(&sizes, activation, seed),
        (None, Some(path)) => build::from_file(path, activation),
        _ => Err(KohonetError::Config(
            "pass exactly one of --random or --data".to_string(),
        )),
    }
}

fn parse_vector(line: &str) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| KohonetError::Config(format!("invalid number '{}'", token)))
        })
        .collect()
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn run_network(
    random: Option<Vec<usize>>,
    data: Option<PathBuf>,
    fun: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let activation = parse_activation(fun.as_deref())?;
    let mut lattice = build_lattice(random, data, activation, seed, false)?;

    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }

        // A bad vector should not end the session.
        match parse_vector(&line).and_then(|vector| lattice.compute(&vector)) {
            Ok(()) => {
                println!("{}", lattice);
                println!("result: {:?}", lattice.result());
            }
            Err(e) => println!("error: {}", e),
        }
        prompt()?;
    }
    Ok(())
}

/// One 0/1 row per map node; a weight registers once it reaches 0.01.
fn print_weight_rows(map: &KohonenMap) {
    for node in &map.lattice().layers[1] {
        let row: Vec<u8> = node
            .weights
            .iter()
            .map(|&w| if w < 0.01 { 0 } else { 1 })
            .collect();
        println!("{:?}", row);
    }
}

#[allow(clippy::too_many_arguments)]
fn train_map(
    random: Option<Vec<usize>>,
    data: Option<PathBuf>,
    fun: Option<String>,
    train_file: PathBuf,
    steps: usize,
    radius: usize,
    rate: f64,
    conscience_threshold: f64,
    no_conscience: bool,
    neighborhood: String,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let start_time = Instant::now();

    println!("Kohonen Network Engine");
    println!("   Training map from: {}", train_file.display());
    println!();

    let activation = parse_activation(fun.as_deref())?;
    let neighborhood = parse_neighborhood(&neighborhood)?;
    let lattice = build_lattice(random, data, activation, seed, true)?;

    let config = MapConfig {
        radius,
        learning_rate: rate,
        conscience: !no_conscience,
        conscience_threshold,
        neighborhood,
    };
    let mut map = KohonenMap::new(lattice, &config)?;

    let training_set = build::load_vectors(&train_file)?;
    println!(
        "✓ Loaded {} training vector(s) from {}",
        training_set.len(),
        train_file.display()
    );

    let pb = ProgressBar::new(steps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );
    pb.set_message("Training map...");

    for step in 1..=steps {
        map.train(step, steps, &training_set)?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    println!("✓ Trained {} step(s) in {}", steps, HumanDuration(start_time.elapsed()));

    if let Some(path) = output {
        build::write_to_file(map.lattice(), &path)?;
        println!("✓ Saved map to {}", path.display());
    }
    println!();

    print_weight_rows(&map);
    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }

        match parse_vector(&line).and_then(|vector| map.infer(&vector)) {
            Ok(outputs) => {
                println!("{}", map.lattice());
                println!("result: {:?}", outputs);
                match map.best_match() {
                    Some(index) => println!("matched node: {}", index),
                    None => println!("matched node: none"),
                }
            }
            Err(e) => println!("error: {}", e),
        }
        print_weight_rows(&map);
        prompt()?;
    }
    Ok(())
}
