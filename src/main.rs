//! Hyper GA CLI - Generate or evolve a population file.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::process;

use log::info;

use hyper_ga::{
    evolution::{GaRng, evolve_population, generate_population},
    io::{read_generation_file, write_generation_file},
    schema::RunConfig,
};

/// What the invocation asks for.
enum Mode {
    Generate,
    Evolve {
        crossover_probability: f64,
        mutation_probability: f64,
        elitism_fraction: f64,
        input: PathBuf,
    },
}

struct Invocation {
    population_size: usize,
    output: PathBuf,
    mode: Mode,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("hyper-ga");
    let rest = args.get(1..).unwrap_or_default();

    if rest.iter().any(|a| a == "--example") {
        print_example_config();
        return;
    }

    let invocation = parse_args(rest).unwrap_or_else(|| usage_error(program));

    // Load configuration
    let mut config = match &invocation.config_path {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                process::exit(1);
            });
            serde_json::from_str::<RunConfig>(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                process::exit(1);
            })
        }
        None => RunConfig::default(),
    };

    if invocation.seed.is_some() {
        config.evolution.random_seed = invocation.seed;
    }
    if let Mode::Evolve {
        crossover_probability,
        mutation_probability,
        elitism_fraction,
        ..
    } = invocation.mode
    {
        config.evolution.crossover_probability = crossover_probability;
        config.evolution.mutation_probability = mutation_probability;
        config.evolution.elitism_fraction = elitism_fraction;
    }

    if let Err(e) = config.schema.validate() {
        eprintln!("Invalid schema: {}", e);
        process::exit(1);
    }

    let mut rng = match config.evolution.random_seed {
        Some(seed) => GaRng::new(seed),
        None => GaRng::from_time(),
    };

    let generation = match &invocation.mode {
        Mode::Generate => {
            info!(
                "Generating {} chromosomes into {}",
                invocation.population_size,
                invocation.output.display()
            );
            generate_population(&config.schema, invocation.population_size, &mut rng)
                .unwrap_or_else(|e| fail(e))
        }
        Mode::Evolve { input, .. } => {
            if config.evolution.validate().is_err() {
                usage_error(program);
            }
            info!(
                "Evolving {} chromosomes from {} into {}",
                invocation.population_size,
                input.display(),
                invocation.output.display()
            );
            let current =
                read_generation_file(input, &config.schema, invocation.population_size)
                    .unwrap_or_else(|e| fail(e));
            evolve_population(current, &config.evolution, &mut rng).unwrap_or_else(|e| fail(e))
        }
    };

    write_generation_file(&invocation.output, &generation).unwrap_or_else(|e| fail(e));
}

/// Split flags from positionals and parse the original argument layout.
fn parse_args(args: &[String]) -> Option<Invocation> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut seed = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(iter.next()?)),
            "--seed" => seed = Some(iter.next()?.parse().ok()?),
            _ => positional.push(arg.as_str()),
        }
    }

    let population_size: usize = positional.first()?.parse().ok()?;
    if population_size == 0 {
        return None;
    }
    let output = PathBuf::from(positional.get(1)?);

    let mode = match positional.len() {
        2 => Mode::Generate,
        6 => Mode::Evolve {
            crossover_probability: positional[2].parse().ok()?,
            mutation_probability: positional[3].parse().ok()?,
            elitism_fraction: positional[4].parse().ok()?,
            input: PathBuf::from(positional[5]),
        },
        _ => return None,
    };

    Some(Invocation {
        population_size,
        output,
        mode,
        config_path,
        seed,
    })
}

fn usage_error(program: &str) -> ! {
    eprintln!(
        "Usage: {} POPULATION_SIZE OUTPUT_FILENAME [CROSSOVER_PROBABILITY MUTATION_PROBABILITY ELITISM_PERCENTAGE INPUT_FILENAME]",
        program
    );
    eprintln!("POPULATION_SIZE > 0");
    eprintln!("0.0 <= CROSSOVER_PROBABILITY <= 1.0");
    eprintln!("0.0 <= MUTATION_PROBABILITY <= 1.0");
    eprintln!("0.0 <= ELITISM_PERCENTAGE <= 1.0");
    eprintln!("CROSSOVER_PROBABILITY + ELITISM_PERCENTAGE <= 1.0");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file.json>  Gene schema and seed (see --example)");
    eprintln!("  --seed <u64>          Fixed random seed");
    eprintln!("  --example             Print an example configuration");
    process::exit(1);
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{}", e);
    process::exit(1);
}

fn print_example_config() {
    let config = RunConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}
