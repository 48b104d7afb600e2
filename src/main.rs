//! Residence GA CLI - Evolve a bathroom configuration.

use residence_ga::schema::EvolutionPhase;
use residence_ga::{EvolutionConfig, EvolutionEngine};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("residence-ga");

    let mode = parse_args(args.get(1..).unwrap_or_default()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        std::process::exit(1);
    });

    let json_output = match mode {
        Mode::Help => {
            print_usage(program);
            return;
        }
        Mode::Example => {
            print_example_config();
            return;
        }
        Mode::Run { json_output } => json_output,
    };

    let config = EvolutionConfig::default();

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if !json_output {
        println!("Residence Evolution");
        println!("===================");
        println!(
            "Population: {} ({} survivors), generations: {}, mutation rate: {}",
            engine.config().population_size,
            engine.config().survivors,
            engine.config().generations,
            engine.config().mutation_rate
        );
        println!();
    }

    let result = engine
        .run_with_callback(|progress| {
            if json_output || progress.phase != EvolutionPhase::Swapping {
                return;
            }
            if let Some(best) = &progress.best_candidate {
                println!(
                    "Generation {}/{} complete: mean={:.2}",
                    progress.generation, progress.total_generations, progress.mean_fitness
                );
                println!("{}", best);
                println!();
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });

    if json_output {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Final population reached, fittest individual:");
    println!("{}", result.best);
    println!();
    println!(
        "Evaluations: {} in {:.3}s",
        result.stats.total_evaluations, result.stats.elapsed_seconds
    );
}

/// What the binary was asked to do.
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Help,
    Example,
    Run { json_output: bool },
}

/// Interpret command-line flags. The run parameters are fixed constants, so
/// anything that is not a known flag is rejected.
fn parse_args(args: &[String]) -> Result<Mode, String> {
    let mut json_output = false;
    let mut example = false;

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Mode::Help),
            "--example" => example = true,
            "--json" => json_output = true,
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    if example {
        Ok(Mode::Example)
    } else {
        Ok(Mode::Run { json_output })
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--json] [--example]", program);
    eprintln!();
    eprintln!("Evolve the most comfortable bathroom configuration using the built-in");
    eprintln!("run parameters.");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --json       Print the result as JSON");
    eprintln!("  --example    Print the built-in configuration");
}

fn print_example_config() {
    let config = EvolutionConfig::default();

    println!("Built-in configuration:");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
