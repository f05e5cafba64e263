use clap::{Parser, Subcommand};
use lychrel_graph::{
    build_graph, count_range, generate_chain, io_utils, parse_seed, ChainStatus, GraphConfig,
    ReverseAddGraph, SeriesConfig, SeriesResults,
};
use num_bigint::BigUint;
use std::path::Path;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lychrel-graph")]
#[command(about = "Explore reverse-and-add chains, step counts and the merged chain graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print the reverse-and-add chain of a single seed")]
    Chain {
        #[arg(help = "The seed to iterate")]
        seed: String,

        #[arg(short, long, default_value = "500", help = "Maximum reverse-and-add steps")]
        bound: u32,
    },

    #[command(about = "Count steps to a palindrome for every seed in a range")]
    Series {
        #[arg(help = "Start of the range (inclusive)")]
        start: u64,

        #[arg(help = "End of the range (inclusive)")]
        end: u64,

        #[arg(short, long, default_value = "500", help = "Maximum reverse-and-add steps per seed")]
        bound: u32,

        #[arg(short, long, help = "Output file for results (JSON)")]
        output: Option<String>,

        #[arg(long, help = "Disable parallel processing")]
        no_parallel: bool,
    },

    #[command(about = "Build the merged reverse-and-add graph for a range of seeds")]
    Graph {
        #[arg(help = "Start of the range (inclusive)")]
        start: u64,

        #[arg(help = "End of the range (inclusive)")]
        end: u64,

        #[arg(short, long, default_value = "200", help = "Maximum reverse-and-add steps per seed")]
        bound: u32,

        #[arg(short, long, help = "Output file for the graph export (JSON)")]
        output: Option<String>,

        #[arg(long, help = "Disable parallel processing")]
        no_parallel: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chain { seed, bound } => {
            print_chain(&seed, bound);
        }
        Commands::Series {
            start,
            end,
            bound,
            output,
            no_parallel,
        } => {
            run_series(start, end, bound, output, !no_parallel);
        }
        Commands::Graph {
            start,
            end,
            bound,
            output,
            no_parallel,
        } => {
            run_graph(start, end, bound, output, !no_parallel);
        }
    }
}

fn print_chain(seed_str: &str, bound: u32) {
    let seed: BigUint = match parse_seed(seed_str) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = Instant::now();
    let chain = match generate_chain(&seed, bound) {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start_time.elapsed();

    println!("Seed: {}", seed);
    println!("Bound: {}", bound);
    println!("Chain ({} values):", chain.values.len());
    for (step, value) in chain.values.iter().enumerate() {
        println!("  [{}] {}", step, value);
    }

    match chain.status {
        ChainStatus::PalindromeFound(k) => {
            println!("\nStatus: palindrome reached after {} steps", k);
        }
        ChainStatus::Exhausted => {
            println!(
                "\nStatus: no palindrome within {} steps (Lychrel candidate)",
                bound
            );
        }
    }
    println!("Time elapsed: {:.3}s", elapsed.as_secs_f64());
}

fn run_series(start: u64, end: u64, bound: u32, output: Option<String>, parallel: bool) {
    let config = SeriesConfig {
        start: BigUint::from(start),
        end: BigUint::from(end),
        bound,
        parallel,
    };

    let start_time = Instant::now();
    let results = match count_range(&config) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start_time.elapsed();

    print_series_report(start, end, bound, &results);
    println!("\nTime elapsed: {:.3}s", elapsed.as_secs_f64());

    if let Some(filename) = output {
        save_json(&results, &filename);
    }
}

fn print_series_report(start: u64, end: u64, bound: u32, results: &SeriesResults) {
    println!(
        "Iteration counts for numbers from {} to {} (bound={}):\n",
        start, end, bound
    );
    for entry in &results.counts {
        if entry.steps == bound {
            println!(
                "Number {}: did NOT reach a palindrome within {} iterations.",
                entry.seed, bound
            );
        } else {
            println!(
                "Number {}: reached a palindrome after {} iterations.",
                entry.seed, entry.steps
            );
        }
    }

    match results.flagged_seeds.len() {
        0 => {
            println!("\nAll numbers reached a palindrome within the given iteration limit!");
        }
        1 => {
            println!(
                "\nOnly one number did NOT reach a palindrome: {} (no consecutive differences).",
                results.flagged_seeds[0]
            );
        }
        _ => {
            println!(
                "\nNumbers that did NOT reach a palindrome: {}",
                join(&results.flagged_seeds)
            );
            println!(
                "Differences between consecutive no-palindrome numbers: {}",
                join(&results.flagged_gaps)
            );
        }
    }
}

fn run_graph(start: u64, end: u64, bound: u32, output: Option<String>, parallel: bool) {
    let config = GraphConfig {
        start: BigUint::from(start),
        end: BigUint::from(end),
        bound,
        parallel,
    };

    let start_time = Instant::now();
    let graph = match build_graph(&config) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start_time.elapsed();

    print_graph_report(start, end, bound, &graph);
    println!("\nTime elapsed: {:.3}s", elapsed.as_secs_f64());

    if let Some(filename) = output {
        save_json(&graph.to_export(), &filename);
    }
}

fn print_graph_report(start: u64, end: u64, bound: u32, graph: &ReverseAddGraph) {
    println!(
        "Reverse-and-add graph for seeds {} to {} (bound={}):",
        start, end, bound
    );
    println!("  Nodes: {}", graph.node_count());
    println!("  Edges: {}", graph.edge_count());
    println!("  Lychrel candidates: {}", graph.flagged_seeds.len());

    if !graph.flagged_seeds.is_empty() {
        println!("\nSeeds that did not reach a palindrome:");
        for seed in &graph.flagged_seeds {
            println!("  - {}", seed);
        }
    }

    println!("\nNodes per level:");
    for (level, nodes) in graph.nodes_by_level() {
        println!("  level {:>3}: {} node(s)", level, nodes.len());
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn save_json<T: serde::Serialize>(data: &T, filename: &str) {
    match io_utils::save_to_file(data, Path::new(filename)) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("Error writing to file: {}", e),
    }
}
