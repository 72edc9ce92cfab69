//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 500 runs to wave 40
//!   cargo run --bin simulate -- -n 100 -w 25      # 100 runs, stop at wave 25
//!   cargo run --bin simulate -- --seed 42 -d hard # Reproducible hard run

use std::env;
use std::process;

use farm_defense::core::{Difficulty, GameConfig};
use farm_defense::simulator::{run_simulation, SimConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, save_json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            process::exit(2);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              FARM DEFENSE BALANCE SIMULATOR                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Difficulty:     {:?}", config.game.difficulty);
    println!("  Max Wave:       {}", config.max_wave);
    println!("  Max Rounds:     {}", config.max_rounds_per_run);
    if config.game.starting_wave > 1 {
        println!("  Starting Wave:  {}", config.game.starting_wave);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if save_json {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report {}: {}", filename, e);
                process::exit(1);
            }
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, value))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut save_json = false;
    let mut difficulty: Option<Difficulty> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                config.num_runs = parse_number(next_value(args, &mut i, flag)?, flag)?;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_number(next_value(args, &mut i, flag)?, flag)?);
            }
            "-d" | "--difficulty" => {
                let value = next_value(args, &mut i, flag)?;
                difficulty = Some(
                    Difficulty::parse(value)
                        .ok_or_else(|| format!("unknown difficulty '{}'", value))?,
                );
            }
            "-w" | "--max-wave" => {
                config.max_wave = parse_number(next_value(args, &mut i, flag)?, flag)?;
            }
            "--config" => {
                let path = next_value(args, &mut i, flag)?;
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {}", path, e))?;
                config.game = GameConfig::from_json(&text).map_err(|e| e.to_string())?;
            }
            "--json" => save_json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    // -d wins over a difficulty set in --config, wherever it appears.
    if let Some(difficulty) = difficulty {
        config.game.difficulty = difficulty;
    }
    Ok((config, save_json))
}

fn print_help() {
    println!("Farm Defense Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Number of simulated games (default: 500)");
    println!("    -s, --seed <S>          Base random seed for reproducibility");
    println!("    -d, --difficulty <D>    easy, normal or hard (default: normal)");
    println!("    -w, --max-wave <W>      Retire once this wave is passed (default: 40)");
    println!("    --config <PATH>         JSON game config (difficulty, fragment tuning, ...)");
    println!("    --json                  Save JSON report");
    println!("    -v, --verbose           One line per run");
    println!("    -h, --help              Show this help");
    println!();
    println!("Set RUST_LOG=debug to trace individual games.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_flags() {
        let (config, json) =
            parse_args(&args(&["-n", "10", "--seed", "4", "-d", "hard", "-w", "30", "--json"]))
                .unwrap();
        assert_eq!(config.num_runs, 10);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.game.difficulty, Difficulty::Hard);
        assert_eq!(config.max_wave, 30);
        assert!(json);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(&args(&["-n", "lots"])).is_err());
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["-d", "nightmare"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }
}
