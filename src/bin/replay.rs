// Standalone replay tool for analyzing Battlesnake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate             Run validation mode with expected moves
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use tailchaser_snake::config::Config;
use tailchaser_snake::replay::ReplayEngine;
use tailchaser_snake::types::Direction;

fn print_usage() {
    eprintln!("Battlesnake Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay battlesnake_debug.jsonl --all");
    eprintln!("  replay battlesnake_debug.jsonl --turns 5,10,15");
    eprintln!("  replay battlesnake_debug.jsonl --validate 5:up,10:right");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

/// Parses `turn:move` pairs; several acceptable moves are separated by `|`
fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| -> Result<(i32, Vec<Direction>), String> {
            let mut parts = pair.splitn(2, ':');
            let turn = parts
                .next()
                .ok_or_else(|| format!("Missing turn in '{}'", pair))?
                .trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn in '{}': {}", pair, e))?;
            let moves = parts
                .next()
                .ok_or_else(|| format!("Missing move in '{}'", pair))?
                .split('|')
                .map(|m| m.parse::<Direction>())
                .collect::<Result<Vec<_>, _>>()?;
            Ok((turn, moves))
        })
        .collect()
}

fn run(args: &[String]) -> Result<(), String> {
    let log_file = args
        .get(1)
        .filter(|arg| !arg.starts_with("--"))
        .ok_or("Missing log file argument")?;

    let mut replay_all = false;
    let mut turns: Option<Vec<i32>> = None;
    let mut expected: Option<Vec<(i32, Vec<Direction>)>> = None;
    let mut verbose = false;
    let mut config_path = "Snake.toml".to_string();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => replay_all = true,
            "--verbose" => verbose = true,
            "--turns" => {
                i += 1;
                let value = args.get(i).ok_or("--turns requires a value")?;
                turns = Some(parse_turns(value)?);
            }
            "--validate" => {
                i += 1;
                let value = args.get(i).ok_or("--validate requires a value")?;
                expected = Some(parse_expected_moves(value)?);
            }
            "--config" => {
                i += 1;
                config_path = args.get(i).ok_or("--config requires a value")?.clone();
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {} ({}), using hardcoded defaults", e, config_path);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config.heuristics, verbose);
    let entries = engine.load_log_file(log_file)?;

    if let Some(expected) = expected {
        engine.validate_expected_moves(&entries, &expected)?;
        println!("All {} expected moves validated", expected.len());
        return Ok(());
    }

    let results = match turns {
        Some(turns) => engine.replay_turns(&entries, &turns)?,
        None if replay_all => engine.replay_all(&entries),
        None => return Err("Specify --all, --turns or --validate".to_string()),
    };

    engine.print_report(&results);

    if results.iter().all(|r| r.matches) {
        Ok(())
    } else {
        Err("Replayed moves differ from the log".to_string())
    }
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|arg| arg == "--help") {
        print_usage();
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
