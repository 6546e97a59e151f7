// Replays a decision log through the current agent
//
//   replay <log_file> (--all | --turns 3,7 | --validate 3:1/2/up) [--config Agent.toml] [--verbose]

use std::env;
use std::process;

use colosseum_agent::config::Config;
use colosseum_agent::replay::ReplayEngine;
use colosseum_agent::types::Move;

const USAGE: &str = "usage: replay <log_file> (--all | --turns T1,T2 | --validate T:row/col/dir[|row/col/dir],...) \
[--config <path>] [--verbose]";

enum Mode {
    All,
    Turns(Vec<u32>),
    Validate(Vec<(u32, Vec<Move>)>),
}

struct Options {
    log_file: String,
    config_path: String,
    verbose: bool,
    mode: Mode,
}

fn parse_turn(s: &str) -> Result<u32, String> {
    s.trim()
        .parse::<u32>()
        .map_err(|e| format!("Invalid turn number '{}': {}", s, e))
}

/// `turn:move` pairs; a turn may list several acceptable moves separated by `|`
fn parse_expected(s: &str) -> Result<Vec<(u32, Vec<Move>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .split_once(':')
                .ok_or_else(|| format!("Expected 'turn:row/col/dir', got '{}'", pair))?;
            let moves = moves
                .split('|')
                .map(ReplayEngine::parse_move)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((parse_turn(turn)?, moves))
        })
        .collect()
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut rest = args.iter().skip(1);
    let log_file = rest.next().ok_or("missing log file")?.clone();
    let mut config_path = "Agent.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    while let Some(arg) = rest.next() {
        let mut value = || rest.next().ok_or(format!("{} requires an argument", arg));
        match arg.as_str() {
            "--all" => mode = Some(Mode::All),
            "--turns" => {
                let turns = value()?.split(',').map(parse_turn).collect::<Result<_, _>>()?;
                mode = Some(Mode::Turns(turns));
            }
            "--validate" => mode = Some(Mode::Validate(parse_expected(value()?)?)),
            "--config" => config_path = value()?.clone(),
            "--verbose" => verbose = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    Ok(Options {
        log_file,
        config_path,
        verbose,
        mode: mode.ok_or("one of --all, --turns or --validate is required")?,
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}\n{}", e, USAGE);
        process::exit(1);
    });

    let config = Config::from_file(&options.config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {}; using default configuration", e);
        Config::default_hardcoded()
    });
    let engine = ReplayEngine::new(config, options.verbose);

    let entries = match engine.load_log_file(&options.log_file) {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => {
            eprintln!("Error: {} has no entries", options.log_file);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    println!("Loaded {} entries from {}", entries.len(), options.log_file);

    let outcome = match options.mode {
        Mode::All => {
            engine.print_report(&engine.replay_all(&entries));
            Ok(())
        }
        Mode::Turns(turns) => engine
            .replay_turns(&entries, &turns)
            .map(|r| engine.print_report(&r)),
        Mode::Validate(expected) => engine
            .validate_expected_moves(&entries, &expected)
            .map(|()| println!("All {} expected move(s) matched", expected.len())),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("replay").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_parse_args_modes() {
        let options = parse_args(&args(&["log.jsonl", "--turns", "3,7", "--verbose"])).unwrap();
        assert_eq!(options.log_file, "log.jsonl");
        assert_eq!(options.config_path, "Agent.toml");
        assert!(options.verbose);
        assert!(matches!(options.mode, Mode::Turns(ref t) if t == &[3, 7]));

        let options = parse_args(&args(&["log.jsonl", "--validate", "3:1/2/up|1/2/down"])).unwrap();
        match options.mode {
            Mode::Validate(expected) => {
                assert_eq!(expected.len(), 1);
                assert_eq!(expected[0].0, 3);
                assert_eq!(expected[0].1.len(), 2);
            }
            _ => panic!("expected validate mode"),
        }
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["log.jsonl"])).is_err());
        assert!(parse_args(&args(&["log.jsonl", "--turns"])).is_err());
        assert!(parse_args(&args(&["log.jsonl", "--validate", "3-1/2/up"])).is_err());
        assert!(parse_args(&args(&["log.jsonl", "--all", "--bogus"])).is_err());
    }
}
