// Turn adapter for the Colosseum Survival agent
//
// Reads one TurnState JSON document per line on stdin and answers each with one
// MoveResponse JSON line on stdout. Logs go to stderr.
//
// Usage:
//   colosseum-agent [--config <path>] < turns.jsonl

use log::{error, info};
use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use colosseum_agent::bot::Bot;
use colosseum_agent::config::Config;
use colosseum_agent::types::TurnState;

fn parse_turn(line: &str, config: &Config) -> Result<TurnState, String> {
    let state: TurnState =
        serde_json::from_str(line).map_err(|e| format!("Failed to parse turn state: {}", e))?;
    state.validate(&config.arena)?;
    Ok(state)
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = match args.get(i + 1) {
                Some(path) => path,
                None => {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                }
            };
            Config::from_file(path).unwrap_or_else(|e| {
                eprintln!("Error: Could not load config from '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => Config::load_or_default(),
    };

    info!("Starting Colosseum agent...");
    let bot = Bot::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_num, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read input line {}: {}", line_num + 1, e);
                process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut state = match parse_turn(&line, bot.config()) {
            Ok(state) => state,
            Err(e) => {
                error!("Line {}: {}", line_num + 1, e);
                continue;
            }
        };

        let response = bot.respond(&mut state);
        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize response for line {}: {}", line_num + 1, e);
                continue;
            }
        };
        if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
            error!("Failed to write response for line {}: {}", line_num + 1, e);
            process::exit(1);
        }
    }

    info!("Input closed, shutting down");
}
