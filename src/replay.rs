// Replay module for analyzing recorded decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the decision procedure on each recorded state
// 3. Compare recorded vs replayed moves
// 4. Generate summary reports

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::LogEntry;
use crate::moves::is_legal_move;
use crate::types::{Direction, Move, Position};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u32,
    pub original_move: Move,
    pub replayed_move: Move,
    pub matches: bool,
    /// Whether the recorded move was legal for the recorded state
    pub original_legal: bool,
    pub original_score: f64,
    pub replayed_score: f64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub illegal: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    ///
    /// Debug logging is switched off so a replay never truncates the log it reads.
    pub fn new(mut config: Config, verbose: bool) -> Self {
        config.debug.enabled = false;
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let state = &entry.state;
        if self.verbose {
            info!("Replaying turn {}...", state.turn);
        }

        state
            .validate(&self.bot.config().arena)
            .map_err(|e| format!("Turn {}: {}", state.turn, e))?;

        let original_legal = is_legal_move(
            &state.board,
            state.my_pos,
            state.adv_pos,
            state.max_step,
            entry.chosen_move,
        );

        let start_time = Instant::now();
        let mut board = state.board.clone();
        let decision = self
            .bot
            .select_move(&mut board, state.my_pos, state.adv_pos, state.max_step);
        let computation_time = start_time.elapsed().as_millis();

        let matches = decision.chosen == entry.chosen_move;
        let result = ReplayResult {
            turn: state.turn,
            original_move: entry.chosen_move,
            replayed_move: decision.chosen,
            matches,
            original_legal,
            original_score: entry.score,
            replayed_score: decision.score(),
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (score: {:.3}, time: {}ms)",
                    state.turn, decision.chosen, result.replayed_score, computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (score: {:.3}, time: {}ms)",
                    state.turn, entry.chosen_move, decision.chosen, result.replayed_score, computation_time
                );
            }
        }
        if !original_legal {
            warn!("Turn {}: recorded move {} is not legal", state.turn, entry.chosen_move);
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.state.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.state.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let illegal = results.iter().filter(|r| !r.original_legal).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            illegal,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Illegal:        {}", stats.illegal);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} (score: {:.3}) → {} (score: {:.3}, time: {}ms)",
                    result.turn,
                    result.original_move,
                    result.original_score,
                    result.replayed_move,
                    result.replayed_score,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Move>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.state.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }

    /// Parses `row/col/dir`, e.g. `2/3/up`
    pub fn parse_move(s: &str) -> Result<Move, String> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(format!("Invalid move '{}'. Expected 'row/col/dir'", s));
        }

        let row = parts[0]
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("Invalid row '{}': {}", parts[0], e))?;
        let col = parts[1]
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("Invalid column '{}': {}", parts[1], e))?;
        let dir = Direction::parse(parts[2])?;

        Ok(Move::new(Position::new(row, col), dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(
            ReplayEngine::parse_move("2/3/up").unwrap(),
            Move::new(Position::new(2, 3), Direction::Up)
        );
        assert_eq!(
            ReplayEngine::parse_move(" 0/1/L ").unwrap(),
            Move::new(Position::new(0, 1), Direction::Left)
        );

        assert!(ReplayEngine::parse_move("2/3").is_err());
        assert!(ReplayEngine::parse_move("x/3/up").is_err());
        assert!(ReplayEngine::parse_move("2/3/north").is_err());
    }

    #[test]
    fn test_stats_on_empty_results() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let stats = engine.generate_stats(&[]);

        assert_eq!(stats.total_turns, 0);
        assert_eq!(stats.match_rate, 0.0);
    }
}
