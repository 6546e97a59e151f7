// Debug logging module for per-turn decision records
//
// When enabled, every decision is appended to a JSONL file together with the
// state it was made from, so the replay tool can re-run it later.

use log::error;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;

use crate::types::{Move, TurnState};

/// Represents a single debug log entry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    /// State before the move was applied
    pub state: TurnState,
    pub chosen_move: Move,
    pub score: f64,
    pub timestamp: String,
}

/// Debug logger state; the file is `None` when logging is off
pub struct DebugLogger {
    file: Mutex<Option<File>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Mutex::new(Some(file)),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Mutex::new(None),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one decision record; failures are logged and otherwise ignored
    pub fn log_move(&self, state: TurnState, chosen_move: Move, score: f64) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            state,
            chosen_move,
            score,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let json_line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
                return;
            }
        };

        let mut file_guard = self.file.lock();
        if let Some(file) = file_guard.as_mut() {
            if let Err(e) = writeln!(file, "{}", json_line) {
                error!("Failed to write debug log entry: {}", e);
            } else if let Err(e) = file.flush() {
                error!("Failed to flush debug log: {}", e);
            }
        }
    }
}
