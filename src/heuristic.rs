// Candidate move scoring
//
// A candidate is scored on the board as it stands once its wall is raised. The
// total is the plain sum of five independent terms.

use crate::config::ScoresConfig;
use crate::connectivity::{evaluate_endgame, Outcome};
use crate::types::{Board, Direction, Position};

/// Terminal classification of a candidate, from the acting player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Win,
    Loss,
    Tie,
    NotEnded,
}

/// Score of one candidate with its individual terms kept for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub terminal: Terminal,
    pub terminal_score: f64,
    pub safety: f64,
    pub centrality: f64,
    pub proximity: f64,
    pub aggression: f64,
}

impl Evaluation {
    pub fn total(&self) -> f64 {
        self.terminal_score + self.safety + self.centrality + self.proximity + self.aggression
    }

    pub fn is_win(&self) -> bool {
        self.terminal == Terminal::Win
    }
}

/// Heuristic evaluator over a borrowed score table
pub struct Evaluator<'a> {
    scores: &'a ScoresConfig,
}

impl<'a> Evaluator<'a> {
    pub fn new(scores: &'a ScoresConfig) -> Self {
        Evaluator { scores }
    }

    /// Scores ending on `candidate` having walled side `dir`
    ///
    /// `board` must already carry the new wall. The board is only read.
    pub fn score(&self, board: &Board, candidate: Position, adv_pos: Position, dir: Direction) -> Evaluation {
        let terminal = self.terminal(board, candidate, adv_pos);
        Evaluation {
            terminal,
            terminal_score: self.terminal_score(terminal),
            safety: self.safety(board, candidate),
            centrality: self.centrality(board, candidate),
            proximity: self.proximity(candidate, adv_pos),
            aggression: self.aggression(candidate, adv_pos, dir),
        }
    }

    /// Runs the connectivity check with the acting player as side A
    pub fn terminal(&self, board: &Board, candidate: Position, adv_pos: Position) -> Terminal {
        match evaluate_endgame(board, candidate, adv_pos).outcome {
            Outcome::NotEnded => Terminal::NotEnded,
            Outcome::AWins => Terminal::Win,
            Outcome::BWins => Terminal::Loss,
            Outcome::Tie => Terminal::Tie,
        }
    }

    pub fn terminal_score(&self, terminal: Terminal) -> f64 {
        match terminal {
            Terminal::Win => self.scores.win,
            Terminal::Loss => self.scores.loss,
            Terminal::Tie => self.scores.tie,
            Terminal::NotEnded => self.scores.not_ended,
        }
    }

    /// Penalises standing in a cell boxed in on too many sides
    pub fn safety(&self, board: &Board, candidate: Position) -> f64 {
        if board.wall_count(&candidate) >= self.scores.unsafe_wall_threshold {
            self.scores.unsafe_penalty
        } else {
            0.0
        }
    }

    /// Rewards cells near the middle of the board
    pub fn centrality(&self, board: &Board, candidate: Position) -> f64 {
        let dist = candidate.distance_to_point(board.center());

        if dist == 0.0 {
            self.scores.center_bonus
        } else {
            self.scores.center_weight / dist
        }
    }

    /// Rewards closing in on the opponent
    pub fn proximity(&self, candidate: Position, adv_pos: Position) -> f64 {
        let dist = candidate.distance_to(&adv_pos);
        if dist == 0.0 {
            // Only reachable through a caller bug; both players on one cell
            return 0.0;
        }
        self.scores.proximity_weight / dist
    }

    /// Rewards walling the side that faces an adjacent opponent
    pub fn aggression(&self, candidate: Position, adv_pos: Position, dir: Direction) -> f64 {
        if candidate.is_adjacent(&adv_pos) && dir.apply(&candidate) == adv_pos {
            self.scores.aggression_bonus
        } else {
            0.0
        }
    }
}
