// Colosseum Survival agent
//
// Each turn the bot lists every reachable (cell, wall) pair, raises each wall in
// turn, scores the resulting board and takes the wall down again. The best score
// wins; a move that wins the game outright is taken on the spot.

use log::{debug, info};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::heuristic::{Evaluation, Evaluator};
use crate::moves::legal_moves;
use crate::types::{Board, Move, MoveResponse, Position, TurnState};

/// Outcome of one turn's selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub chosen: Move,
    pub evaluation: Evaluation,
    /// Number of legal moves enumerated this turn
    pub candidates: usize,
    /// Number of moves actually scored (fewer when a win cut the turn short)
    pub evaluated: usize,
}

impl Decision {
    pub fn score(&self) -> f64 {
        self.evaluation.total()
    }

    pub fn is_winning(&self) -> bool {
        self.evaluation.is_win()
    }
}

/// Stateless move selector; one call per turn
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Picks this turn's move
    ///
    /// `board` is left exactly as it came in, except when the chosen move wins the
    /// game: then its wall is left standing.
    pub fn decide_move(
        &self,
        board: &mut Board,
        my_pos: Position,
        adv_pos: Position,
        max_step: usize,
    ) -> Move {
        self.select_move(board, my_pos, adv_pos, max_step).chosen
    }

    /// Picks this turn's move and reports how it was scored
    ///
    /// # Panics
    /// On caller contract violations: positions off the board, both players on
    /// one cell, or no legal move at all (which a mirrored board never produces).
    pub fn select_move(
        &self,
        board: &mut Board,
        my_pos: Position,
        adv_pos: Position,
        max_step: usize,
    ) -> Decision {
        assert!(
            board.in_bounds(&my_pos) && board.in_bounds(&adv_pos),
            "player positions {} and {} must lie on the {}x{} board",
            my_pos,
            adv_pos,
            board.size(),
            board.size()
        );
        assert_ne!(my_pos, adv_pos, "players cannot share a cell");

        let candidates = legal_moves(board, my_pos, adv_pos, max_step);
        debug!("Evaluating {} legal moves from {}", candidates.len(), my_pos);

        let evaluator = Evaluator::new(&self.config.scores);
        let mut best: Option<(Move, Evaluation)> = None;

        for (evaluated, &candidate) in candidates.iter().enumerate() {
            let guard = board.place_wall_scoped(candidate);
            let evaluation = evaluator.score(guard.board(), candidate.pos, adv_pos, candidate.dir);

            debug!(
                "  {} -> {:.3} ({:?}, safety {:.1}, center {:.3}, proximity {:.3}, aggression {:.1})",
                candidate,
                evaluation.total(),
                evaluation.terminal,
                evaluation.safety,
                evaluation.centrality,
                evaluation.proximity,
                evaluation.aggression
            );

            if evaluation.is_win() {
                guard.keep();
                info!("Winning move {} found after {} candidates", candidate, evaluated + 1);
                return Decision {
                    chosen: candidate,
                    evaluation,
                    candidates: candidates.len(),
                    evaluated: evaluated + 1,
                };
            }
            drop(guard);

            let improves = match &best {
                Some((_, current)) => evaluation.total() > current.total(),
                None => true,
            };
            if improves {
                best = Some((candidate, evaluation));
            }
        }

        let (chosen, evaluation) = match best {
            Some(found) => found,
            None => panic!(
                "no legal move from {} with opponent at {}; board walls are inconsistent",
                my_pos, adv_pos
            ),
        };

        Decision {
            chosen,
            evaluation,
            candidates: candidates.len(),
            evaluated: candidates.len(),
        }
    }

    /// Handles one turn from the game loop and produces the wire reply
    ///
    /// The pre-move state goes to the debug log when it is enabled.
    pub fn respond(&self, state: &mut TurnState) -> MoveResponse {
        let start_time = Instant::now();
        let snapshot = if self.debug_logger.is_enabled() {
            Some(state.clone())
        } else {
            None
        };

        info!("Turn {}: Computing move", state.turn);

        let decision = self.select_move(&mut state.board, state.my_pos, state.adv_pos, state.max_step);
        let elapsed_ms = start_time.elapsed().as_millis();

        info!(
            "Turn {}: Chose {} (score: {:.3}, candidates: {}, evaluated: {}, time: {}ms)",
            state.turn,
            decision.chosen,
            decision.score(),
            decision.candidates,
            decision.evaluated,
            elapsed_ms
        );

        if let Some(snapshot) = snapshot {
            self.debug_logger.log_move(snapshot, decision.chosen, decision.score());
        }

        MoveResponse {
            pos: decision.chosen.pos,
            dir: decision.chosen.dir,
            score: decision.score(),
            elapsed_ms,
        }
    }
}
