// Reachable move enumeration
//
// A player walks at most `max_step` cells through open sides, never through or
// onto the opponent, then raises a wall on any open side of the cell it stops on.

use std::collections::VecDeque;

use crate::types::{Board, Direction, Move, Position};

/// Enumerates every legal (cell, wall side) pair for the player at `my_pos`
///
/// The traversal is a breadth-first worklist seeded with `(my_pos, 0)`. A cell is
/// expanded again only when reached with a strictly smaller step count than any
/// earlier visit, so every cell is settled at its minimal distance. Neighbours are
/// queued in `Direction::all()` order, which makes the returned order (unique
/// moves, by first discovery) reproducible for downstream tie-breaking.
///
/// # Arguments
/// * `board` - Current walls
/// * `my_pos` - Acting player's cell; always included when it has an open side
/// * `adv_pos` - Opponent's cell; never entered or crossed
/// * `max_step` - Largest number of cells the player may walk
pub fn legal_moves(board: &Board, my_pos: Position, adv_pos: Position, max_step: usize) -> Vec<Move> {
    let cells = board.cell_count();
    let mut best_step: Vec<Option<usize>> = vec![None; cells];
    let mut recorded = vec![false; cells];
    let mut moves = Vec::new();

    let mut frontier = VecDeque::new();
    frontier.push_back((my_pos, 0usize));

    while let Some((pos, step)) = frontier.pop_front() {
        if pos == adv_pos || !board.in_bounds(&pos) {
            continue;
        }

        let idx = board.index_of(&pos);
        if matches!(best_step[idx], Some(seen) if seen <= step) {
            continue;
        }
        best_step[idx] = Some(step);

        if !recorded[idx] {
            recorded[idx] = true;
            for dir in Direction::all() {
                if !board.has_wall(&pos, dir) {
                    moves.push(Move::new(pos, dir));
                }
            }
        }

        if step + 1 > max_step {
            continue;
        }

        for dir in Direction::all() {
            if !board.has_wall(&pos, dir) {
                frontier.push_back((dir.apply(&pos), step + 1));
            }
        }
    }

    moves
}

/// Checks a single move against the enumerated set
pub fn is_legal_move(
    board: &Board,
    my_pos: Position,
    adv_pos: Position,
    max_step: usize,
    candidate: Move,
) -> bool {
    legal_moves(board, my_pos, adv_pos, max_step).contains(&candidate)
}
