//! Connectivity oracle tests
//!
//! Terminal detection, region sizes, and the mirrored wall toggle.

use colosseum_agent::connectivity::{evaluate_endgame, Outcome};
use colosseum_agent::types::{Board, Direction, Move, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_wall_free_board_not_ended() {
    for n in 2..=10usize {
        let board = Board::new(n);
        let report = evaluate_endgame(&board, Position::new(0, 0), Position::new(n as i32 - 1, 0));
        assert_eq!(report.outcome, Outcome::NotEnded, "board size {}", n);
        assert_eq!(report.region_a, n * n);
    }
}

#[test]
fn test_fully_walled_row_boundary_ends_game() {
    for n in 2..=8usize {
        for boundary in 0..n as i32 - 1 {
            let mut board = Board::with_border(n);
            for col in 0..n as i32 {
                board.set_barrier(Position::new(boundary, col), Direction::Down, true);
            }

            let a = Position::new(boundary, 0);
            let b = Position::new(boundary + 1, n as i32 - 1);
            let report = evaluate_endgame(&board, a, b);

            assert!(report.is_terminal());
            let above = (boundary as usize + 1) * n;
            assert_eq!(report.region_a, above);
            assert_eq!(report.region_b, n * n - above);
            assert_eq!(report.region_a + report.region_b, n * n);
        }
    }
}

#[test]
fn test_bisected_four_by_four_is_a_tie() {
    let mut board = Board::with_border(4);
    for row in 0..4 {
        board.set_barrier(Position::new(row, 1), Direction::Right, true);
    }

    let report = evaluate_endgame(&board, Position::new(1, 0), Position::new(2, 3));

    assert_eq!(report.outcome, Outcome::Tie);
    assert_eq!(report.region_a, 8);
    assert_eq!(report.region_b, 8);
    assert_eq!(report.isolated, 0);
}

#[test]
fn test_region_counts_account_for_every_cell() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..300 {
        let n = rng.random_range(2..10);
        let walls = rng.random_range(0..=3 * n);
        let board = Board::random_arena(n, walls, &mut rng);
        let (a, b) = board.random_positions(&mut rng);

        let report = evaluate_endgame(&board, a, b);
        assert_eq!(report.accounted_cells(), n * n);
        if !report.is_terminal() {
            assert_eq!(report.region_a, report.region_b);
        }
    }
}

#[test]
fn test_outcome_is_symmetric_in_players() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let n = rng.random_range(2..8);
        let board = Board::random_arena(n, 3 * n, &mut rng);
        let (a, b) = board.random_positions(&mut rng);

        let forward = evaluate_endgame(&board, a, b);
        let backward = evaluate_endgame(&board, b, a);

        let flipped = match forward.outcome {
            Outcome::AWins => Outcome::BWins,
            Outcome::BWins => Outcome::AWins,
            other => other,
        };
        assert_eq!(backward.outcome, flipped);
        assert_eq!(backward.region_a, forward.region_b);
        assert_eq!(backward.region_b, forward.region_a);
    }
}

#[test]
fn test_wall_toggle_restores_board_bit_for_bit() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..100 {
        let n = rng.random_range(2..9);
        let mut board = Board::random_arena(n, n, &mut rng);
        let before = board.clone();

        let pos = Position::new(rng.random_range(0..n as i32), rng.random_range(0..n as i32));
        let dir = Direction::all()[rng.random_range(0..4)];
        if board.has_wall(&pos, dir) {
            continue;
        }

        board.set_barrier(pos, dir, true);
        assert!(board.is_mirrored());
        assert_ne!(board, before);
        board.set_barrier(pos, dir, false);
        assert_eq!(board, before);

        drop(board.place_wall_scoped(Move::new(pos, dir)));
        assert_eq!(board, before);
    }
}

#[test]
fn test_oracle_does_not_touch_board() {
    let mut rng = StdRng::seed_from_u64(8);
    let board = Board::random_arena(7, 14, &mut rng);
    let before = board.clone();
    let (a, b) = board.random_positions(&mut rng);

    let _ = evaluate_endgame(&board, a, b);

    assert_eq!(board, before);
}
