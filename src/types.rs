// Colosseum Survival board types
// The board is an N x N grid; every cell carries a 4-bit wall mask, one bit per side.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::config::ArenaConfig;

/// Board cell coordinate. Rows grow downward, columns grow rightward.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Euclidean distance between two cells
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.distance_to_point((other.row as f64, other.col as f64))
    }

    /// Euclidean distance to a (row, col) point that may lie between cells
    pub fn distance_to_point(&self, point: (f64, f64)) -> f64 {
        let dr = self.row as f64 - point.0;
        let dc = self.col as f64 - point.1;
        (dr * dr + dc * dc).sqrt()
    }

    /// True when the two cells share a side
    pub fn is_adjacent(&self, other: &Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four sides of a cell. Discriminants match the wall-mask bit order.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// All directions in expansion order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Direction> {
        match idx {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// The side of the neighbouring cell that faces this one
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Unit (row, col) delta
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Calculates the neighbouring position in this direction
    pub fn apply(&self, pos: &Position) -> Position {
        let (dr, dc) = self.delta();
        Position::new(pos.row + dr, pos.col + dc)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }

    /// Parses either the long name or the single-letter form ("u", "r", "d", "l")
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "right" | "r" => Ok(Direction::Right),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// A turn's action: end on `pos` and raise the wall on side `dir` of that cell
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    pub pos: Position,
    pub dir: Direction,
}

impl Move {
    pub fn new(pos: Position, dir: Direction) -> Self {
        Move { pos, dir }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.dir.as_str())
    }
}

/// Wire form of a board: rows of cells, each cell `[up, right, down, left]`
pub type WallGrid = Vec<Vec<[bool; 4]>>;

/// N x N walled grid.
///
/// Walls are mirrored: a wall on the right side of (r, c) is also a wall on the
/// left side of (r, c + 1). `set_barrier` is the only mutator and keeps that
/// invariant; boards arriving over the wire are checked on deserialization.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "WallGrid", into = "WallGrid")]
pub struct Board {
    size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Creates a board with no walls at all
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Board {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates a board whose outer perimeter is walled, as in a fresh game
    pub fn with_border(size: usize) -> Self {
        let mut board = Board::new(size);
        let last = size as i32 - 1;
        for i in 0..size as i32 {
            board.set_barrier(Position::new(0, i), Direction::Up, true);
            board.set_barrier(Position::new(last, i), Direction::Down, true);
            board.set_barrier(Position::new(i, 0), Direction::Left, true);
            board.set_barrier(Position::new(i, last), Direction::Right, true);
        }
        board
    }

    /// Bordered board with up to `walls` extra interior walls at random cells
    ///
    /// Fewer walls are placed when the board runs out of open interior sides.
    pub fn random_arena<R: Rng + ?Sized>(size: usize, walls: usize, rng: &mut R) -> Self {
        let mut board = Board::with_border(size);
        let max_attempts = walls * 16 + 64;
        let mut placed = 0;
        let mut attempts = 0;

        while placed < walls && attempts < max_attempts {
            attempts += 1;
            let pos = Position::new(
                rng.random_range(0..size as i32),
                rng.random_range(0..size as i32),
            );
            let dir = Direction::all()[rng.random_range(0..4)];
            if board.has_wall(&pos, dir) {
                continue;
            }
            board.set_barrier(pos, dir, true);
            placed += 1;
        }

        board
    }

    /// Picks two distinct cells for the players
    pub fn random_positions<R: Rng + ?Sized>(&self, rng: &mut R) -> (Position, Position) {
        assert!(self.cell_count() >= 2, "need at least two cells for two players");
        let n = self.size as i32;
        let first = Position::new(rng.random_range(0..n), rng.random_range(0..n));
        loop {
            let second = Position::new(rng.random_range(0..n), rng.random_range(0..n));
            if second != first {
                return (first, second);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: &Position) -> bool {
        let n = self.size as i32;
        pos.row >= 0 && pos.row < n && pos.col >= 0 && pos.col < n
    }

    /// Row-major cell index. Caller guarantees `pos` is in bounds.
    pub fn index_of(&self, pos: &Position) -> usize {
        debug_assert!(self.in_bounds(pos), "{} is off a {}x{} board", pos, self.size, self.size);
        pos.row as usize * self.size + pos.col as usize
    }

    /// Wall mask of a cell, bit i set when side `Direction::from_index(i)` is walled
    pub fn mask(&self, pos: &Position) -> u8 {
        self.cells[self.index_of(pos)]
    }

    pub fn has_wall(&self, pos: &Position, dir: Direction) -> bool {
        self.mask(pos) & dir.bit() != 0
    }

    /// Number of walled sides of a cell
    pub fn wall_count(&self, pos: &Position) -> u32 {
        self.mask(pos).count_ones()
    }

    /// Geometric center in (row, col), possibly between cells
    pub fn center(&self) -> (f64, f64) {
        let c = (self.size as f64 - 1.0) / 2.0;
        (c, c)
    }

    /// Raises or removes the wall on side `dir` of `pos`, mirrored onto the neighbour
    pub fn set_barrier(&mut self, pos: Position, dir: Direction, present: bool) {
        self.set_side(pos, dir, present);
        let neighbour = dir.apply(&pos);
        if self.in_bounds(&neighbour) {
            self.set_side(neighbour, dir.opposite(), present);
        }
    }

    fn set_side(&mut self, pos: Position, dir: Direction, present: bool) {
        let idx = self.index_of(&pos);
        if present {
            self.cells[idx] |= dir.bit();
        } else {
            self.cells[idx] &= !dir.bit();
        }
    }

    /// Raises the wall of `wall` for as long as the returned guard lives
    pub fn place_wall_scoped(&mut self, wall: Move) -> WallGuard<'_> {
        debug_assert!(
            !self.has_wall(&wall.pos, wall.dir),
            "wall {} is already standing",
            wall
        );
        self.set_barrier(wall.pos, wall.dir, true);
        WallGuard {
            board: self,
            wall,
            kept: false,
        }
    }

    /// Checks that every interior wall has its mirror on the neighbouring cell
    pub fn is_mirrored(&self) -> bool {
        let n = self.size as i32;
        for row in 0..n {
            for col in 0..n {
                let pos = Position::new(row, col);
                for dir in Direction::all() {
                    let neighbour = dir.apply(&pos);
                    if self.in_bounds(&neighbour)
                        && self.has_wall(&pos, dir) != self.has_wall(&neighbour, dir.opposite())
                    {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl TryFrom<WallGrid> for Board {
    type Error = String;

    fn try_from(grid: WallGrid) -> Result<Self, Self::Error> {
        let size = grid.len();
        if size == 0 {
            return Err("Board must have at least one row".to_string());
        }

        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in grid.iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "Board must be square: row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    size
                ));
            }
            for sides in row {
                let mask = sides
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &walled)| if walled { acc | (1 << i) } else { acc });
                cells.push(mask);
            }
        }

        let board = Board { size, cells };
        if !board.is_mirrored() {
            return Err("Board walls are not mirrored between adjacent cells".to_string());
        }
        Ok(board)
    }
}

impl From<Board> for WallGrid {
    fn from(board: Board) -> Self {
        board
            .cells
            .chunks(board.size)
            .map(|row| {
                row.iter()
                    .map(|&mask| {
                        let mut sides = [false; 4];
                        for (i, side) in sides.iter_mut().enumerate() {
                            *side = mask & (1 << i) != 0;
                        }
                        sides
                    })
                    .collect()
            })
            .collect()
    }
}

/// Scoped wall placement.
///
/// The wall stands while the guard is alive and is taken down again on drop,
/// unless `keep` is called.
pub struct WallGuard<'a> {
    board: &'a mut Board,
    wall: Move,
    kept: bool,
}

impl<'a> WallGuard<'a> {
    /// The board with the wall standing
    pub fn board(&self) -> &Board {
        &*self.board
    }

    /// Leaves the wall in place
    pub fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for WallGuard<'_> {
    fn drop(&mut self) {
        if !self.kept {
            self.board.set_barrier(self.wall.pos, self.wall.dir, false);
        }
    }
}

/// One turn as handed over by the game loop
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TurnState {
    #[serde(default)]
    pub turn: u32,
    pub board: Board,
    pub my_pos: Position,
    pub adv_pos: Position,
    pub max_step: usize,
}

impl TurnState {
    /// Checks the preconditions the decision procedure relies on
    pub fn validate(&self, arena: &ArenaConfig) -> Result<(), String> {
        let size = self.board.size();
        if size < arena.min_board_size || size > arena.max_board_size {
            return Err(format!(
                "Board size {} outside supported range {}..={}",
                size, arena.min_board_size, arena.max_board_size
            ));
        }
        if !self.board.in_bounds(&self.my_pos) {
            return Err(format!("Own position {} is off the board", self.my_pos));
        }
        if !self.board.in_bounds(&self.adv_pos) {
            return Err(format!("Opponent position {} is off the board", self.adv_pos));
        }
        if self.my_pos == self.adv_pos {
            return Err(format!("Both players stand on {}", self.my_pos));
        }
        if self.board.wall_count(&self.my_pos) == 4 {
            return Err(format!("Player at {} has no open side", self.my_pos));
        }
        Ok(())
    }
}

/// Reply to the game loop
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MoveResponse {
    pub pos: Position,
    pub dir: Direction,
    pub score: f64,
    pub elapsed_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_direction_tables() {
        for dir in Direction::all() {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(Direction::from_index(dir.index()), Some(dir));
            let (dr, dc) = dir.delta();
            let (or, oc) = dir.opposite().delta();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("up").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("R").unwrap(), Direction::Right);
        assert_eq!(Direction::parse("Down").unwrap(), Direction::Down);
        assert_eq!(Direction::parse("l").unwrap(), Direction::Left);
        assert!(Direction::parse("north").is_err());
    }

    #[test]
    fn test_set_barrier_is_mirrored() {
        let mut board = Board::new(3);
        let pos = Position::new(1, 1);

        board.set_barrier(pos, Direction::Right, true);
        assert!(board.has_wall(&pos, Direction::Right));
        assert!(board.has_wall(&Position::new(1, 2), Direction::Left));
        assert!(board.is_mirrored());

        board.set_barrier(pos, Direction::Right, false);
        assert_eq!(board, Board::new(3));
    }

    #[test]
    fn test_border_wall_has_no_mirror() {
        let mut board = Board::new(2);
        board.set_barrier(Position::new(0, 0), Direction::Up, true);
        assert_eq!(board.wall_count(&Position::new(0, 0)), 1);
        assert!(board.is_mirrored());
    }

    #[test]
    fn test_with_border_walls_perimeter_only() {
        let board = Board::with_border(4);
        assert_eq!(board.wall_count(&Position::new(0, 0)), 2);
        assert_eq!(board.wall_count(&Position::new(0, 1)), 1);
        assert_eq!(board.wall_count(&Position::new(1, 1)), 0);
        assert_eq!(board.wall_count(&Position::new(3, 3)), 2);
        assert!(board.has_wall(&Position::new(2, 3), Direction::Right));
    }

    #[test]
    fn test_scoped_wall_is_removed_on_drop() {
        let mut board = Board::with_border(5);
        let before = board.clone();
        let wall = Move::new(Position::new(2, 2), Direction::Down);

        {
            let guard = board.place_wall_scoped(wall);
            assert!(guard.board().has_wall(&wall.pos, wall.dir));
            assert!(guard.board().has_wall(&Position::new(3, 2), Direction::Up));
        }

        assert_eq!(board, before);
    }

    #[test]
    fn test_scoped_wall_can_be_kept() {
        let mut board = Board::new(3);
        let wall = Move::new(Position::new(0, 0), Direction::Right);

        board.place_wall_scoped(wall).keep();

        assert!(board.has_wall(&wall.pos, wall.dir));
        assert!(board.has_wall(&Position::new(0, 1), Direction::Left));
    }

    #[test]
    fn test_wall_grid_conversion_preserves_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::random_arena(6, 10, &mut rng);

        let grid: WallGrid = board.clone().into();
        let back = Board::try_from(grid).expect("generated board should be valid");

        assert_eq!(back, board);
    }

    #[test]
    fn test_asymmetric_wall_grid_is_rejected() {
        let mut grid: WallGrid = Board::new(2).into();
        grid[0][0][1] = true; // right of (0,0) without left of (0,1)

        let result = Board::try_from(grid);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_square_wall_grid_is_rejected() {
        let grid: WallGrid = vec![vec![[false; 4]; 3], vec![[false; 4]; 2]];
        assert!(Board::try_from(grid).is_err());
        assert!(Board::try_from(WallGrid::new()).is_err());
    }

    #[test]
    fn test_board_json_uses_wall_grid() {
        let mut board = Board::new(2);
        board.set_barrier(Position::new(0, 0), Direction::Down, true);

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            "[[[false,false,true,false],[false,false,false,false]],\
             [[true,false,false,false],[false,false,false,false]]]"
        );

        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_random_arena_keeps_invariant() {
        let mut rng = StdRng::seed_from_u64(42);
        for size in 2..9 {
            let board = Board::random_arena(size, size * 2, &mut rng);
            assert!(board.is_mirrored());
            let (a, b) = board.random_positions(&mut rng);
            assert_ne!(a, b);
            assert!(board.in_bounds(&a) && board.in_bounds(&b));
        }
    }

    #[test]
    fn test_turn_state_validation() {
        let arena = ArenaConfig {
            min_board_size: 2,
            max_board_size: 12,
        };
        let mut state = TurnState {
            turn: 0,
            board: Board::with_border(4),
            my_pos: Position::new(0, 0),
            adv_pos: Position::new(3, 3),
            max_step: 2,
        };
        assert!(state.validate(&arena).is_ok());

        state.adv_pos = Position::new(0, 0);
        assert!(state.validate(&arena).is_err());

        state.adv_pos = Position::new(4, 0);
        assert!(state.validate(&arena).is_err());

        state.adv_pos = Position::new(1, 0);
        state.board = Board::with_border(13);
        assert!(state.validate(&arena).is_err());

        // Mirrored board, but the player is boxed in on every side
        state.board = Board::with_border(4);
        state.board.set_barrier(Position::new(0, 0), Direction::Right, true);
        state.board.set_barrier(Position::new(0, 0), Direction::Down, true);
        let err = state.validate(&arena).unwrap_err();
        assert!(err.contains("no open side"), "unexpected error: {}", err);
    }

    #[test]
    fn test_distance_and_adjacency() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to_point((1.5, 1.5)) - (2.25f64 + 6.25).sqrt()).abs() < 1e-12);
        assert_eq!(Position::new(2, 2).distance_to_point((2.0, 2.0)), 0.0);
        assert!(a.is_adjacent(&Position::new(0, 1)));
        assert!(!a.is_adjacent(&Position::new(1, 1)));
        assert!(!a.is_adjacent(&a));
    }
}
