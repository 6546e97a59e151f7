// Terminal-state detection
//
// The game ends once no open path joins the two players. Regions are computed
// with a union-find over all N*N cells, rebuilt from scratch on every call.

use crate::types::{Board, Direction, Position};

/// Array-backed disjoint-set over cell indices
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `len` singleton sets
    pub fn new(len: usize) -> Self {
        DisjointSet {
            parent: (0..len).collect(),
        }
    }

    /// Returns the root of `x`, pointing every node on the way straight at it
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merges the sets of `a` and `b` by attaching `a`'s root under `b`'s root
    pub fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_a] = root_b;
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// Game result seen from player A
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NotEnded,
    AWins,
    BWins,
    Tie,
}

/// Result of a connectivity check.
///
/// `region_a`/`region_b` are the sizes of the regions holding each player; while
/// the game is still running both name the same shared region. `isolated`
/// counts cells outside every player region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndgameReport {
    pub outcome: Outcome,
    pub region_a: usize,
    pub region_b: usize,
    pub isolated: usize,
}

impl EndgameReport {
    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::NotEnded
    }

    /// Cells accounted for by the report; always the full board
    pub fn accounted_cells(&self) -> usize {
        if self.is_terminal() {
            self.region_a + self.region_b + self.isolated
        } else {
            self.region_a + self.isolated
        }
    }
}

/// Decides whether `a` and `b` are walled apart and who holds more territory
///
/// Only the right and down sides of each cell are inspected: walls are mirrored,
/// so every open passage is seen exactly once.
pub fn evaluate_endgame(board: &Board, a: Position, b: Position) -> EndgameReport {
    let n = board.size() as i32;
    let mut sets = DisjointSet::new(board.cell_count());

    for row in 0..n {
        for col in 0..n {
            let pos = Position::new(row, col);
            let idx = board.index_of(&pos);
            for dir in [Direction::Right, Direction::Down] {
                let next = dir.apply(&pos);
                if board.in_bounds(&next) && !board.has_wall(&pos, dir) {
                    sets.union(idx, board.index_of(&next));
                }
            }
        }
    }

    let root_a = sets.find(board.index_of(&a));
    let root_b = sets.find(board.index_of(&b));

    let mut region_a = 0;
    let mut region_b = 0;
    for idx in 0..sets.len() {
        let root = sets.find(idx);
        if root == root_a {
            region_a += 1;
        } else if root == root_b {
            region_b += 1;
        }
    }

    if root_a == root_b {
        return EndgameReport {
            outcome: Outcome::NotEnded,
            region_a,
            region_b: region_a,
            isolated: board.cell_count() - region_a,
        };
    }

    let outcome = if region_a > region_b {
        Outcome::AWins
    } else if region_a < region_b {
        Outcome::BWins
    } else {
        Outcome::Tie
    };

    EndgameReport {
        outcome,
        region_a,
        region_b,
        isolated: board.cell_count() - region_a - region_b,
    }
}
