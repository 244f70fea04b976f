//! Exact minimax search.
//!
//! Explores the complete game tree with two mutually recursive value
//! functions. X is the maximizing side, O the minimizing side, and scores
//! are terminal utilities from X's perspective. There is no pruning and no
//! caching; the tree from the empty grid stays under 9! positions.

use crate::board::{Grid, Mark, Square};
use crate::movegen::legal_moves;

/// Outcome of a full search of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The optimal move, or `None` on a terminal position.
    pub best: Option<Square>,
    /// Minimax value of the position from X's perspective.
    pub score: i32,
    /// Number of positions visited, the root included.
    pub nodes: u64,
}

/// Searches a position to the end of the game.
///
/// The returned move is game-theoretically optimal for the side to move.
/// Among equally scored moves the first in row-major enumeration order is
/// kept, so the result is deterministic.
pub fn search(grid: &Grid) -> SearchResult {
    let mut nodes: u64 = 1;

    if grid.is_terminal() {
        return SearchResult {
            best: None,
            score: grid.utility(),
            nodes,
        };
    }

    let to_move = grid.to_move();
    let mut best: Option<Square> = None;
    let mut best_score = match to_move {
        Mark::X => i32::MIN,
        Mark::O => i32::MAX,
    };

    for sq in legal_moves(grid) {
        let child = grid.place(sq);
        let score = match to_move {
            Mark::X => min_value(&child, &mut nodes),
            Mark::O => max_value(&child, &mut nodes),
        };
        let improves = match to_move {
            Mark::X => score > best_score,
            Mark::O => score < best_score,
        };
        if improves {
            best_score = score;
            best = Some(sq);
        }
    }

    SearchResult {
        best,
        score: best_score,
        nodes,
    }
}

/// Returns the optimal move for the side to move, or `None` on a terminal
/// position.
pub fn best_move(grid: &Grid) -> Option<Square> {
    search(grid).best
}

/// Value of a position assuming the side to move maximizes.
fn max_value(grid: &Grid, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if grid.is_terminal() {
        return grid.utility();
    }
    let mut value = i32::MIN;
    for sq in legal_moves(grid) {
        value = value.max(min_value(&grid.place(sq), nodes));
    }
    value
}

/// Value of a position assuming the side to move minimizes.
fn min_value(grid: &Grid, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if grid.is_terminal() {
        return grid.utility();
    }
    let mut value = i32::MAX;
    for sq in legal_moves(grid) {
        value = value.min(max_value(&grid.place(sq), nodes));
    }
    value
}
