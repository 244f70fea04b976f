//! Game-tree search.
//!
//! Finds optimal moves by exhaustive minimax over the full game tree.

pub mod minimax;

pub use minimax::{best_move, search, SearchResult};
