//! Engine state management.
//!
//! Holds the current board position and engine options between commands,
//! and runs the minimax search for the `go` command. Output discipline:
//! protocol replies go to the writer (stdout in production), diagnostics
//! go to stderr.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use crate::board::Grid;
use crate::movegen::legal_moves;
use crate::protocol::moves::{format_move, parse_move};
use crate::protocol::ofen::parse_ofen;
use crate::search::search;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Option<Grid>,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates a new engine with no position set.
    pub fn new() -> Self {
        Engine {
            position: None,
            options: HashMap::new(),
        }
    }

    /// Resets all engine state for a new game.
    pub fn new_game(&mut self) {
        self.position = None;
    }

    /// Sets the current position from an optional OFEN string (`None` means
    /// the empty starting grid) plus a list of algebraic moves to apply.
    /// Returns an error message on failure; the previous position is kept.
    pub fn set_position(&mut self, ofen: Option<&str>, moves: &[String]) -> Result<(), String> {
        let mut grid = match ofen {
            Some(text) => {
                parse_ofen(text).map_err(|e| format!("failed to parse OFEN '{}': {}", text, e))?
            }
            None => Grid::new(),
        };

        for token in moves {
            let sq = parse_move(token).map_err(|e| format!("bad move '{}': {}", token, e))?;
            grid = grid
                .apply(sq)
                .map_err(|e| format!("cannot play '{}': {}", token, e))?;
        }

        self.position = Some(grid);
        Ok(())
    }

    /// Sets an engine option. The engine defines no options of its own but
    /// records any it is given.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the OXI handshake: writes id, protocol_version, and oxiok.
    pub fn handle_oxi<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name oxo {}", env!("CARGO_PKG_VERSION")).unwrap();
        writeln!(out, "id author oxo").unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "oxiok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `go` command: searches the current position (the empty
    /// grid if none was set), emits one `info` line, then the best move.
    ///
    /// The `info` score is the minimax value from X's perspective; depth is
    /// the number of plies left to fill the grid. A terminal position
    /// reports `bestmove (none)`.
    pub fn handle_go<W: Write>(&self, out: &mut W) {
        let grid = self.position.unwrap_or_default();

        let start = Instant::now();
        let result = search(&grid);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let depth = legal_moves(&grid).len();
        writeln!(
            out,
            "info depth {} nodes {} score {} time {}",
            depth, result.nodes, result.score, elapsed_ms
        )
        .unwrap();

        match result.best {
            Some(sq) => writeln!(out, "bestmove {}", format_move(sq)).unwrap(),
            None => writeln!(out, "bestmove (none)").unwrap(),
        }
        out.flush().unwrap();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
