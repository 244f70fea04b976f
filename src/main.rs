//! Oxo -- a perfect-play tic-tac-toe engine implementing the OXI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the OXI (Oxo Interface) convention.

use std::io::{self, BufRead};

use oxo::engine::Engine;
use oxo::protocol::parser::{parse_command, Command};

/// Runs the main OXI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Oxi => {
                engine.handle_oxi(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::Position { ofen, moves } => {
                if let Err(e) = engine.set_position(ofen.as_deref(), &moves) {
                    eprintln!("{}", e);
                }
            }
            Command::Go => {
                engine.handle_go(&mut out);
            }
            Command::Stop => {
                // Search is synchronous; nothing to interrupt.
            }
            Command::Quit => {
                break;
            }
        }
    }
}
