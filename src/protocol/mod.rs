//! OXI protocol handling.
//!
//! This module implements parsing and serialization for the OXI (Oxo
//! Interface) protocol, including OFEN position encoding, algebraic square
//! notation for moves, and the command parser for the main loop.

pub mod moves;
pub mod ofen;
pub mod parser;

pub use moves::{format_move, parse_move, MoveError};
pub use ofen::{encode_ofen, parse_ofen, OfenError};
pub use parser::{parse_command, Command};
