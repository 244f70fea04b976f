//! OXI command parser.
//!
//! Parses incoming OXI protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

/// A parsed server-to-engine OXI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the OXI protocol handshake.
    Oxi,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the board position: `position start | position ofen <OFEN>`,
    /// optionally followed by `moves <m1> <m2> ...` in algebraic notation.
    Position {
        /// `None` means the empty starting grid.
        ofen: Option<String>,
        /// Moves to apply from the base position, unparsed.
        moves: Vec<String>,
    },

    /// Begin calculating the best move for the current position.
    Go,

    /// Interrupt the current search immediately.
    Stop,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "oxi" => Some(Command::Oxi),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "stop" => Some(Command::Stop),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "go" => parse_go(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    // Find the "value" keyword to split name from value.
    // The name can be multi-word in theory (UCI allows it), but we keep it simple.
    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => {
            let name = tokens[2..].join(" ");
            (name, None)
        }
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position start|ofen <OFEN> [moves <m1> <m2> ...]`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position start|ofen <OFEN> [moves ...]'");
        return None;
    }

    let (ofen, rest) = match tokens[1] {
        "start" => (None, &tokens[2..]),
        "ofen" => {
            if tokens.len() < 3 {
                eprintln!("malformed position: 'ofen' needs a position string");
                return None;
            }
            // OFEN is a single token (no spaces) following "ofen"
            (Some(tokens[2].to_string()), &tokens[3..])
        }
        other => {
            eprintln!("malformed position: unknown base '{}'", other);
            return None;
        }
    };

    let moves = match rest.first() {
        None => Vec::new(),
        Some(&"moves") => rest[1..].iter().map(|t| t.to_string()).collect(),
        Some(other) => {
            eprintln!("malformed position: expected 'moves', got '{}'", other);
            return None;
        }
    };

    Some(Command::Position { ofen, moves })
}

/// Parses `go`. The search is exhaustive and synchronous, so constraints
/// like `movetime` are accepted but ignored with a warning.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    for token in &tokens[1..] {
        eprintln!("ignoring go parameter: '{}'", token);
    }
    Some(Command::Go)
}
