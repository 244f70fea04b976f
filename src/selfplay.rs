//! Self-play game generation.
//!
//! Plays batches of full games with the minimax engine on one side and a
//! configurable opponent on the other, alternating which mark the engine
//! takes. Records the move list, final position, and outcome per game for
//! JSONL output. Games are independent, so batches can run sequentially or
//! on a rayon thread pool; per-game RNGs are seeded from the base seed plus
//! the game index, making both modes produce the same games.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{Grid, Mark};
use crate::movegen::random_move;
use crate::protocol::moves::format_move;
use crate::protocol::ofen::encode_ofen;
use crate::search::best_move;

/// The opponent the engine faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    /// Uniformly random legal mover.
    Random,
    /// A second minimax player.
    Perfect,
}

impl Opponent {
    /// Parses an opponent from its CLI name.
    pub fn from_name(name: &str) -> Option<Opponent> {
        match name {
            "random" => Some(Opponent::Random),
            "perfect" => Some(Opponent::Perfect),
            _ => None,
        }
    }
}

/// Configuration for self-play game generation.
#[derive(Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Opponent the engine plays against.
    pub opponent: Opponent,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 100,
            opponent: Opponent::Random,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Result of a game from the engine's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Returns the lowercase outcome name for log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Loss => "loss",
        }
    }
}

/// A complete self-play game record, one JSONL line each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// The mark the engine played, 'X' or 'O'.
    pub engine_side: char,
    /// Moves in algebraic notation, in play order.
    pub moves: Vec<String>,
    /// OFEN of the final position.
    pub final_ofen: String,
    /// The winning mark, or `None` for a draw.
    pub winner: Option<char>,
    /// Number of moves played.
    pub plies: usize,
    /// Result from the engine's side.
    pub outcome: Outcome,
}

/// Plays a single game and returns its record.
///
/// The engine takes X on even game IDs and O on odd ones, so batches cover
/// both sides evenly. Only the opponent consumes randomness.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let engine_side = if game_id % 2 == 0 { Mark::X } else { Mark::O };

    let mut grid = Grid::new();
    let mut moves: Vec<String> = Vec::new();

    while !grid.is_terminal() {
        let sq = if grid.to_move() == engine_side {
            best_move(&grid).expect("non-terminal grid has a best move")
        } else {
            match config.opponent {
                Opponent::Random => {
                    random_move(&grid, rng).expect("non-terminal grid has a legal move")
                }
                Opponent::Perfect => best_move(&grid).expect("non-terminal grid has a best move"),
            }
        };

        moves.push(format_move(sq));
        grid = grid.apply(sq).expect("generated move is legal");
    }

    let winner = grid.winner();
    let outcome = match winner {
        None => Outcome::Draw,
        Some(mark) if mark == engine_side => Outcome::Win,
        Some(_) => Outcome::Loss,
    };

    GameRecord {
        game_id,
        engine_side: engine_side.ofen_char(),
        plies: moves.len(),
        moves,
        final_ofen: encode_ofen(&grid),
        winner: winner.map(|m| m.ofen_char()),
        outcome,
    }
}

/// Creates the RNG for one game: seeded from the base seed plus the game
/// index, or from entropy when the seed is 0.
fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs self-play generation, producing one record per game.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed record.
///
/// This allows the caller to process games incrementally (e.g. write to
/// disk) rather than waiting for the whole batch. In parallel mode records
/// arrive in completion order, not game-ID order.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config, i);
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            eprintln!(
                "game {}/{}: {} as {} in {} plies",
                i + 1,
                config.num_games,
                game.outcome.as_str(),
                game.engine_side,
                game.plies,
            );
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    // Build thread pool with configured thread count.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = game_rng(&config_clone, i);
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        eprintln!(
                            "game {}/{}: {} as {} in {} plies",
                            n,
                            config_clone.num_games,
                            game.outcome.as_str(),
                            game.engine_side,
                            game.plies,
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the main thread and pass to callback.
    for game in rx {
        on_game(game);
    }

    handle.join().expect("selfplay worker thread panicked");
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut counts = [0usize; 3];
    let mut by_side = [[0usize; 3]; 2];
    let mut total_plies = 0usize;

    for game in games {
        let outcome_idx = match game.outcome {
            Outcome::Win => 0,
            Outcome::Draw => 1,
            Outcome::Loss => 2,
        };
        let side_idx = if game.engine_side == 'X' { 0 } else { 1 };
        counts[outcome_idx] += 1;
        by_side[side_idx][outcome_idx] += 1;
        total_plies += game.plies;
    }

    let pct = |n: usize| 100.0 * n as f64 / total.max(1) as f64;

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!(
        "Avg plies/game: {:.1}",
        total_plies as f64 / total.max(1) as f64
    );
    eprintln!("Wins:   {} ({:.1}%)", counts[0], pct(counts[0]));
    eprintln!("Draws:  {} ({:.1}%)", counts[1], pct(counts[1]));
    eprintln!("Losses: {} ({:.1}%)", counts[2], pct(counts[2]));
    for (side, row) in [('X', by_side[0]), ('O', by_side[1])] {
        eprintln!(
            "As {}: {} wins, {} draws, {} losses",
            side, row[0], row[1], row[2]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::protocol::moves::parse_move;
    use crate::protocol::ofen::parse_ofen;

    fn quiet_config() -> SelfPlayConfig {
        SelfPlayConfig {
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn opponent_from_name() {
        assert_eq!(Opponent::from_name("random"), Some(Opponent::Random));
        assert_eq!(Opponent::from_name("perfect"), Some(Opponent::Perfect));
        assert_eq!(Opponent::from_name("Random"), None);
        assert_eq!(Opponent::from_name("mcts"), None);
    }

    #[test]
    fn engine_alternates_sides() {
        let config = SelfPlayConfig {
            num_games: 4,
            seed: 7,
            threads: 1,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        let sides: Vec<char> = games.iter().map(|g| g.engine_side).collect();
        assert_eq!(sides, vec!['X', 'O', 'X', 'O']);
    }

    #[test]
    fn engine_never_loses_against_random_batch() {
        let config = SelfPlayConfig {
            num_games: 40,
            opponent: Opponent::Random,
            threads: 1,
            seed: 42,
            ..quiet_config()
        };
        for game in run_self_play(&config) {
            assert_ne!(
                game.outcome,
                Outcome::Loss,
                "engine lost game {} as {}: {:?}",
                game.game_id,
                game.engine_side,
                game.moves,
            );
        }
    }

    #[test]
    fn perfect_opponent_always_draws() {
        let config = SelfPlayConfig {
            num_games: 4,
            opponent: Opponent::Perfect,
            threads: 1,
            seed: 1,
            ..quiet_config()
        };
        for game in run_self_play(&config) {
            assert_eq!(game.outcome, Outcome::Draw);
            assert_eq!(game.winner, None);
            assert_eq!(game.plies, 9);
        }
    }

    #[test]
    fn record_is_consistent_with_its_moves() {
        let config = SelfPlayConfig {
            num_games: 6,
            seed: 99,
            threads: 1,
            ..quiet_config()
        };
        for game in run_self_play(&config) {
            assert_eq!(game.plies, game.moves.len());

            // Replaying the move list from the empty grid must reach the
            // recorded final position.
            let mut grid = Grid::new();
            for token in &game.moves {
                let sq = parse_move(token).expect("recorded move parses");
                grid = grid.apply(sq).expect("recorded move replays");
            }
            assert!(grid.is_terminal());
            assert_eq!(encode_ofen(&grid), game.final_ofen);
            assert_eq!(grid.winner().map(|m| m.ofen_char()), game.winner);
        }
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 5,
            threads: 1,
            seed: 11,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        assert_eq!(games.len(), 5);
    }

    #[test]
    fn parallel_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 8,
            threads: 2,
            seed: 13,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        assert_eq!(games.len(), 8);
    }

    #[test]
    fn parallel_matches_sequential_with_same_seed() {
        let base = SelfPlayConfig {
            num_games: 10,
            seed: 2024,
            ..quiet_config()
        };
        let sequential = run_self_play(&SelfPlayConfig { threads: 1, ..base.clone() });
        let mut parallel = run_self_play(&SelfPlayConfig { threads: 4, ..base });

        // Parallel records arrive in completion order.
        parallel.sort_by_key(|g| g.game_id);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn jsonl_output_is_valid() {
        let config = SelfPlayConfig {
            num_games: 3,
            threads: 1,
            seed: 55,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), 3);
        for line in output.lines() {
            let value: serde_json::Value =
                serde_json::from_str(line).expect("each line is valid JSON");
            assert!(value["game_id"].is_u64());
            assert!(value["moves"].is_array());
            assert!(value["final_ofen"].is_string());
            assert!(value["plies"].is_u64());
            assert!(matches!(
                value["outcome"].as_str(),
                Some("win") | Some("draw") | Some("loss")
            ));
        }
    }

    #[test]
    fn game_record_serializes_draw_winner_as_null() {
        let record = GameRecord {
            game_id: 0,
            engine_side: 'X',
            moves: vec!["b2".to_string()],
            final_ofen: "3/1X1/3".to_string(),
            winner: None,
            plies: 1,
            outcome: Outcome::Draw,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"winner\":null"), "got: {}", json);
        assert!(json.contains("\"outcome\":\"draw\""), "got: {}", json);
    }

    #[test]
    fn first_recorded_move_is_played_by_the_engine_side_x() {
        let config = SelfPlayConfig {
            num_games: 1,
            seed: 3,
            threads: 1,
            ..quiet_config()
        };
        let games = run_self_play(&config);
        let game = &games[0];
        assert_eq!(game.engine_side, 'X');

        // The engine opens deterministically with the first optimal square
        // in row-major order.
        let first = parse_move(&game.moves[0]).unwrap();
        assert_eq!(first, Square::new(0, 0));
    }

    #[test]
    fn final_ofen_parses_back_to_terminal_grid() {
        let config = SelfPlayConfig {
            num_games: 4,
            seed: 77,
            threads: 1,
            ..quiet_config()
        };
        for game in run_self_play(&config) {
            let grid = parse_ofen(&game.final_ofen).expect("final OFEN parses");
            assert!(grid.is_terminal());
        }
    }
}
