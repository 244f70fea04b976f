//! OFEN (Oxo FEN) encoding and decoding.
//!
//! OFEN is a compact string notation for a tic-tac-toe position, inspired by
//! chess FEN. Three row fields run top to bottom separated by `/`; within a
//! field, `X` and `O` are marks and a digit 1-3 is a run of empty cells.
//! The empty grid is `3/3/3`. The side to move is not encoded: it follows
//! from the mark counts, X moving first.

use crate::board::{Grid, Mark};

/// Errors that can occur during OFEN parsing.
#[derive(Debug, thiserror::Error)]
pub enum OfenError {
    #[error("expected 3 row fields separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("invalid character '{0}' in row field")]
    InvalidChar(char),

    #[error("row field '{0}' describes {1} cells, expected 3")]
    WrongRowLength(String, usize),

    #[error("unreachable mark counts: {x} X against {o} O")]
    ImpossibleCounts { x: usize, o: usize },

    #[error("both players hold completed lines")]
    TwoWinners,
}

/// Parses an OFEN string into a [`Grid`].
///
/// Rejects text that describes a position no legal game can reach: mark
/// counts must satisfy `x == o` or `x == o + 1`, and at most one player may
/// hold a completed line. Finished positions (one winner or a full grid)
/// parse fine.
pub fn parse_ofen(s: &str) -> Result<Grid, OfenError> {
    let fields: Vec<&str> = s.split('/').collect();
    if fields.len() != 3 {
        return Err(OfenError::WrongRowCount(fields.len()));
    }

    let mut grid = Grid::new();
    for (row, field) in fields.iter().enumerate() {
        parse_row(field, row, &mut grid)?;
    }

    validate(&grid)?;
    Ok(grid)
}

/// Parses one row field into the given grid row.
fn parse_row(field: &str, row: usize, grid: &mut Grid) -> Result<(), OfenError> {
    let mut col = 0usize;
    for c in field.chars() {
        match c {
            '1'..='3' => {
                col += c as usize - '0' as usize;
            }
            _ => {
                let mark = Mark::from_ofen_char(c).ok_or(OfenError::InvalidChar(c))?;
                if col >= 3 {
                    return Err(OfenError::WrongRowLength(field.to_string(), col + 1));
                }
                grid.cells[row * 3 + col] = Some(mark);
                col += 1;
            }
        }
        if col > 3 {
            return Err(OfenError::WrongRowLength(field.to_string(), col));
        }
    }
    if col != 3 {
        return Err(OfenError::WrongRowLength(field.to_string(), col));
    }
    Ok(())
}

/// Rejects grids no sequence of legal moves can produce.
fn validate(grid: &Grid) -> Result<(), OfenError> {
    let x = grid.count(Mark::X);
    let o = grid.count(Mark::O);
    if x != o && x != o + 1 {
        return Err(OfenError::ImpossibleCounts { x, o });
    }
    if grid.has_line(Mark::X) && grid.has_line(Mark::O) {
        return Err(OfenError::TwoWinners);
    }
    Ok(())
}

/// Encodes a [`Grid`] into its canonical OFEN string.
///
/// Empty runs compress to maximal digits, so equal grids always produce
/// identical strings.
pub fn encode_ofen(grid: &Grid) -> String {
    let mut result = String::with_capacity(11);

    for row in 0..3 {
        if row > 0 {
            result.push('/');
        }
        let mut run: u8 = 0;
        for col in 0..3 {
            match grid.cells[row * 3 + col] {
                Some(mark) => {
                    if run > 0 {
                        result.push((b'0' + run) as char);
                        run = 0;
                    }
                    result.push(mark.ofen_char());
                }
                None => run += 1,
            }
        }
        if run > 0 {
            result.push((b'0' + run) as char);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn parse_empty_grid() {
        let grid = parse_ofen("3/3/3").expect("failed to parse empty OFEN");
        assert_eq!(grid, Grid::new());
        assert_eq!(grid.to_move(), Mark::X);
    }

    #[test]
    fn parse_two_threat_position() {
        let grid = parse_ofen("XX1/OO1/3").expect("failed to parse");
        assert_eq!(grid.get(Square::new(0, 0)), Some(Mark::X));
        assert_eq!(grid.get(Square::new(0, 1)), Some(Mark::X));
        assert_eq!(grid.get(Square::new(0, 2)), None);
        assert_eq!(grid.get(Square::new(1, 0)), Some(Mark::O));
        assert_eq!(grid.get(Square::new(1, 1)), Some(Mark::O));
        assert_eq!(grid.to_move(), Mark::X);
    }

    #[test]
    fn parse_full_drawn_grid() {
        let grid = parse_ofen("XOX/XOO/OXX").expect("failed to parse");
        assert!(grid.is_full());
        assert_eq!(grid.winner(), None);
        assert!(grid.is_terminal());
    }

    #[test]
    fn parse_interior_runs() {
        let grid = parse_ofen("1X1/2O/X2").expect("failed to parse");
        assert_eq!(grid.get(Square::new(0, 1)), Some(Mark::X));
        assert_eq!(grid.get(Square::new(1, 2)), Some(Mark::O));
        assert_eq!(grid.get(Square::new(2, 0)), Some(Mark::X));
        assert_eq!(grid.count(Mark::X), 2);
        assert_eq!(grid.count(Mark::O), 1);
    }

    #[test]
    fn parse_finished_position_with_winner() {
        let grid = parse_ofen("XXX/OO1/3").expect("won positions must parse");
        assert_eq!(grid.winner(), Some(Mark::X));
        assert!(grid.is_terminal());
    }

    #[test]
    fn encode_empty_grid() {
        assert_eq!(encode_ofen(&Grid::new()), "3/3/3");
    }

    #[test]
    fn encode_compresses_runs_maximally() {
        let grid = Grid::new().apply(Square::new(0, 1)).unwrap();
        assert_eq!(encode_ofen(&grid), "1X1/3/3");

        let grid = grid.apply(Square::new(1, 2)).unwrap();
        assert_eq!(encode_ofen(&grid), "1X1/2O/3");
    }

    #[test]
    fn roundtrip_canonical_form() {
        let cases = [
            "3/3/3",
            "XX1/OO1/3",
            "XOX/XOO/OXX",
            "1X1/2O/X2",
            "X2/1O1/2X",
            "XXX/OO1/3",
            "2X/3/O2",
        ];
        for ofen in cases {
            let grid = parse_ofen(ofen).expect("failed to parse");
            let encoded = encode_ofen(&grid);
            assert_eq!(encoded, ofen, "canonical form differs for {}", ofen);
            let reparsed = parse_ofen(&encoded).expect("failed to reparse");
            assert_eq!(grid, reparsed, "roundtrip mismatch for {}", ofen);
        }
    }

    #[test]
    fn error_wrong_row_count() {
        assert!(matches!(
            parse_ofen("3/3").unwrap_err(),
            OfenError::WrongRowCount(2)
        ));
        assert!(matches!(
            parse_ofen("3/3/3/3").unwrap_err(),
            OfenError::WrongRowCount(4)
        ));
        assert!(matches!(
            parse_ofen("").unwrap_err(),
            OfenError::WrongRowCount(1)
        ));
    }

    #[test]
    fn error_invalid_character() {
        assert!(matches!(
            parse_ofen("x2/3/3").unwrap_err(),
            OfenError::InvalidChar('x')
        ));
        assert!(matches!(
            parse_ofen(".X1/3/3").unwrap_err(),
            OfenError::InvalidChar('.')
        ));
        assert!(matches!(
            parse_ofen("4/3/3").unwrap_err(),
            OfenError::InvalidChar('4')
        ));
        assert!(matches!(
            parse_ofen("0X2/3/3").unwrap_err(),
            OfenError::InvalidChar('0')
        ));
    }

    #[test]
    fn error_row_too_short() {
        assert!(matches!(
            parse_ofen("XX/3/3").unwrap_err(),
            OfenError::WrongRowLength(_, 2)
        ));
        assert!(matches!(
            parse_ofen("3/3/2").unwrap_err(),
            OfenError::WrongRowLength(_, 2)
        ));
    }

    #[test]
    fn error_row_too_long() {
        assert!(matches!(
            parse_ofen("XO2/3/3").unwrap_err(),
            OfenError::WrongRowLength(_, _)
        ));
        assert!(matches!(
            parse_ofen("31/3/3").unwrap_err(),
            OfenError::WrongRowLength(_, 4)
        ));
    }

    #[test]
    fn error_impossible_counts() {
        // Two X against zero O: X cannot have moved twice in a row.
        let err = parse_ofen("XX1/3/3").unwrap_err();
        assert!(matches!(err, OfenError::ImpossibleCounts { x: 2, o: 0 }));

        // O cannot lead on marks.
        let err = parse_ofen("OO1/3/3").unwrap_err();
        assert!(matches!(err, OfenError::ImpossibleCounts { x: 0, o: 2 }));
    }

    #[test]
    fn error_two_winners() {
        let err = parse_ofen("XXX/OOO/3").unwrap_err();
        assert!(matches!(err, OfenError::TwoWinners));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = parse_ofen("3/3").unwrap_err();
        assert!(err.to_string().contains("3 row fields"));

        let err = parse_ofen("OO1/3/3").unwrap_err();
        assert!(err.to_string().contains("0 X against 2 O"));
    }
}
