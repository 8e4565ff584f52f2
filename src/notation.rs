//! Text move encoding used by the terminal front ends.
//!
//! A move is a column letter `a`-`h` and a row number `1`-`8` in either order
//! (`d3`, `3d`, ` D 3 `). `pass` or `p` requests a pass.

use crate::board::Move;
use crate::error::OthelloError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Place(Move),
    Pass,
}

pub fn parse_input(raw: &str) -> Result<Input, OthelloError> {
    let s: String = raw.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_lowercase();
    if s == "pass" || s == "p" { return Ok(Input::Pass); }
    let malformed = || OthelloError::MalformedInput(raw.to_string());

    let bytes = s.as_bytes();
    if bytes.len() < 2 { return Err(malformed()); }
    let (col_ch, digits) = if bytes[0].is_ascii_alphabetic() {
        (bytes[0], &s[1..])
    } else if bytes[bytes.len() - 1].is_ascii_alphabetic() {
        (bytes[bytes.len() - 1], &s[..s.len() - 1])
    } else {
        return Err(malformed());
    };
    if !(b'a'..=b'h').contains(&col_ch) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let row: i32 = digits.parse().map_err(|_| malformed())?;
    Move::new(row - 1, (col_ch - b'a') as i32).map(Input::Place)
}

/// Space-separated moves, e.g. `c4 d3 e6 f5`.
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(row: i32, col: i32) -> Input { Input::Place(Move::new(row, col).unwrap()) }

    #[test]
    fn either_order_and_case() {
        assert_eq!(parse_input("d3").unwrap(), place(2, 3));
        assert_eq!(parse_input("3d").unwrap(), place(2, 3));
        assert_eq!(parse_input("  D 3 ").unwrap(), place(2, 3));
        assert_eq!(parse_input("h8").unwrap(), place(7, 7));
    }

    #[test]
    fn pass_tokens() {
        assert_eq!(parse_input("pass").unwrap(), Input::Pass);
        assert_eq!(parse_input(" P ").unwrap(), Input::Pass);
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "d", "33", "dd", "i3", "d3x", "x", "d-1"] {
            assert!(matches!(parse_input(s), Err(OthelloError::MalformedInput(_))), "accepted {s:?}");
        }
    }

    #[test]
    fn row_out_of_range_is_out_of_bounds() {
        assert!(matches!(parse_input("d9"), Err(OthelloError::OutOfBounds { .. })));
        assert!(matches!(parse_input("a0"), Err(OthelloError::OutOfBounds { .. })));
    }
}
