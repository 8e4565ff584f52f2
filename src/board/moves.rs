use crate::board::SIZE;
use crate::error::OthelloError;
use std::fmt;
use std::str::FromStr;

/// A square a player may place a disc on. Row 0 is printed as `1`, column 0 as `a`.
///
/// The derived ordering is row-major, which is also the canonical move order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    pub fn new(row: i32, col: i32) -> Result<Self, OthelloError> {
        if !(0..SIZE as i32).contains(&row) || !(0..SIZE as i32).contains(&col) {
            return Err(OthelloError::OutOfBounds { row, col });
        }
        Ok(Self { row: row as u8, col: col as u8 })
    }

    pub(crate) const fn from_index(idx: usize) -> Self {
        Self { row: (idx / SIZE) as u8, col: (idx % SIZE) as u8 }
    }

    pub fn row(self) -> usize { self.row as usize }
    pub fn col(self) -> usize { self.col as usize }
    pub fn index(self) -> usize { self.row() * SIZE + self.col() }
    pub(crate) fn bit(self) -> u64 { 1u64 << self.index() }

    pub fn is_corner(self) -> bool {
        let edge = |v: u8| v == 0 || v == SIZE as u8 - 1;
        edge(self.row) && edge(self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Move {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::notation::parse_input(s)? {
            crate::notation::Input::Place(mv) => Ok(mv),
            crate::notation::Input::Pass => Err(OthelloError::MalformedInput(s.to_string())),
        }
    }
}

/// Discs converted by one placement, ordered by direction and then by distance
/// from the placed disc.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlipSet {
    cells: Vec<Move>,
}

impl FlipSet {
    pub fn cells(&self) -> &[Move] { &self.cells }
    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    pub fn mask(&self) -> u64 {
        self.cells.iter().fold(0u64, |m, c| m | c.bit())
    }

    pub(crate) fn extend_from(&mut self, run: Vec<Move>) {
        self.cells.extend(run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_column_letter_then_row_digit() {
        assert_eq!(Move::new(2, 3).unwrap().to_string(), "d3");
        assert_eq!(Move::new(7, 0).unwrap().to_string(), "a8");
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert_eq!(Move::new(8, 0), Err(OthelloError::OutOfBounds { row: 8, col: 0 }));
        assert_eq!(Move::new(0, -1), Err(OthelloError::OutOfBounds { row: 0, col: -1 }));
    }

    #[test]
    fn corners() {
        let corners: Vec<String> = (0..64).map(Move::from_index).filter(|m| m.is_corner()).map(|m| m.to_string()).collect();
        assert_eq!(corners, vec!["a1", "h1", "a8", "h8"]);
    }
}
