use crate::board::{Cell, FlipSet, Move, Player, SIZE, SQUARES};
use crate::error::OthelloError;
use crate::movegen;
use std::fmt;
use std::str::FromStr;

/// The 8x8 position as two occupancy masks, bit index `row * 8 + col`.
///
/// `Board` is `Copy`; `apply`/`undo` mutate in place, so callers that need the
/// previous position keep a copy.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    pub fn empty() -> Self { Self::default() }

    /// Standard crossed start: d4/e5 White, e4/d5 Black.
    pub fn initial() -> Self {
        let mut b = Self::empty();
        b.white |= Move::from_index(3 * SIZE + 3).bit() | Move::from_index(4 * SIZE + 4).bit();
        b.black |= Move::from_index(3 * SIZE + 4).bit() | Move::from_index(4 * SIZE + 3).bit();
        b
    }

    pub fn discs(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn occupied(&self) -> u64 { self.black | self.white }

    pub fn cell(&self, mv: Move) -> Cell { self.cell_at(mv.index()) }

    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        let bit = 1u64 << idx;
        if self.black & bit != 0 { Cell::Black } else if self.white & bit != 0 { Cell::White } else { Cell::Empty }
    }

    /// Disc counts as `(black, white)`.
    pub fn count(&self) -> (u32, u32) { (self.black.count_ones(), self.white.count_ones()) }

    pub fn count_of(&self, player: Player) -> u32 { self.discs(player).count_ones() }

    pub fn empty_count(&self) -> u32 { SQUARES as u32 - self.occupied().count_ones() }

    pub fn is_full(&self) -> bool { self.occupied() == u64::MAX }

    /// Place a disc for `player` and flip every bracketed opponent disc.
    ///
    /// Fails without touching the board if the square is occupied or nothing
    /// would be captured.
    pub fn apply(&mut self, player: Player, mv: Move) -> Result<FlipSet, OthelloError> {
        if self.cell(mv) != Cell::Empty { return Err(OthelloError::IllegalMove { mv }); }
        let flips = movegen::flips(self, player, mv);
        if flips.is_empty() { return Err(OthelloError::IllegalMove { mv }); }
        self.place(player, mv.index(), flips.mask());
        Ok(flips)
    }

    /// Exact inverse of [`Board::apply`] for the same `player`, `mv` and flips.
    pub fn undo(&mut self, player: Player, mv: Move, flips: &FlipSet) {
        self.unplace(player, mv.index(), flips.mask());
    }

    pub(crate) fn place(&mut self, player: Player, idx: usize, flips: u64) {
        let bit = 1u64 << idx;
        debug_assert!(self.occupied() & bit == 0, "placing on an occupied square");
        debug_assert!(flips & self.discs(player.opponent()) == flips, "flipping a non-opponent disc");
        match player {
            Player::Black => { self.black |= bit | flips; self.white &= !flips; }
            Player::White => { self.white |= bit | flips; self.black &= !flips; }
        }
    }

    pub(crate) fn unplace(&mut self, player: Player, idx: usize, flips: u64) {
        let bit = 1u64 << idx;
        match player {
            Player::Black => { self.black &= !(bit | flips); self.white |= flips; }
            Player::White => { self.white &= !(bit | flips); self.black |= flips; }
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for r in 0..SIZE {
            write!(f, "{}", r + 1)?;
            for c in 0..SIZE {
                let ch = match self.cell_at(r * SIZE + c) {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses a diagram of 64 cells in row-major order; whitespace and a leading
/// coordinate frame (as printed by `Display`) are ignored.
/// `.`/`-` empty, `B`/`X`/`●` black, `W`/`O`/`○` white.
impl FromStr for Board {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b = Board::empty();
        let mut idx = 0usize;
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("a ") || line == "abcdefgh" { continue; }
            let body = line.trim_start_matches(|ch: char| ch.is_ascii_digit());
            for ch in body.chars().filter(|ch| !ch.is_whitespace()) {
                if idx >= SQUARES {
                    return Err(OthelloError::InvalidBoard(format!("more than {SQUARES} cells")));
                }
                let bit = 1u64 << idx;
                match ch {
                    '.' | '-' => {}
                    'B' | 'b' | 'X' | 'x' | '●' => b.black |= bit,
                    'W' | 'w' | 'O' | 'o' | '○' => b.white |= bit,
                    other => return Err(OthelloError::InvalidBoard(format!("unexpected cell {other:?}"))),
                }
                idx += 1;
            }
        }
        if idx != SQUARES {
            return Err(OthelloError::InvalidBoard(format!("expected {SQUARES} cells, got {idx}")));
        }
        Ok(b)
    }
}
