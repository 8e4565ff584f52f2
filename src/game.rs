//! Turn bookkeeping around a [`Board`]: whose move it is, passes and the end
//! of the game.

use crate::board::{Board, FlipSet, Move, Player};
use crate::error::OthelloError;
use crate::movegen::{has_any_move, is_terminal, legal_moves};
use log::info;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Placed(Move),
    Passed,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    consecutive_passes: u8,
    plies: Vec<(Player, Turn)>,
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}

impl Game {
    pub fn new() -> Self { Self::from_position(Board::initial(), Player::FIRST) }

    pub fn from_position(board: Board, to_move: Player) -> Self {
        Self { board, to_move, consecutive_passes: 0, plies: Vec::new() }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn to_move(&self) -> Player { self.to_move }
    pub fn plies(&self) -> &[(Player, Turn)] { &self.plies }

    pub fn legal_moves(&self) -> Vec<Move> { legal_moves(&self.board, self.to_move) }

    /// The side to move has nothing to play and must pass.
    pub fn must_pass(&self) -> bool { !self.is_over() && !has_any_move(&self.board, self.to_move) }

    pub fn play(&mut self, mv: Move) -> Result<FlipSet, OthelloError> {
        let flips = self.board.apply(self.to_move, mv)?;
        self.plies.push((self.to_move, Turn::Placed(mv)));
        self.consecutive_passes = 0;
        self.to_move = self.to_move.opponent();
        Ok(flips)
    }

    /// Only allowed when the side to move has no legal move.
    pub fn pass(&mut self) -> Result<(), OthelloError> {
        let moves = legal_moves(&self.board, self.to_move).len();
        if moves > 0 { return Err(OthelloError::PassNotAllowed { moves }); }
        info!("{} passes", self.to_move);
        self.plies.push((self.to_move, Turn::Passed));
        self.consecutive_passes += 1;
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    pub fn is_over(&self) -> bool { self.consecutive_passes >= 2 || is_terminal(&self.board) }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_over() { return None; }
        let (black, white) = self.board.count();
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Win(Player::Black),
            std::cmp::Ordering::Less => Outcome::Win(Player::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}
