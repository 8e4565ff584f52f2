// Othello engine: move generation, phase-aware evaluation, alpha-beta search
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{Board, Cell, FlipSet, Move, Player};
pub use error::OthelloError;
pub use movegen::{is_terminal, legal_moves};

use search::alphabeta::{SearchParams, Searcher};
use std::time::Duration;

pub fn initial_board() -> Board { Board::initial() }

pub fn apply_move(board: &mut Board, player: Player, mv: Move) -> Result<FlipSet, OthelloError> {
    board.apply(player, mv)
}

/// Disc counts as `(black, white)`.
pub fn score_of(board: &Board) -> (u32, u32) { board.count() }

/// Best move for `player` with default weights, TT and move ordering, or
/// `None` when `player` has to pass.
pub fn choose_move(board: &Board, player: Player, max_depth: u32, time_budget: Option<Duration>) -> Option<Move> {
    let mut searcher = Searcher::default();
    let params = SearchParams { movetime: time_budget, ..SearchParams::with_depth(max_depth) };
    searcher.search_with_params(board, player, params).bestmove
}
