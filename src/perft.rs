// Perft using apply/undo on a single board (no cloning)
use crate::board::{Board, Move, Player, SQUARES};
use crate::movegen::{flip_mask, has_any_move, legal_moves};

/// Leaf count of the move tree `depth` plies deep. A forced pass counts as a
/// ply; a finished game is a leaf.
pub fn perft(board: &mut Board, to_move: Player, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = legal_moves(board, to_move);
    if moves.is_empty() {
        if !has_any_move(board, to_move.opponent()) { return 1; }
        return perft(board, to_move.opponent(), depth - 1);
    }
    let mut nodes = 0u64;
    for mv in moves {
        let flips = flip_mask(board, to_move, mv.index());
        board.place(to_move, mv.index(), flips);
        nodes += perft(board, to_move.opponent(), depth - 1);
        board.unplace(to_move, mv.index(), flips);
    }
    nodes
}

/// Per-root-move counts, for splitting work or diffing against another
/// generator. Moves are in row-major order.
pub fn divide(board: &Board, to_move: Player, depth: u32) -> Vec<(Move, u64)> {
    let mut b = *board;
    let mut out = Vec::with_capacity(SQUARES);
    if depth == 0 { return out; }
    for mv in legal_moves(&b, to_move) {
        let flips = flip_mask(&b, to_move, mv.index());
        b.place(to_move, mv.index(), flips);
        out.push((mv, perft(&mut b, to_move.opponent(), depth - 1)));
        b.unplace(to_move, mv.index(), flips);
    }
    out
}
