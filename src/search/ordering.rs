use crate::board::Move;
use crate::search::eval::EvalWeights;

/// Ordering key, lower searches first: corners, then higher square weight.
pub fn priority(mv: Move, w: &EvalWeights) -> (bool, i32) {
    (!mv.is_corner(), -w.square_weight(mv))
}

/// Stable: moves with equal priority keep their row-major order.
pub fn order_by_priority(moves: &mut [Move], w: &EvalWeights) {
    moves.sort_by_key(|&m| priority(m, w));
}

pub fn tt_move_first(moves: &mut Vec<Move>, tt_best: Option<Move>) {
    if let Some(ttm) = tt_best {
        if let Some(pos) = moves.iter().position(|&mv| mv == ttm) {
            let mv = moves.remove(pos);
            moves.insert(0, mv);
        }
    }
}
