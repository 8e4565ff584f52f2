pub mod alphabeta;
pub mod eval;
pub mod ordering;
pub mod tiebreak;
pub mod tt;
pub mod zobrist;
