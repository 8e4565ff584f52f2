//! Legal-move enumeration and the flip rule.

use crate::board::{Board, Cell, FlipSet, Move, Player, SIZE, SQUARES};

/// The eight compass directions as `(dr, dc)`, clockwise from north.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0), (-1, 1), (0, 1), (1, 1),
    (1, 0), (1, -1), (0, -1), (-1, -1),
];

fn in_bounds(r: i32, c: i32) -> bool {
    (0..SIZE as i32).contains(&r) && (0..SIZE as i32).contains(&c)
}

/// Number of opponent discs bracketed from `(r, c)` along `(dr, dc)`, 0 if the
/// run is not closed by a `player` disc before leaving the board.
fn run_len(board: &Board, player: Player, r: i32, c: i32, dr: i32, dc: i32) -> usize {
    let opp: Cell = player.opponent().into();
    let own: Cell = player.into();
    let (mut rr, mut cc) = (r + dr, c + dc);
    let mut n = 0usize;
    while in_bounds(rr, cc) && board.cell_at(rr as usize * SIZE + cc as usize) == opp {
        n += 1;
        rr += dr;
        cc += dc;
    }
    if n > 0 && in_bounds(rr, cc) && board.cell_at(rr as usize * SIZE + cc as usize) == own { n } else { 0 }
}

/// Cells flipped in one direction, in walk order from the placed disc.
pub fn flips_in_direction(board: &Board, player: Player, r: i32, c: i32, dr: i32, dc: i32) -> Vec<Move> {
    let n = run_len(board, player, r, c, dr, dc) as i32;
    (1..=n).map(|k| Move::from_index(((r + k * dr) * SIZE as i32 + (c + k * dc)) as usize)).collect()
}

/// Union of flips over all directions; empty if `mv` is occupied.
pub fn flips(board: &Board, player: Player, mv: Move) -> FlipSet {
    let mut set = FlipSet::default();
    if board.cell(mv) != Cell::Empty { return set; }
    let (r, c) = (mv.row() as i32, mv.col() as i32);
    for &(dr, dc) in DIRECTIONS.iter() {
        set.extend_from(flips_in_direction(board, player, r, c, dr, dc));
    }
    set
}

/// Allocation-free variant of [`flips`] returning the flipped squares as a mask.
pub(crate) fn flip_mask(board: &Board, player: Player, idx: usize) -> u64 {
    if board.occupied() & (1u64 << idx) != 0 { return 0; }
    let (r, c) = ((idx / SIZE) as i32, (idx % SIZE) as i32);
    let mut mask = 0u64;
    for &(dr, dc) in DIRECTIONS.iter() {
        let n = run_len(board, player, r, c, dr, dc) as i32;
        for k in 1..=n {
            mask |= 1u64 << ((r + k * dr) * SIZE as i32 + (c + k * dc));
        }
    }
    mask
}

fn is_legal_at(board: &Board, player: Player, idx: usize) -> bool {
    if board.occupied() & (1u64 << idx) != 0 { return false; }
    let (r, c) = ((idx / SIZE) as i32, (idx % SIZE) as i32);
    DIRECTIONS.iter().any(|&(dr, dc)| run_len(board, player, r, c, dr, dc) > 0)
}

/// Legal moves in row-major order.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    (0..SQUARES).filter(|&i| is_legal_at(board, player, i)).map(Move::from_index).collect()
}

pub fn has_any_move(board: &Board, player: Player) -> bool {
    (0..SQUARES).any(|i| is_legal_at(board, player, i))
}

pub fn mobility(board: &Board, player: Player) -> usize {
    (0..SQUARES).filter(|&i| is_legal_at(board, player, i)).count()
}

/// Full board, or neither side can move.
pub fn is_terminal(board: &Board) -> bool {
    board.is_full() || (!has_any_move(board, Player::Black) && !has_any_move(board, Player::White))
}
