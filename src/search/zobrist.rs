use crate::board::{Board, Player, SQUARES};
use std::sync::OnceLock;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<[u64; 2 * SQUARES]> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64; 2 * SQUARES] {
    TABLE.get_or_init(|| {
        let mut t = [0u64; 2 * SQUARES];
        let mut seed = 0x0DD5_EED0_7E11_0000;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

fn init_side() -> u64 {
    *SIDE_KEY.get_or_init(|| splitmix64(0xABCDEF1234567890))
}

/// Hash of the disc layout plus the side to move.
pub fn compute(board: &Board, to_move: Player) -> u64 {
    let table = init_table();
    let mut key = 0u64;
    for player in [Player::Black, Player::White] {
        let mut bb = board.discs(player);
        while bb != 0 {
            let sq = bb.trailing_zeros() as usize;
            key ^= table[player.index() * SQUARES + sq];
            bb &= bb - 1;
        }
    }
    if to_move == Player::White { key ^= init_side(); }
    key
}
