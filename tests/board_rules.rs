use edgebot::movegen::{flips, flips_in_direction, has_any_move, is_terminal, legal_moves};
use edgebot::{apply_move, initial_board, score_of, Board, Move, OthelloError, Player};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn mv(s: &str) -> Move { s.parse().expect("valid move text") }

fn names(moves: &[Move]) -> Vec<String> { moves.iter().map(|m| m.to_string()).collect() }

/// Random playout positions, including ones after forced passes.
fn sample_positions(seed: u64, games: usize) -> Vec<(Board, Player)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for _ in 0..games {
        let mut b = Board::initial();
        let mut side = Player::Black;
        while !is_terminal(&b) {
            out.push((b, side));
            let moves = legal_moves(&b, side);
            if !moves.is_empty() {
                let m = moves[rng.gen_range(0..moves.len())];
                b.apply(side, m).expect("generated move applies");
            }
            side = side.opponent();
        }
        out.push((b, side));
    }
    out
}

#[test]
fn opponent_is_involutive() {
    for p in [Player::Black, Player::White] {
        assert_eq!(p.opponent().opponent(), p);
        assert_ne!(p.opponent(), p);
    }
}

#[test]
fn initial_black_moves() {
    let b = initial_board();
    assert_eq!(score_of(&b), (2, 2));
    assert_eq!(names(&legal_moves(&b, Player::Black)), vec!["d3", "c4", "f5", "e6"]);
    assert_eq!(names(&legal_moves(&b, Player::White)), vec!["e3", "f4", "c5", "d6"]);
}

#[test]
fn d3_flips_only_d4() {
    let mut b = initial_board();
    let flipped = apply_move(&mut b, Player::Black, mv("d3")).expect("d3 is legal");
    assert_eq!(names(flipped.cells()), vec!["d4"]);
    assert_eq!(score_of(&b), (4, 1));
}

#[test]
fn multi_direction_flips_are_ordered_by_direction() {
    let mut b: Board = "
        . . . . . . . .
        . B . B . B . .
        . . W W W . . .
        . B W . W B . .
        . . W W W . . .
        . B . B . B . .
        . . . . . . . .
        . . . . . . . .
    ".parse().unwrap();
    let target = mv("d4");
    assert_eq!(names(&flips_in_direction(&b, Player::Black, 3, 3, -1, 0)), vec!["d3"]);
    let set = flips(&b, Player::Black, target);
    assert_eq!(names(set.cells()), vec!["d3", "e3", "e4", "e5", "d5", "c5", "c4", "c3"]);
    let before = b;
    let applied = b.apply(Player::Black, target).unwrap();
    assert_eq!(applied, set);
    assert_eq!(score_of(&b), (17, 0));
    b.undo(Player::Black, target, &applied);
    assert_eq!(b, before);
}

#[test]
fn occupied_and_captureless_moves_are_illegal() {
    let mut b = initial_board();
    for text in ["d4", "a1", "c3", "h8"] {
        let m = mv(text);
        assert_eq!(apply_move(&mut b, Player::Black, m), Err(OthelloError::IllegalMove { mv: m }));
    }
    assert_eq!(b, initial_board());
}

#[test]
fn legal_iff_apply_succeeds() {
    for (b, side) in sample_positions(11, 6) {
        let legal = legal_moves(&b, side);
        for idx in 0..64 {
            let m = Move::new(idx / 8, idx % 8).unwrap();
            let mut copy = b;
            let res = copy.apply(side, m);
            assert_eq!(res.is_ok(), legal.contains(&m), "mismatch at {m} for {side}\n{b}");
            if res.is_err() { assert_eq!(copy, b, "failed apply mutated the board"); }
        }
        assert_eq!(has_any_move(&b, side), !legal.is_empty());
    }
}

#[test]
fn apply_undo_round_trip_and_disc_growth() {
    for (b, side) in sample_positions(23, 6) {
        let (b0, w0) = b.count();
        for m in legal_moves(&b, side) {
            let mut copy = b;
            let flipped = copy.apply(side, m).unwrap();
            let (b1, w1) = copy.count();
            assert_eq!(b1 + w1, b0 + w0 + 1, "exactly one disc is added");
            assert!(!flipped.is_empty());
            let (mine_before, mine_after) = match side {
                Player::Black => (b0, b1),
                Player::White => (w0, w1),
            };
            assert_eq!(mine_after, mine_before + 1 + flipped.len() as u32);
            copy.undo(side, m, &flipped);
            assert_eq!(copy, b);
        }
    }
}

#[test]
fn one_sided_block_is_a_pass_not_the_end() {
    let b: Board = "
        B W . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ".parse().unwrap();
    assert!(legal_moves(&b, Player::White).is_empty());
    assert_eq!(names(&legal_moves(&b, Player::Black)), vec!["c1"]);
    assert!(!is_terminal(&b));
}

#[test]
fn full_board_is_terminal() {
    let rows = ["BWBWBWBW", "WBWBWBWB"];
    let text: String = (0..8).map(|r| rows[r % 2]).collect::<Vec<_>>().join("\n");
    let b: Board = text.parse().unwrap();
    assert!(b.is_full());
    assert_eq!(b.count(), (32, 32));
    assert!(is_terminal(&b));
}

#[test]
fn blocked_board_is_terminal_before_full() {
    let b: Board = "
        B B . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . W
    ".parse().unwrap();
    assert!(!b.is_full());
    assert!(is_terminal(&b));
}
