use edgebot::movegen::legal_moves;
use edgebot::search::alphabeta::{SearchParams, Searcher};
use edgebot::{Board, Move, Player};

fn mv(s: &str) -> Move { s.parse().unwrap() }

fn corner_position() -> Board {
    "
    . . . . . . . .
    . W . . . . . .
    . . W . . . . .
    . . . W B . . .
    . . . B B W . .
    . . . . . . . .
    . . . . . . . .
    . . . . . . . .
    "
    .parse()
    .unwrap()
}

#[test]
fn corners_are_tried_first() {
    let b = corner_position();
    let legal = legal_moves(&b, Player::Black);
    assert!(legal.len() > 1);
    let s = Searcher::default();
    let order = s.debug_order(&b, Player::Black);
    assert_eq!(order[0], mv("a1"));
    assert_eq!(order.len(), legal.len());
    assert!(legal.iter().all(|m| order.contains(m)));
}

#[test]
fn ordering_does_not_change_the_score() {
    for (b, side) in [(Board::initial(), Player::Black), (corner_position(), Player::Black)] {
        let plain = SearchParams { depth: 4, use_tt: false, order_moves: false, ..SearchParams::default() };
        let ordered = SearchParams { order_moves: true, ..plain };
        let r1 = Searcher::default().search_with_params(&b, side, plain);
        let r2 = Searcher::default().search_with_params(&b, side, ordered);
        assert_eq!(r1.score, r2.score, "ordering changed the score at\n{b}");
    }
}

#[test]
fn cached_best_move_leads_after_search() {
    let b = Board::initial();
    let mut s = Searcher::default();
    let r = s.search_with_params(&b, Player::Black, SearchParams::with_depth(3));
    let best = r.bestmove.expect("move");
    assert_eq!(s.debug_order(&b, Player::Black)[0], best);
}
