use edgebot::search::alphabeta::{SearchParams, Searcher};
use edgebot::{choose_move, legal_moves, Board, Player};
use std::time::{Duration, Instant};

#[test]
fn movetime_returns_quickly_with_move() {
    let b = Board::initial();
    let mut searcher = Searcher::default();
    // Large depth
    let params = SearchParams { movetime: Some(Duration::from_millis(10)), ..SearchParams::with_depth(20) };
    let t0 = Instant::now();
    let res = searcher.search_with_params(&b, Player::Black, params);
    let elapsed = t0.elapsed();
    assert!(res.bestmove.is_some(), "no bestmove under movetime");
    assert!(elapsed < Duration::from_millis(500), "search exceeded time: {:?}", elapsed);
}

#[test]
fn choose_move_honours_time_budget() {
    let b = Board::initial();
    let t0 = Instant::now();
    let mv = choose_move(&b, Player::Black, 30, Some(Duration::from_millis(20)));
    assert!(t0.elapsed() < Duration::from_millis(500));
    assert!(legal_moves(&b, Player::Black).contains(&mv.expect("move")));
}
