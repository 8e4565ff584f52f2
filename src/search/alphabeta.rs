use crate::board::{Board, Move, Player};
use crate::error::OthelloError;
use crate::movegen::{flip_mask, has_any_move, legal_moves};
use crate::search::eval::{evaluate, terminal_score, EvalWeights, Score, INFINITY};
use crate::search::ordering;
use crate::search::tiebreak::{choose_tied, TieBreak};
use crate::search::tt::{Bound, Entry, Tt};
use crate::search::zobrist;
use log::{debug, warn};
use rand::rngs::SmallRng;
use std::time::{Duration, Instant};

/// Upper bound on iterative deepening when only a movetime is given.
pub const MAX_DEPTH: u32 = 64;

const DEADLINE_POLL_MASK: u64 = 255;

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchParams {
    /// Deepest iteration. 0 with a movetime means "until the deadline".
    pub depth: u32,
    pub use_tt: bool,
    pub max_nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub order_moves: bool,
    /// Play any available corner without searching.
    pub take_corners: bool,
    pub tie_break: TieBreak,
}

impl SearchParams {
    /// TT and move ordering on, fixed depth, no time limit.
    pub fn with_depth(depth: u32) -> Self {
        Self { depth, use_tt: true, order_moves: true, ..Self::default() }
    }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    pub score: Score,
    /// Deepest fully completed iteration; 0 for shortcuts and fallbacks.
    pub depth: u32,
    pub nodes: u64,
}

pub struct Searcher {
    tt: Tt,
    weights: EvalWeights,
    pub(crate) nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    aborted: bool,
    use_tt: bool,
    order_moves: bool,
    tie_break: TieBreak,
    rng: Option<SmallRng>,
}

impl Default for Searcher {
    fn default() -> Self { Self::build(EvalWeights::default()) }
}

impl Searcher {
    /// Fails if the weights let heuristic scores reach the terminal range.
    pub fn with_weights(weights: EvalWeights) -> Result<Self, OthelloError> {
        weights.validate()?;
        Ok(Self::build(weights))
    }

    fn build(weights: EvalWeights) -> Self {
        let mut tt = Tt::new();
        tt.set_capacity_entries(1 << 16);
        Self {
            tt,
            weights,
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            aborted: false,
            use_tt: false,
            order_moves: false,
            tie_break: TieBreak::Canonical,
            rng: None,
        }
    }

    pub fn weights(&self) -> &EvalWeights { &self.weights }

    /// Cached scores depend on the weights, so the table is cleared.
    /// Rejected weights leave the searcher unchanged.
    pub fn set_weights(&mut self, weights: EvalWeights) -> Result<(), OthelloError> {
        weights.validate()?;
        self.weights = weights;
        self.tt.clear();
        Ok(())
    }

    pub fn set_tt_capacity_mb(&mut self, mb: usize) { self.tt.set_capacity_mb(mb); }

    /// Slots in the transposition table.
    pub fn tt_capacity(&self) -> usize { self.tt.capacity() }

    pub fn clear_tt(&mut self) { self.tt.clear(); }

    pub fn tt_probe(&self, board: &Board, to_move: Player) -> Option<(u32, Bound)> {
        self.tt.get(zobrist::compute(board, to_move)).map(|e| (e.depth, e.bound))
    }

    /// Root moves in the order an ordered search would try them, with any
    /// cached best move first.
    pub fn debug_order(&self, board: &Board, to_move: Player) -> Vec<Move> {
        let mut moves = legal_moves(board, to_move);
        ordering::order_by_priority(&mut moves, &self.weights);
        let tt_best = self.tt_get(board, to_move).and_then(|e| e.best);
        ordering::tt_move_first(&mut moves, tt_best);
        moves
    }

    fn order(&self, board: &Board, to_move: Player, moves: &mut Vec<Move>) {
        if self.order_moves { ordering::order_by_priority(moves, &self.weights); }
        if self.use_tt {
            let tt_best = self.tt.get(zobrist::compute(board, to_move)).and_then(|e| e.best);
            ordering::tt_move_first(moves, tt_best);
        }
    }

    fn configure(&mut self, params: &SearchParams) {
        self.nodes = 0;
        self.aborted = false;
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        self.deadline = params.movetime.map(|d| Instant::now() + d);
        self.use_tt = params.use_tt;
        self.order_moves = params.order_moves;
        // Keep the generator running across moves of one game
        if params.tie_break != self.tie_break {
            self.tie_break = params.tie_break;
            self.rng = params.tie_break.rng();
        }
    }

    fn check_abort(&mut self) -> bool {
        if self.nodes >= self.node_limit { self.aborted = true; }
        if let Some(dl) = self.deadline { if Instant::now() >= dl { self.aborted = true; } }
        self.aborted
    }

    /// Single fixed-depth search without a deadline.
    pub fn search_depth(&mut self, board: &Board, to_move: Player, depth: u32) -> SearchResult {
        let params = SearchParams { depth, movetime: None, max_nodes: None, ..self.current_params() };
        self.configure(&params);
        let moves = legal_moves(board, to_move);
        if moves.is_empty() {
            return SearchResult { bestmove: None, score: evaluate(board, to_move, &self.weights), depth: 0, nodes: 0 };
        }
        match self.search_root(board, to_move, &moves, depth.max(1)) {
            Some((mv, score)) => SearchResult { bestmove: Some(mv), score, depth: depth.max(1), nodes: self.nodes },
            None => self.fallback(board, to_move, &moves),
        }
    }

    fn current_params(&self) -> SearchParams {
        SearchParams { use_tt: self.use_tt, order_moves: self.order_moves, tie_break: self.tie_break, ..SearchParams::default() }
    }

    /// Iterative deepening under the depth, node and time limits in `params`.
    ///
    /// Returns `bestmove: None` only when `to_move` has no legal move.
    pub fn search_with_params(&mut self, board: &Board, to_move: Player, params: SearchParams) -> SearchResult {
        self.configure(&params);
        let moves = legal_moves(board, to_move);
        if moves.is_empty() {
            return SearchResult { bestmove: None, score: evaluate(board, to_move, &self.weights), depth: 0, nodes: 0 };
        }

        if params.take_corners {
            let corners: Vec<Move> = moves.iter().copied().filter(|m| m.is_corner()).collect();
            if let Some(mv) = choose_tied(&corners, self.rng.as_mut()) {
                debug!("corner shortcut: {mv}");
                return SearchResult { bestmove: Some(mv), score: self.score_after(board, to_move, mv), depth: 0, nodes: 0 };
            }
        }

        let max_depth = match (params.depth, params.movetime) {
            (0, Some(_)) => MAX_DEPTH,
            (0, None) => 1,
            (d, _) => d.min(MAX_DEPTH),
        };
        // Beyond this many plies every line has reached the end of the game
        let exact_horizon = 2 * board.empty_count() + 1;

        let mut best: Option<(Move, Score, u32)> = None;
        for d in 1..=max_depth {
            self.tt.bump_generation();
            match self.search_root(board, to_move, &moves, d) {
                Some((mv, score)) => {
                    debug!("depth {d} best {mv} score {score} nodes {}", self.nodes);
                    best = Some((mv, score, d));
                }
                None => {
                    debug!("depth {d} aborted after {} nodes; keeping previous iteration", self.nodes);
                    break;
                }
            }
            if d >= exact_horizon || self.check_abort() { break; }
        }

        match best {
            Some((mv, score, depth)) => SearchResult { bestmove: Some(mv), score, depth, nodes: self.nodes },
            None => self.fallback(board, to_move, &moves),
        }
    }

    fn fallback(&self, board: &Board, to_move: Player, moves: &[Move]) -> SearchResult {
        let mv = moves[0];
        warn!("no search iteration completed; playing first legal move {mv}");
        SearchResult { bestmove: Some(mv), score: self.score_after(board, to_move, mv), depth: 0, nodes: self.nodes }
    }

    fn score_after(&self, board: &Board, to_move: Player, mv: Move) -> Score {
        let mut child = *board;
        let flips = flip_mask(&child, to_move, mv.index());
        child.place(to_move, mv.index(), flips);
        evaluate(&child, to_move, &self.weights)
    }

    /// Full-window search of every root move. `None` if the limits were hit
    /// before all root moves were scored.
    fn search_root(&mut self, board: &Board, to_move: Player, moves: &[Move], depth: u32) -> Option<(Move, Score)> {
        debug_assert!(depth >= 1 && !moves.is_empty());
        let mut b = *board;
        let mut ordered = moves.to_vec();
        self.order(&b, to_move, &mut ordered);

        // Random tie-breaking needs exact scores for moves equal to the best,
        // so siblings are searched with alpha lowered by one.
        let widen = if self.rng.is_some() { 1 } else { 0 };
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_score = -INFINITY;
        let mut tied: Vec<Move> = Vec::new();

        for (i, &mv) in ordered.iter().enumerate() {
            if i > 0 && self.check_abort() { return None; }
            let flips = flip_mask(&b, to_move, mv.index());
            debug_assert!(flips != 0, "root move {mv} captures nothing");
            b.place(to_move, mv.index(), flips);
            let score = -self.alphabeta(&mut b, to_move.opponent(), depth - 1, -beta, -(alpha - widen));
            b.unplace(to_move, mv.index(), flips);
            if self.aborted { return None; }
            if tied.is_empty() || score > best_score {
                best_score = score;
                tied.clear();
                tied.push(mv);
            } else if score == best_score && widen > 0 {
                tied.push(mv);
            }
            if score > alpha { alpha = score; }
        }

        let chosen = choose_tied(&tied, self.rng.as_mut())?;
        self.tt_put(board, to_move, depth, best_score, Some(chosen), Bound::Exact);
        Some((chosen, best_score))
    }

    fn alphabeta(&mut self, b: &mut Board, to_move: Player, depth: u32, mut alpha: Score, beta: Score) -> Score {
        if self.aborted { return 0; }
        self.nodes += 1;
        if self.nodes >= self.node_limit || self.nodes & DEADLINE_POLL_MASK == 0 {
            if self.check_abort() { return 0; }
        }
        if depth == 0 { return evaluate(b, to_move, &self.weights); }

        let mut tt_best = None;
        if self.use_tt {
            if let Some(en) = self.tt_get(b, to_move) {
                tt_best = en.best;
                if en.depth >= depth {
                    match en.bound {
                        Bound::Exact => return en.score,
                        Bound::Lower => if en.score >= beta { return en.score; },
                        Bound::Upper => if en.score <= alpha { return en.score; },
                    }
                }
            }
        }

        let opp = to_move.opponent();
        let mut moves = legal_moves(b, to_move);
        if moves.is_empty() {
            if !has_any_move(b, opp) { return terminal_score(b, to_move); }
            // Pass: the opponent moves on the same board, one ply deeper
            return -self.alphabeta(b, opp, depth - 1, -beta, -alpha);
        }
        if self.order_moves { ordering::order_by_priority(&mut moves, &self.weights); }
        ordering::tt_move_first(&mut moves, tt_best);

        let orig_alpha = alpha;
        let mut best = -INFINITY;
        let mut best_move: Option<Move> = None;
        for mv in moves {
            let flips = flip_mask(b, to_move, mv.index());
            b.place(to_move, mv.index(), flips);
            let score = -self.alphabeta(b, opp, depth - 1, -beta, -alpha);
            b.unplace(to_move, mv.index(), flips);
            if self.aborted { return 0; }
            if best_move.is_none() || score > best { best = score; best_move = Some(mv); }
            if best > alpha { alpha = best; }
            if alpha >= beta { break; }
        }

        let bound = if best <= orig_alpha { Bound::Upper } else if best >= beta { Bound::Lower } else { Bound::Exact };
        self.tt_put(b, to_move, depth, best, best_move, bound);
        best
    }
}

impl Searcher {
    fn tt_get(&self, board: &Board, to_move: Player) -> Option<Entry> {
        self.tt.get(zobrist::compute(board, to_move))
    }

    fn tt_put(&mut self, board: &Board, to_move: Player, depth: u32, score: Score, best: Option<Move>, bound: Bound) {
        if !self.use_tt { return; }
        let e = Entry { key: zobrist::compute(board, to_move), depth, score, best, bound, gen: 0 };
        self.tt.put(e);
    }
}
