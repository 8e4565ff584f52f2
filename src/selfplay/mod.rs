use crate::board::Player;
use crate::error::OthelloError;
use crate::game::{Game, Outcome, Turn};
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::eval::EvalWeights;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    Engine,
    Random,
}

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub search: SearchParams,
    pub weights: EvalWeights,
    /// Transposition table size for each searcher.
    pub hash_mb: usize,
    pub opponent: Opponent,
    pub seed: u64,
    /// Uniformly random plies played before either side starts thinking.
    pub random_openings: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    /// Colour played by the engine under test.
    pub engine: Player,
    pub outcome: Outcome,
    pub black: u32,
    pub white: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Summary {
    pub games: usize,
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    /// Mean final disc margin from the engine's side.
    pub mean_margin: f64,
}

impl SelfPlayParams {
    /// A searcher with these weights and table size.
    pub fn searcher(&self) -> Result<Searcher, OthelloError> {
        let mut s = Searcher::with_weights(self.weights.clone())?;
        s.set_tt_capacity_mb(self.hash_mb);
        Ok(s)
    }
}

pub fn play_game(params: &SelfPlayParams, engine: Player, rng: &mut SmallRng) -> Result<GameRecord, OthelloError> {
    let mut game = Game::new();
    let mut searchers = [params.searcher()?, params.searcher()?];
    let mut moves = Vec::new();

    while !game.is_over() {
        if game.must_pass() {
            game.pass().expect("must_pass implies no legal move");
            moves.push("pass".to_string());
            continue;
        }
        let side = game.to_move();
        let legal = game.legal_moves();
        let random_turn = game.plies().len() < params.random_openings
            || (side != engine && params.opponent == Opponent::Random);
        let mv = if random_turn {
            legal[rng.gen_range(0..legal.len())]
        } else {
            let r = searchers[side.index()].search_with_params(game.board(), side, params.search);
            debug!("{side} plays {:?} (depth {}, score {}, nodes {})", r.bestmove, r.depth, r.score, r.nodes);
            r.bestmove.unwrap_or(legal[0])
        };
        moves.push(mv.to_string());
        if let Err(e) = game.play(mv) {
            panic!("engine produced an illegal move {mv}: {e}");
        }
    }

    let (black, white) = game.board().count();
    let outcome = game.outcome().unwrap_or(Outcome::Draw);
    debug_assert!(game.plies().iter().filter(|(_, t)| matches!(t, Turn::Placed(_))).count() as u32 + 4 == black + white);
    Ok(GameRecord { moves, engine, outcome, black, white })
}

/// Plays `params.games` games, alternating the engine's colour, and calls
/// `on_game` after each one.
pub fn generate_games<F: FnMut(usize, &GameRecord)>(
    params: &SelfPlayParams,
    mut on_game: F,
) -> Result<Vec<GameRecord>, OthelloError> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut records = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let engine = if gi % 2 == 0 { Player::Black } else { Player::White };
        let rec = play_game(params, engine, &mut rng)?;
        on_game(gi, &rec);
        records.push(rec);
    }
    Ok(records)
}

pub fn summarize(records: &[GameRecord]) -> Summary {
    let mut s = Summary { games: records.len(), ..Summary::default() };
    let mut margin_sum = 0i64;
    for r in records {
        match r.outcome {
            Outcome::Win(p) if p == r.engine => s.engine_wins += 1,
            Outcome::Win(_) => s.opponent_wins += 1,
            Outcome::Draw => s.draws += 1,
        }
        let (mine, theirs) = match r.engine {
            Player::Black => (r.black as i64, r.white as i64),
            Player::White => (r.white as i64, r.black as i64),
        };
        margin_sum += mine - theirs;
    }
    if !records.is_empty() { s.mean_margin = margin_sum as f64 / records.len() as f64; }
    info!("{} games: +{} -{} ={}", s.games, s.engine_wins, s.opponent_wins, s.draws);
    s
}
