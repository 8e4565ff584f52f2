use crate::board::{Board, Cell, Move, Player, SIZE};
use crate::error::OthelloError;
use crate::movegen::mobility;
use serde::{Deserialize, Serialize};

pub type Score = i32;

// Terminal scoring
pub const WIN_SCORE: Score = 1_000_000;
pub const DRAW_SCORE: Score = 0;
/// Strictly above any score `evaluate` can return; used as the open window.
pub const INFINITY: Score = 2 * WIN_SCORE;

pub const DEFAULT_POSITIONAL: [[i32; SIZE]; SIZE] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 7), (7, 0), (7, 7)];

/// Game stage keyed on the number of empty squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Midgame,
    Endgame,
}

impl Phase {
    pub fn of(empties: u32, w: &EvalWeights) -> Phase {
        if empties > w.opening_empties { Phase::Opening }
        else if empties > w.endgame_empties { Phase::Midgame }
        else { Phase::Endgame }
    }
}

/// Per-phase multipliers in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMix {
    pub positional_pct: i32,
    pub mobility_pct: i32,
    pub disc_pct: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub positional: [[i32; SIZE]; SIZE],
    pub corner_bonus: i32,
    pub danger_penalty: i32,
    pub mobility_k: i32,
    pub disc_k: i32,
    /// More empties than this is the opening.
    pub opening_empties: u32,
    /// This many empties or fewer is the endgame.
    pub endgame_empties: u32,
    pub opening: PhaseMix,
    pub midgame: PhaseMix,
    pub endgame: PhaseMix,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            positional: DEFAULT_POSITIONAL,
            corner_bonus: 100,
            danger_penalty: 50,
            mobility_k: 90,
            disc_k: 100,
            opening_empties: 40,
            endgame_empties: 14,
            opening: PhaseMix { positional_pct: 100, mobility_pct: 100, disc_pct: 100 },
            midgame: PhaseMix { positional_pct: 90, mobility_pct: 80, disc_pct: 150 },
            endgame: PhaseMix { positional_pct: 50, mobility_pct: 40, disc_pct: 300 },
        }
    }
}

impl EvalWeights {
    pub fn mix(&self, phase: Phase) -> PhaseMix {
        match phase {
            Phase::Opening => self.opening,
            Phase::Midgame => self.midgame,
            Phase::Endgame => self.endgame,
        }
    }

    pub fn square_weight(&self, mv: Move) -> i32 { self.positional[mv.row()][mv.col()] }

    /// Upper bound on `|evaluate|` for any position that is not terminal.
    pub fn max_heuristic(&self) -> i64 {
        let positional = self.positional_sum();
        let mobility = (self.mobility_k as i64).abs();
        let disc = (self.disc_k as i64).abs();
        let pct = |v: i32| (v as i64).abs();
        let mixed = [self.opening, self.midgame, self.endgame]
            .iter()
            .map(|m| {
                positional
                    .saturating_mul(pct(m.positional_pct))
                    .saturating_add(mobility.saturating_mul(pct(m.mobility_pct)))
                    .saturating_add(disc.saturating_mul(pct(m.disc_pct)))
                    / 100
            })
            .max()
            .unwrap_or(0);
        mixed
            .saturating_add(4 * (self.corner_bonus as i64).abs())
            .saturating_add(12 * (self.danger_penalty as i64).abs())
    }

    /// Heuristic scores must stay strictly below `WIN_SCORE`, so that every
    /// finished game outranks every estimate and the score arithmetic stays
    /// inside `i32`.
    pub fn validate(&self) -> Result<(), OthelloError> {
        let limit = WIN_SCORE as i64;
        let raw = self.positional_sum().max((self.mobility_k as i64).abs()).max((self.disc_k as i64).abs());
        let bound = self.max_heuristic();
        if raw >= limit || bound >= limit {
            return Err(OthelloError::InvalidWeights(format!(
                "heuristic scores reach {} but must stay below {WIN_SCORE}",
                bound.max(raw)
            )));
        }
        Ok(())
    }

    fn positional_sum(&self) -> i64 {
        self.positional.iter().flatten().map(|&v| (v as i64).abs()).sum()
    }
}

fn sign(board: &Board, idx: usize, me: Player) -> i32 {
    match board.cell_at(idx).owner() {
        Some(p) if p == me => 1,
        Some(_) => -1,
        None => 0,
    }
}

fn normalized(k: i32, mine: i32, theirs: i32) -> i32 {
    if mine + theirs == 0 { 0 } else { k * (mine - theirs) / (mine + theirs) }
}

pub fn positional_term(board: &Board, me: Player, w: &EvalWeights) -> i32 {
    (0..SIZE * SIZE).map(|i| sign(board, i, me) * w.positional[i / SIZE][i % SIZE]).sum()
}

pub fn corner_term(board: &Board, me: Player, w: &EvalWeights) -> i32 {
    CORNERS.iter().map(|&(r, c)| sign(board, r * SIZE + c, me) * w.corner_bonus).sum()
}

/// Penalises discs next to a corner that is still empty; nothing once the
/// corner is taken.
pub fn danger_term(board: &Board, me: Player, w: &EvalWeights) -> i32 {
    let mut total = 0;
    for &(cr, cc) in CORNERS.iter() {
        if board.cell_at(cr * SIZE + cc) != Cell::Empty { continue; }
        let dr: i32 = if cr == 0 { 1 } else { -1 };
        let dc: i32 = if cc == 0 { 1 } else { -1 };
        for (sr, sc) in [(dr, 0), (0, dc), (dr, dc)] {
            let r = (cr as i32 + sr) as usize;
            let c = (cc as i32 + sc) as usize;
            total -= sign(board, r * SIZE + c, me) * w.danger_penalty;
        }
    }
    total
}

pub fn mobility_term(board: &Board, me: Player, w: &EvalWeights) -> i32 {
    normalized(w.mobility_k, mobility(board, me) as i32, mobility(board, me.opponent()) as i32)
}

pub fn disc_term(board: &Board, me: Player, w: &EvalWeights) -> i32 {
    normalized(w.disc_k, board.count_of(me) as i32, board.count_of(me.opponent()) as i32)
}

/// Final score once neither side can move: a saturated win/loss plus the disc
/// margin, or `DRAW_SCORE`.
pub fn terminal_score(board: &Board, me: Player) -> Score {
    let diff = board.count_of(me) as i32 - board.count_of(me.opponent()) as i32;
    match diff.signum() {
        1 => WIN_SCORE + diff,
        -1 => -WIN_SCORE + diff,
        _ => DRAW_SCORE,
    }
}

/// Static score of `board` for `me`; larger is better.
///
/// Antisymmetric: `evaluate(b, p, w) == -evaluate(b, p.opponent(), w)`.
pub fn evaluate(board: &Board, me: Player, w: &EvalWeights) -> Score {
    let my_moves = mobility(board, me) as i32;
    let opp_moves = mobility(board, me.opponent()) as i32;
    if my_moves == 0 && opp_moves == 0 {
        return terminal_score(board, me);
    }
    let mix = w.mix(Phase::of(board.empty_count(), w));
    let weighted = positional_term(board, me, w) * mix.positional_pct
        + normalized(w.mobility_k, my_moves, opp_moves) * mix.mobility_pct
        + disc_term(board, me, w) * mix.disc_pct;
    weighted / 100 + corner_term(board, me, w) + danger_term(board, me, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn danger_vanishes_once_corner_taken() {
        let w = EvalWeights::default();
        let open: Board = "
            . B . . . . . .
            B B . . . . . .
            . . . . . . . .
            . . . W B . . .
            . . . B W . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
        ".parse().unwrap();
        assert_eq!(danger_term(&open, Player::Black, &w), -3 * w.danger_penalty);
        assert_eq!(danger_term(&open, Player::White, &w), 3 * w.danger_penalty);

        let taken: Board = "
            W B . . . . . .
            B B . . . . . .
            . . . . . . . .
            . . . W B . . .
            . . . B W . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
        ".parse().unwrap();
        assert_eq!(danger_term(&taken, Player::Black, &w), 0);
    }

    #[test]
    fn phase_boundaries() {
        let w = EvalWeights::default();
        assert_eq!(Phase::of(60, &w), Phase::Opening);
        assert_eq!(Phase::of(40, &w), Phase::Midgame);
        assert_eq!(Phase::of(15, &w), Phase::Midgame);
        assert_eq!(Phase::of(14, &w), Phase::Endgame);
    }

    #[test]
    fn default_weights_stay_below_win() {
        let w = EvalWeights::default();
        assert!(w.validate().is_ok());
        assert!(w.max_heuristic() < WIN_SCORE as i64);

        let huge_corner = EvalWeights { corner_bonus: 3_000_000, ..EvalWeights::default() };
        assert!(matches!(huge_corner.validate(), Err(OthelloError::InvalidWeights(_))));
        let mut huge_square = EvalWeights::default();
        huge_square.positional[3][3] = i32::MAX;
        assert!(huge_square.validate().is_err());
        let no_discs = PhaseMix { positional_pct: 100, mobility_pct: 100, disc_pct: 0 };
        let zero_mix = EvalWeights {
            disc_k: 2_000_000,
            opening: no_discs,
            midgame: no_discs,
            endgame: no_discs,
            ..EvalWeights::default()
        };
        assert!(zero_mix.validate().is_err(), "raw terms must fit even when their phase weight is zero");
    }

    #[test]
    fn endgame_disc_weight_dominates_opening() {
        let w = EvalWeights::default();
        assert!(w.endgame.disc_pct >= 2 * w.opening.disc_pct);
        assert!(w.endgame.mobility_pct < w.opening.mobility_pct);
        assert!(w.endgame.positional_pct < w.opening.positional_pct);
    }
}
