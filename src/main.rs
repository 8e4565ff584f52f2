use anyhow::Result;
use clap::Parser;
use edgebot::config::EngineConfig;
use edgebot::game::{Game, Outcome};
use edgebot::notation::{format_moves, parse_input, Input};
use edgebot::search::alphabeta::Searcher;
use edgebot::search::tiebreak::TieBreak;
use edgebot::{OthelloError, Player};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Othello against the EdgeBot engine", long_about = None)]
struct Args {
    /// Operation mode: 'h' for human vs CPU, 'c' for CPU vs CPU
    #[arg(long, default_value = "h")]
    mode: String,

    /// Your color: 'b' for black (moves first), 'w' for white
    #[arg(long, default_value = "b")]
    color: String,

    /// Search depth (overrides the config file)
    #[arg(long)]
    depth: Option<u32>,

    /// Time budget per move in milliseconds (overrides the config file)
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// JSON engine config (search params and evaluation weights)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Break ties between equally scored moves at random
    #[arg(long)]
    random_ties: bool,

    /// Seed for random tie-breaking
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Take any available corner without searching
    #[arg(long)]
    take_corners: bool,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    HumanVsCpu,
    CpuVsCpu,
}

fn parse_mode(mode_str: &str) -> Result<Mode> {
    match mode_str.to_lowercase().as_str() {
        "h" | "human" => Ok(Mode::HumanVsCpu),
        "c" | "cpu" => Ok(Mode::CpuVsCpu),
        _ => anyhow::bail!("Invalid mode: use 'h' or 'c'"),
    }
}

fn parse_color(color_str: &str) -> Result<Player> {
    match color_str.to_lowercase().as_str() {
        "b" | "black" => Ok(Player::Black),
        "w" | "white" => Ok(Player::White),
        _ => anyhow::bail!("Invalid color: use 'b' or 'w'"),
    }
}

fn print_status(game: &Game) {
    let (b, w) = game.board().count();
    println!("\n{}", game.board());
    println!("Score: B={}  W={}  |  Turn: {}", b, w, game.to_move());
}

/// Reads until the human enters a legal move or a permitted pass.
/// Returns `false` on end of input.
fn human_turn(game: &mut Game, input: &mut impl BufRead) -> Result<bool> {
    loop {
        let legal = game.legal_moves();
        if legal.is_empty() {
            println!("Valid moves: (none) - type 'pass'");
        } else {
            println!("Valid moves: {}", format_moves(&legal));
        }
        print!("Your move (e.g. d3, or 'pass'): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 { return Ok(false); }
        if line.trim().eq_ignore_ascii_case("quit") { return Ok(false); }

        let result = parse_input(&line).and_then(|cmd| match cmd {
            Input::Pass => game.pass().map(|_| println!("You pass.")),
            Input::Place(mv) => game.play(mv).map(|flips| println!("You played {} ({} flipped)", mv, flips.len())),
        });
        match result {
            Ok(()) => return Ok(true),
            Err(OthelloError::MalformedInput(_)) | Err(OthelloError::OutOfBounds { .. }) => {
                println!("Invalid format. Use like d3 (or 3d).")
            }
            Err(OthelloError::PassNotAllowed { moves }) => println!("You can't pass: {moves} move(s) available."),
            Err(e) => println!("Illegal move ({e}). Choose from the valid moves."),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mode = parse_mode(&args.mode)?;
    let human_color = parse_color(&args.color)?;

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.depth { cfg.search.depth = d; }
    if args.movetime_ms.is_some() { cfg.search.movetime_ms = args.movetime_ms; }
    if args.random_ties { cfg.search.tie_break = TieBreak::Random { seed: args.seed }; }
    if args.take_corners { cfg.search.take_corners = true; }
    info!("engine config: {:?}", cfg.search);

    let mut searcher = Searcher::with_weights(cfg.eval.clone())?;
    searcher.set_tt_capacity_mb(cfg.search.hash_mb);
    let params = cfg.search.to_params();

    let mut game = Game::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    while !game.is_over() {
        print_status(&game);
        let side = game.to_move();
        let is_human_turn = mode == Mode::HumanVsCpu && side == human_color;

        if is_human_turn {
            if !human_turn(&mut game, &mut input)? {
                println!("Bye!");
                return Ok(());
            }
            continue;
        }

        if game.must_pass() {
            game.pass()?;
            println!("{side} has no valid moves -> PASS");
            continue;
        }
        if args.verbose { println!("Thinking..."); }
        let start_time = Instant::now();
        let res = searcher.search_with_params(game.board(), side, params);
        let elapsed = start_time.elapsed();
        if args.verbose {
            let nps = res.nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            println!("depth: {}, score: {}, nodes: {}, elapsed: {:.2}s, NPS: {:.0}",
                res.depth, res.score, res.nodes, elapsed.as_secs_f64(), nps);
        }
        match res.bestmove {
            Some(mv) => {
                info!("{side} chose {mv} (depth {}, score {})", res.depth, res.score);
                game.play(mv)?;
                println!("CPU ({side}) plays: {mv}");
            }
            None => {
                game.pass()?;
                println!("{side} has no valid moves -> PASS");
            }
        }
    }

    print_status(&game);
    match game.outcome() {
        Some(Outcome::Win(p)) => println!("\nGame Over: {p} wins!"),
        Some(Outcome::Draw) | None => println!("\nGame Over: Draw!"),
    }
    Ok(())
}
