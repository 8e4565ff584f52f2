use anyhow::{Context, Result};
use clap::Parser;
use edgebot::perft::{divide, perft};
use edgebot::{Board, Player};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "edgebot-perft", about = "Perft driver for EdgeBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// File holding a board diagram (defaults to the initial position)
    #[arg(long)]
    board: Option<PathBuf>,
    /// Side to move: 'b' or 'w'
    #[arg(long, default_value = "b")]
    to_move: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print per-root-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.board {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?
            .parse::<Board>()?,
        None => Board::initial(),
    };
    let to_move = match args.to_move.to_lowercase().as_str() {
        "b" | "black" => Player::Black,
        "w" | "white" => Player::White,
        other => anyhow::bail!("invalid side to move {other:?}"),
    };
    let depth = args.depth;

    if args.divide {
        for (mv, n) in divide(&base, to_move, depth) { println!("{mv}: {n}"); }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth <= 1 {
            let mut b = base;
            perft(&mut b, to_move, depth)
        } else {
            let roots = edgebot::legal_moves(&base, to_move);
            if roots.is_empty() {
                // Pass or finished game: nothing to split
                let mut b = base;
                perft(&mut b, to_move, depth)
            } else {
                roots.par_iter().map(|&mv| {
                    let mut b = base;
                    b.apply(to_move, mv).expect("generated root move must apply");
                    perft(&mut b, to_move.opponent(), depth - 1)
                }).sum()
            }
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
