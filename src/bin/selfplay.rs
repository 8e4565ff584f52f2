use clap::Parser;
use edgebot::config::EngineConfig;
use edgebot::selfplay::{generate_games, summarize, Opponent, SelfPlayParams};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "edgebot-selfplay", about = "Play engine matches and print a JSON summary")]
struct Args {
    #[arg(long, default_value_t = 20)]
    games: usize,
    #[arg(long, default_value_t = 4)]
    depth: u32,
    #[arg(long)]
    movetime_ms: Option<u64>,
    /// 'engine' or 'random'
    #[arg(long, default_value = "random")]
    opponent: String,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Random plies at the start of each game
    #[arg(long, default_value_t = 4)]
    random_openings: usize,
    /// JSON engine config for evaluation weights and search switches
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also print every game record
    #[arg(long, default_value_t = false)]
    records: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let cfg = match &a.config {
        Some(p) => EngineConfig::load(p)?,
        None => EngineConfig::default(),
    };
    let opponent = match a.opponent.as_str() {
        "engine" => Opponent::Engine,
        "random" => Opponent::Random,
        other => anyhow::bail!("unknown opponent {other:?}: use 'engine' or 'random'"),
    };
    let mut search = cfg.search.to_params();
    search.depth = a.depth;
    search.movetime = a.movetime_ms.map(std::time::Duration::from_millis);

    let params = SelfPlayParams {
        games: a.games,
        search,
        weights: cfg.eval,
        hash_mb: cfg.search.hash_mb,
        opponent,
        seed: a.seed,
        random_openings: a.random_openings,
    };
    eprintln!("Playing {} games (depth={}, opponent={:?}, openings={})", a.games, a.depth, opponent, a.random_openings);

    let bar = ProgressBar::new(a.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    let records = generate_games(&params, |_, rec| {
        bar.set_message(format!("last: B{} W{}", rec.black, rec.white));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    let summary = summarize(&records);
    if a.records {
        for r in &records { println!("{}", serde_json::to_string(r)?); }
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
