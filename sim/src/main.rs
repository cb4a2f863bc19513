use clap::Parser;
use game_core::RulesConfig;
use sim::{OutputWriter, SimError, Simulator, Summary};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doudizhu-sim")]
#[command(about = "Greedy self-play for the Doudizhu rule engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Base seed; game `n` uses `seed + n`
    #[arg(long, env = "DOUDIZHU_SEED")]
    seed: Option<u64>,

    /// JSON rules file; defaults apply when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// JSON-lines output; records go to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Abort a game after this many engine calls
    #[arg(long, default_value_t = 1_000)]
    max_steps: usize,

    /// Keep going when a game fails
    #[arg(long)]
    keep_going: bool,

    /// Log every play
    #[arg(short, long)]
    verbose: bool,
}

fn load_rules(path: Option<&PathBuf>) -> Result<RulesConfig, SimError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(RulesConfig::default()),
    }
}

fn main() -> Result<(), SimError> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rules = load_rules(args.rules.as_ref())?;
    rules.validate()?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    let simulator = Simulator::greedy(rules).with_max_steps(args.max_steps);
    let mut writer = match &args.output {
        Some(path) => OutputWriter::to_file(path)?,
        None => OutputWriter::stdout(),
    };

    info!(games = args.games, base_seed, ?rules, "starting simulation");
    let started = Instant::now();
    let mut records = Vec::with_capacity(args.games as usize);
    for game in 0..args.games {
        let seed = base_seed.wrapping_add(u64::from(game));
        match simulator.run_game(game, seed) {
            Ok(record) => {
                writer.write_record(&record)?;
                records.push(record);
            }
            Err(err) if args.keep_going => warn!(game, seed, %err, "game failed"),
            Err(err) => return Err(err),
        }
    }
    let written = writer.finish()?;

    let summary = Summary::from_records(&records);
    info!(
        games = summary.games,
        written,
        landlord_win_rate = %format!("{:.3}", summary.landlord_win_rate()),
        average_steps = %format!("{:.1}", summary.average_steps),
        redeals = summary.total_redeals,
        bombs = summary.bombs,
        rockets = summary.rockets,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(())
}
