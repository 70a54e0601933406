use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use merge_architect::city::City;
use merge_architect::engine::{Direction, Score, Tile};
use merge_architect::records::Records;
use merge_architect::session::{Session, SessionConfig, SessionSummary, Turn};
use merge_architect::tiers::BuildingTier;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "merge-architect", version, about = "Merge tiles, raise buildings")]
struct Cli {
    /// Board side length
    #[arg(long, default_value_t = 4, global = true)]
    size: usize,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play interactively: type w/a/s/d, up/down/left/right, or q to quit
    Play {
        /// Seed the tile spawner for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
        /// Where the high score and max tier are kept
        #[arg(long, value_name = "PATH", default_value = "merge-architect-records.json")]
        records: PathBuf,
        /// Name written on the building raised at game over
        #[arg(long, default_value = "Architect")]
        owner: String,
    },
    /// Play many games with a random policy in parallel and report the results
    Simulate {
        #[arg(short = 'n', long, default_value_t = 1000)]
        games: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SessionConfig { size: cli.size, ..SessionConfig::default() };
    match cli.cmd {
        Command::Play { seed, records, owner } => play(config, seed, records, &owner),
        Command::Simulate { games, seed, quiet } => {
            simulate(config, games, seed, quiet);
            Ok(())
        }
    }
}

fn play(config: SessionConfig, seed: Option<u64>, records_path: PathBuf, owner: &str) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut records = Records::load(&records_path)
        .with_context(|| format!("loading records from {}", records_path.display()))?;
    let mut city = City::with_demo_plots();
    println!("{}", city);
    let mut session = Session::new(&config, &mut rng);

    let stdin = io::stdin();
    let mut out = io::stdout();
    let finished = run_turns(&mut session, &mut records, &records_path, &mut rng, stdin.lock(), &mut out)?;
    if !finished {
        return Ok(());
    }

    let summary = session.summary();
    println!("Game over after {} moves. Final score: {}", summary.moves, summary.score);
    match BuildingTier::from_value(summary.highest_tile) {
        Some(tier) => println!("You built: {} - {}", tier, tier.description()),
        None => println!("Highest tile: {}", summary.highest_tile),
    }
    city.build(summary.highest_tile, owner, &mut rng);
    println!("\n{}", city);
    Ok(())
}

/// Feed input lines to the session until the game ends. Returns `false` when the
/// player quit or the input ran out first.
fn run_turns<R, I, W>(
    session: &mut Session,
    records: &mut Records,
    records_path: &Path,
    rng: &mut R,
    input: I,
    out: &mut W,
) -> anyhow::Result<bool>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        writeln!(out, "{}", session.grid())?;
        writeln!(out, "Score: {}  Best: {}", session.score(), records.high_score)?;
        if session.is_over() {
            return Ok(true);
        }
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            info!("input closed");
            return Ok(false);
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            info!("quit");
            return Ok(false);
        }
        let dir: Direction = match line.parse() {
            Ok(d) => d,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        if let Turn::Moved { .. } = session.play(dir, rng) {
            let changed = records.observe_score(session.score()) | records.observe_tile(session.highest_tile());
            if changed {
                records.save(records_path)?;
            }
        }
    }
}

fn simulate(config: SessionConfig, games: u64, seed: u64, quiet: bool) {
    let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new(games) };
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}") {
        pb.set_style(style);
    }

    let summaries: Vec<SessionSummary> = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i));
            let summary = random_game(&config, &mut rng);
            pb.inc(1);
            summary
        })
        .collect();
    pb.finish_and_clear();

    if summaries.is_empty() {
        println!("No games played");
        return;
    }
    let total: Score = summaries.iter().map(|s| s.score).sum();
    let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    let mut tiles: BTreeMap<Tile, usize> = BTreeMap::new();
    for s in &summaries {
        *tiles.entry(s.highest_tile).or_default() += 1;
    }

    println!("Games: {}, mean score: {:.1}, best score: {}", summaries.len(), total as f64 / summaries.len() as f64, best);
    for (tile, count) in tiles {
        let name = BuildingTier::from_value(tile).map(|t| t.label()).unwrap_or("-");
        println!("{:>6} {:<12} {}", tile, name, count);
    }
}

/// Play until game over, trying directions in a fresh random order every turn.
fn random_game<R: Rng + ?Sized>(config: &SessionConfig, rng: &mut R) -> SessionSummary {
    let mut session = Session::new(config, rng);
    let mut dirs = Direction::ALL;
    while !session.is_over() {
        dirs.shuffle(rng);
        let moved = dirs.iter().any(|&d| session.play(d, rng).is_moved());
        if !moved {
            break;
        }
    }
    session.summary()
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_architect::engine::Grid;
    use rand::rngs::mock::StepRng;
    use tempfile::tempdir;

    fn open_session() -> Session {
        Session::from_grid(Grid::from_rows(vec![vec![4, 0], vec![8, 16]]).unwrap())
    }

    #[test]
    fn closed_input_leaves_game_unfinished() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut session = open_session();
        let mut records = Records::default();
        let mut out = Vec::new();
        let finished =
            run_turns(&mut session, &mut records, &path, &mut StepRng::new(0, 0), &b""[..], &mut out).unwrap();
        assert!(!finished);
        assert!(!session.is_over());
        assert!(!path.exists());
    }

    #[test]
    fn quit_leaves_game_unfinished() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut session = open_session();
        let mut records = Records::default();
        let mut out = Vec::new();
        let finished =
            run_turns(&mut session, &mut records, &path, &mut StepRng::new(0, 0), &b"nope\nq\n"[..], &mut out).unwrap();
        assert!(!finished);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn final_move_finishes_and_saves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut session = open_session();
        let mut records = Records::default();
        let mut out = Vec::new();
        let finished =
            run_turns(&mut session, &mut records, &path, &mut StepRng::new(0, 0), &b"d\n"[..], &mut out).unwrap();
        assert!(finished);
        assert!(session.is_over());
        assert_eq!(Records::load(&path).unwrap(), Records { high_score: 0, max_tier: 16 });
    }
}
