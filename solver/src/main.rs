use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use pentafire::analytic::AnalyticConfig;
use pentafire::bank::{Difficulty, PuzzleBank};
use pentafire::group::CayleyGraph;
use pentafire::moves::{apply_all, format_sequence, parse_sequence};
use pentafire::search::SearchLimits;
use pentafire::{Configuration, Engine, Goal, Vertex};

#[derive(Parser)]
#[command(name = "solver")]
#[command(about = "Solve and inspect positions of the pentagon chip-firing game")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Play moves such as `A0 D3` from a configuration key
    Apply {
        #[arg(allow_hyphen_values = true)]
        configuration: Configuration,
        moves: String,
    },
    /// Reduce a configuration to its nice representative
    Canonical {
        #[arg(allow_hyphen_values = true)]
        configuration: Configuration,
        #[arg(long, default_value_t = 0)]
        distinguished: usize,
        /// Print every reduction stage
        #[arg(long)]
        steps: bool,
    },
    /// Breadth-first search for a shortest move sequence
    Search {
        #[arg(allow_hyphen_values = true)]
        start: Configuration,
        /// Target configuration; all zeros if omitted
        #[arg(long, allow_hyphen_values = true)]
        goal: Option<Configuration>,
        /// Stop at any nice representative instead
        #[arg(long, conflicts_with = "goal")]
        nice: bool,
        #[arg(long, default_value_t = 6)]
        depth: usize,
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
    },
    /// Suggest moves towards a goal, from a puzzle bank if the position is in it
    Hint {
        #[arg(allow_hyphen_values = true)]
        current: Configuration,
        #[arg(long, allow_hyphen_values = true)]
        goal: Option<Configuration>,
        /// JSON puzzle bank to consult first
        #[arg(long)]
        bank: Option<String>,
    },
    /// Cayley distance and shortest path of a configuration's class
    Distance {
        #[arg(allow_hyphen_values = true)]
        configuration: Configuration,
    },
    /// Summarize the chip-firing group
    Group,
    /// Summarize a puzzle bank
    Bank {
        path: String,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let engine = Engine::new(AnalyticConfig::default());
    match cmd.action {
        Action::Apply { configuration, moves } => apply(configuration, &moves),
        Action::Canonical { configuration, distinguished, steps } => canonical(&engine, configuration, distinguished, steps),
        Action::Search { start, goal, nice, depth, seconds } => search(&engine, start, goal, nice, depth, seconds),
        Action::Hint { current, goal, bank } => hint(&engine, current, goal, bank),
        Action::Distance { configuration } => distance(&engine, configuration),
        Action::Group => group(),
        Action::Bank { path } => bank(&path),
    }
}

fn apply(configuration: Configuration, moves: &str) -> Result<()> {
    let moves = parse_sequence(moves)?;
    println!("{}", apply_all(&configuration, &moves));
    Ok(())
}

fn canonical(engine: &Engine, configuration: Configuration, distinguished: usize, steps: bool) -> Result<()> {
    let canonicalization = engine.canonicalize(&configuration, Vertex::new(distinguished)?);
    if steps {
        for step in &canonicalization.steps {
            println!("{:<36} {}", step.stage.to_string(), step.after);
        }
    }
    println!("{}", canonicalization.representative);
    Ok(())
}

fn search(engine: &Engine, start: Configuration, goal: Option<Configuration>, nice: bool, depth: usize, seconds: f64) -> Result<()> {
    if seconds.is_nan() || seconds < 0.0 {
        bail!("time budget must be a non-negative number of seconds");
    }
    let goal = match (goal, nice) {
        (_, true) => Goal::NiceRepresentative { distinguished: Vertex::DISTINGUISHED },
        (Some(target), false) => Goal::exact(target),
        (None, false) => Goal::AllZeros,
    };
    let limits = SearchLimits::full_solution()
        .with_max_depth(depth)
        .with_time_budget_secs(seconds);

    let outcome = engine.find_path(&start, &goal, limits);
    tracing::info!(nodes_explored = outcome.nodes_explored, unique_states = outcome.unique_states, stop = ?outcome.stop, "search finished");
    if outcome.found {
        println!("{}", format_sequence(&outcome.moves));
        Ok(())
    } else {
        bail!("no sequence found ({:?} after {} nodes)", outcome.stop, outcome.nodes_explored)
    }
}

fn hint(engine: &Engine, current: Configuration, goal: Option<Configuration>, bank: Option<String>) -> Result<()> {
    let goal = goal.unwrap_or(Configuration::ZERO);

    if let (Some(path), true) = (bank, goal.is_zero()) {
        let bank = load_bank(&path)?;
        if let Some(mv) = bank.hint_for(&current) {
            println!("{mv} (from puzzle bank)");
            return Ok(());
        }
    }

    let outcome = engine.find_path(&current, &Goal::exact(goal), SearchLimits::hint());
    if let Some(mv) = outcome.moves.first() {
        println!("{mv} ({} moves to go)", outcome.moves.len());
        return Ok(());
    }

    match engine.suggest_next_move(&current, &goal) {
        Some(suggestion) => println!("{} (analytic, distance {:.3} afterwards)", suggestion.mv, suggestion.distance_after),
        None => println!("no hint: the analytic solver sees no improving move"),
    }
    Ok(())
}

fn distance(engine: &Engine, configuration: Configuration) -> Result<()> {
    let group = engine.initialize_group();
    let element = group.element_of(&configuration);
    let path = engine.path_from_identity(&element)?;
    println!("element  {element}");
    println!("distance {}", path.len());
    println!("path     {}", format_sequence(&path));
    println!("order    {}", group.order_of(&element)?);
    Ok(())
}

fn group() -> Result<()> {
    let group = CayleyGraph::build();
    println!("elements {}", group.size());
    println!("edges    {}", group.edge_count());
    for (generation, count) in group.generation_sizes().into_iter().enumerate() {
        println!("distance {generation}: {count}");
    }
    Ok(())
}

fn load_bank(path: &str) -> Result<PuzzleBank> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading puzzle bank {path}"))?;
    Ok(PuzzleBank::from_json(&json)?)
}

fn bank(path: &str) -> Result<()> {
    let bank = load_bank(path)?;
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let puzzles = bank.by_difficulty(difficulty).collect::<Vec<_>>();
        let average = puzzles.iter().map(|puzzle| puzzle.solution.len()).sum::<usize>() as f64 / puzzles.len().max(1) as f64;
        println!("{difficulty}: {} puzzles, average solution {average:.1} moves", puzzles.len());
    }
    Ok(())
}
