use clap::{ArgAction, Parser};
use holdem_odds::hand::{Board, HoleCards};
use holdem_odds::simulation::{SimulationConfig, SimulationResult, Simulator, DEFAULT_TRIALS};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(
    name = "holdem-odds",
    version,
    about = "Estimate Texas Hold'em win/tie/lose odds by Monte Carlo simulation",
    long_about = "Deal the unseen cards at random many times and report how often your hand \
                  wins, ties or loses.\nCards are written rank then suit, e.g. As Td 7c."
)]
struct Args {
    /// Your two hole cards (e.g. "As" "Kd")
    #[arg(required = true)]
    hole: Vec<String>,

    /// Known community cards, 0 to 5 (e.g. "Kc 7h 2d")
    #[arg(short, long, default_value = "")]
    board: String,

    /// Number of opponents (1 to 8)
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Number of simulated deals
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
    simulations: usize,

    /// Seed for a reproducible run; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Spread trials over all cores
    #[arg(long)]
    parallel: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

fn parse_hand(args: &Args) -> holdem_odds::Result<(HoleCards, Board)> {
    let hole = args.hole.join(" ").parse()?;
    let board = args.board.parse()?;
    Ok((hole, board))
}

fn run(
    args: &Args,
    hole: &HoleCards,
    board: &Board,
    seed: u64,
) -> holdem_odds::Result<SimulationResult> {
    let config = SimulationConfig::default().opponents(args.opponents).trials(args.simulations);
    let sim = Simulator::new(&hole.as_array(), board.as_slice(), config)?;

    let result = if args.parallel {
        run_parallel(&sim, seed)?
    } else {
        sim.run_seeded(seed)?
    };
    Ok(result)
}

#[cfg(feature = "parallel")]
fn run_parallel(
    sim: &Simulator,
    seed: u64,
) -> Result<SimulationResult, holdem_odds::simulation::SimulationError> {
    sim.run_parallel(seed)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    sim: &Simulator,
    seed: u64,
) -> Result<SimulationResult, holdem_odds::simulation::SimulationError> {
    tracing::warn!("built without the `parallel` feature; running sequentially");
    sim.run_seeded(seed)
}

fn print_text(
    hole: &HoleCards,
    board: &Board,
    opponents: usize,
    result: &SimulationResult,
    elapsed: Duration,
) {
    println!("Hole: {hole}  Board: {board}  Opponents: {opponents}");
    println!("Win:  {:>6.2}%", result.win);
    println!("Tie:  {:>6.2}%", result.tie);
    println!("Lose: {:>6.2}%", result.lose);
    println!("{} simulations in {:.1?}", result.simulations, elapsed);
}

fn fail(err: impl std::fmt::Display) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, version = holdem_odds::VERSION, "holdem-odds");

    let (hole, board) = match parse_hand(&args) {
        Ok(parts) => parts,
        Err(e) => return fail(e),
    };

    let start = Instant::now();
    let result = match run(&args, &hole, &board, seed) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };
    let elapsed = start.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "simulation complete");

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(s) => println!("{s}"),
            Err(e) => return fail(e),
        }
    } else {
        print_text(&hole, &board, args.opponents, &result, elapsed);
    }
    ExitCode::SUCCESS
}
