use anyhow::Context;
use log::info;
use maze_search::observer::StepLogger;
use maze_search::render::{save_image, FrameRecorder, RenderOptions};
use maze_search::{FrontierPolicy, Maze, MazeSolver};
use std::env;
use std::process::ExitCode;
use std::time::Duration;

const IMAGE_FILE: &str = "maze.png";
const ANIMATION_FILE: &str = "maze_solution.gif";
/// Pause between redrawn steps when tracing in the terminal.
const TRACE_PAUSE: Duration = Duration::from_millis(50);

/// Settings taken from the environment, since the command line only carries the maze file.
#[derive(Clone, Debug)]
struct Config {
    policy: FrontierPolicy,
    animate: bool,
    trace: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(default)
}

impl Config {
    fn from_env() -> anyhow::Result<Config> {
        let policy = match env::var("MAZE_STRATEGY") {
            Ok(s) => s.parse::<FrontierPolicy>().context("invalid MAZE_STRATEGY")?,
            Err(_) => FrontierPolicy::LastInFirstOut,
        };
        Ok(Config {
            policy,
            animate: env_flag("MAZE_ANIMATE", true),
            trace: env_flag("MAZE_TRACE", false),
        })
    }
}

fn run(path: &str) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    info!("Running with {:?}", config);
    let maze = Maze::from_file(path).with_context(|| format!("could not load maze {}", path))?;
    println!("Maze:");
    println!();
    print!("{}", maze);
    println!();
    println!("Solving...");

    let solver = MazeSolver::new(config.policy);
    let mut recorder = if config.animate {
        Some(FrameRecorder::create(ANIMATION_FILE)?)
    } else {
        None
    };
    let mut logger = StepLogger::new(config.trace, config.trace.then_some(TRACE_PAUSE));
    let result = solver.solve_observed(&maze, &mut (&mut logger, &mut recorder))?;

    println!("States Explored: {}", result.states_explored);
    println!("Solution:");
    println!();
    print!("{}", result.overlay(&maze));
    println!();

    save_image(
        IMAGE_FILE,
        &maze,
        Some(&result),
        &RenderOptions::new(true, true),
    )?;
    if let Some(recorder) = recorder {
        let frames = recorder.assemble()?;
        info!("Animation {} has {} frames", ANIMATION_FILE, frames);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: maze_search maze.txt");
        return ExitCode::from(2);
    }
    match run(&args[1]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
