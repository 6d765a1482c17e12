use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze_search::maze::Maze;
use maze_search::runner;
use maze_search::runner::Algorithm;
use maze_search::runner::BatchConfig;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of generated mazes in the batch.
    #[arg(short, long, env = "RUNS", default_value_t = 10)]
    pub runs: usize,

    /// Side length of the generated mazes.
    #[arg(short, long, env = "SIZE", default_value_t = 10)]
    pub size: usize,

    /// Wall probability per cell, between 0 and 1.
    #[arg(short, long, env = "DENSITY", default_value_t = 0.2)]
    pub density: f64,

    /// RNG seed for reproducible batches.
    #[arg(long, env = "SEED", default_value_t = 42)]
    pub seed: u64,

    /// Write the per-run records to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Print the A* exploration frames for the demo maze.
    #[arg(long)]
    pub trace: bool,

    /// Maze text files to solve before the batch.
    #[arg()]
    pub mazes: Vec<PathBuf>,
}

const DEMO_MAZE: &str = indoc! {"
    S....
    .XX..
    ...X.
    .X...
    ....G
"};

fn solve_and_print(maze: &Maze) {
    for algorithm in Algorithm::ALL {
        match algorithm.run(maze, false) {
            Ok(report) => match report.path {
                Some(path) => println!(
                    "{algorithm:>3}: {path} ({} positions, {} expanded)",
                    path.len(),
                    report.expanded
                ),
                None => println!("{algorithm:>3}: no path ({} expanded)", report.expanded),
            },
            Err(e) => println!("{algorithm:>3}: {e}"),
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    for path in &args.mazes {
        let text = std::fs::read_to_string(path)?;
        println!("== {path:?}");
        match Maze::try_from(text.as_str()) {
            Ok(maze) => {
                print!("{maze}");
                solve_and_print(&maze);
            }
            Err(e) => eprintln!("could not parse {path:?}: {e}"),
        }
        println!();
    }

    if args.trace {
        let maze = Maze::try_from(DEMO_MAZE).expect("demo maze is well-formed");
        println!("== Demo maze\n{maze}");
        solve_and_print(&maze);

        let report = Algorithm::AStar
            .run(&maze, true)
            .expect("demo maze has start and goal");
        for (i, frame) in report.frames.iter().enumerate() {
            println!("-- frame {i}\n{frame}");
        }
    }

    let config = BatchConfig {
        runs: args.runs,
        size: args.size,
        density: args.density,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!(
        "== Batch: {} runs on {}x{} mazes, density {}, seed {}",
        config.runs, config.size, config.size, config.density, args.seed
    );
    let records = match runner::run_batch(&config, &mut rng) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("batch aborted: {e}");
            return Ok(());
        }
    };

    for record in &records {
        println!("{record}");
    }
    println!("== Summary");
    for summary in runner::summarize(&records) {
        println!("{summary}");
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        runner::write_csv(&records, &mut out)?;
        println!("Records written to {path:?}");
    }

    Ok(())
}
