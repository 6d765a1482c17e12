use std::io::Write;
use std::time::Duration;

use derive_more::Display;
use hrsw::Stopwatch;
use human_duration::human_duration;
use thiserror::Error;
use thousands::Separable;

use crate::algorithms::astar;
use crate::algorithms::bfs;
use crate::algorithms::dfs;
use crate::generate;
use crate::maze::Maze;
use crate::maze::MazeError;
use crate::search::SearchReport;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[display("BFS")]
    Bfs,
    #[display("DFS")]
    Dfs,
    #[display("A*")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    pub fn run(self, maze: &Maze, record_trace: bool) -> Result<SearchReport, MazeError> {
        match self {
            Algorithm::Bfs => bfs::search(maze, record_trace),
            Algorithm::Dfs => dfs::search(maze, record_trace),
            Algorithm::AStar => astar::search(maze, record_trace),
        }
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

/// One timed engine invocation.
#[derive(Clone, Debug)]
pub struct RunRecord {
    pub run: usize,
    pub algorithm: Algorithm,
    /// Positions on the path, 0 when no path exists.
    pub path_length: usize,
    pub nodes_expanded: usize,
    pub elapsed: Duration,
    pub status: Status,
}

impl std::fmt::Display for RunRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "run {} {:>3}: path {:>3}, expanded {:>6}, {} ({})",
            self.run,
            self.algorithm,
            self.path_length,
            self.nodes_expanded.separate_with_commas(),
            human_duration(&self.elapsed),
            self.status,
        )
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BatchConfig {
    pub runs: usize,
    pub size: usize,
    pub density: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            size: 10,
            density: 0.2,
        }
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("could not generate a {size}x{size} maze with wall density {density}")]
    MazeGeneration { size: usize, density: f64 },
    #[error("search failed: {e}")]
    Search { e: MazeError },
}

/// Runs every algorithm on `runs` freshly generated mazes.
///
/// Tracing stays off so timings measure the engines, not the renderer.
pub fn run_batch<R: rand::Rng>(
    config: &BatchConfig,
    rng: &mut R,
) -> Result<Vec<RunRecord>, BatchError> {
    let mut records = Vec::with_capacity(config.runs * Algorithm::ALL.len());

    for run in 1..=config.runs {
        let maze = generate::generate(config.size, config.density, rng).ok_or(
            BatchError::MazeGeneration {
                size: config.size,
                density: config.density,
            },
        )?;

        for algorithm in Algorithm::ALL {
            let mut stopwatch = Stopwatch::new_started();
            let report = algorithm
                .run(&maze, false)
                .map_err(|e| BatchError::Search { e })?;
            stopwatch.stop();

            let record = RunRecord {
                run,
                algorithm,
                path_length: report.path_length(),
                nodes_expanded: report.expanded,
                elapsed: stopwatch.elapsed(),
                status: if report.path.is_some() {
                    Status::Pass
                } else {
                    Status::Fail
                },
            };
            log::debug!("{record}");
            records.push(record);
        }
    }

    Ok(records)
}

/// Per-algorithm aggregates over a batch.
///
/// Means are taken over all runs; a failed run contributes a path length
/// of 0, mirroring how the records store it.
#[derive(Clone, Debug)]
pub struct AlgorithmSummary {
    pub algorithm: Algorithm,
    pub runs: usize,
    pub mean_path_length: f64,
    pub mean_nodes_expanded: f64,
    pub mean_elapsed: Duration,
    pub failures: usize,
}

impl std::fmt::Display for AlgorithmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:>3}: mean path {:>6.2}, mean expanded {:>8.2}, mean time {}, fails {}/{}",
            self.algorithm,
            self.mean_path_length,
            self.mean_nodes_expanded,
            human_duration(&self.mean_elapsed),
            self.failures,
            self.runs,
        )
    }
}

pub fn summarize(records: &[RunRecord]) -> Vec<AlgorithmSummary> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let mine: Vec<_> = records
                .iter()
                .filter(|r| r.algorithm == algorithm)
                .collect();
            let n = mine.len().max(1);

            AlgorithmSummary {
                algorithm,
                runs: mine.len(),
                mean_path_length: mine.iter().map(|r| r.path_length).sum::<usize>() as f64
                    / n as f64,
                mean_nodes_expanded: mine.iter().map(|r| r.nodes_expanded).sum::<usize>() as f64
                    / n as f64,
                mean_elapsed: mine.iter().map(|r| r.elapsed).sum::<Duration>() / n as u32,
                failures: mine.iter().filter(|r| r.status == Status::Fail).count(),
            }
        })
        .collect()
}

pub fn write_csv<W: Write>(records: &[RunRecord], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "run,algorithm,path_length,nodes_expanded,elapsed_us,status")?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            r.run,
            r.algorithm,
            r.path_length,
            r.nodes_expanded,
            r.elapsed.as_micros(),
            r.status,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    fn batch() -> Vec<RunRecord> {
        let config = BatchConfig {
            runs: 4,
            size: 8,
            density: 0.2,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        run_batch(&config, &mut rng).unwrap()
    }

    #[test]
    fn batch_produces_one_record_per_run_and_algorithm() {
        let records = batch();
        assert_eq!(records.len(), 4 * 3);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.run, i / 3 + 1);
            assert_eq!(record.algorithm, Algorithm::ALL[i % 3]);
            assert_eq!(record.status == Status::Fail, record.path_length == 0);
        }
    }

    #[test]
    fn summaries_cover_every_algorithm() {
        let records = batch();
        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 3);

        for summary in &summaries {
            assert_eq!(summary.runs, 4);
            assert!(summary.failures <= summary.runs);
            assert!(summary.mean_nodes_expanded >= 1.0);
        }

        // BFS and A* both return shortest paths, so their means agree.
        assert_eq!(summaries[0].mean_path_length, summaries[2].mean_path_length);
        // DFS never beats them.
        assert!(summaries[1].mean_path_length >= summaries[2].mean_path_length);
    }

    #[test]
    fn csv_has_a_header_and_one_line_per_record() {
        let records = batch();
        let mut out = vec![];
        write_csv(&records, &mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("run,algorithm,path_length,nodes_expanded,elapsed_us,status")
        );
        assert_eq!(lines.count(), records.len());
        assert!(csv.contains("BFS") && csv.contains("DFS") && csv.contains("A*"));
    }
}
