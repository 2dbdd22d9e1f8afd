//! Reads a square grid from stdin and prints its arrival map.
//!
//! Input format: the grid size `n`, followed by `n * n` integers in
//! row-major order. Any non-zero value marks a seed cell. Example:
//!
//! ```text
//! 3
//! 0 0 0
//! 0 1 0
//! 0 0 0
//! ```

use std::io::{Read, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::{info, trace};

use floodwave::{CellStep, Grid, WavePropagation, WaveObserver};

struct TraceObserver;

impl WaveObserver for TraceObserver {
    fn cell_claimed(&mut self, cell: CellStep) {
        trace!("claimed ({}, {}) at step {}", cell.row, cell.col, cell.step);
    }

    fn wave_complete(&mut self, step: std::num::NonZeroU32, frontier_len: usize) {
        trace!("wave {step} complete, {frontier_len} queued");
    }
}

fn read_input() -> Result<(Grid, Vec<(usize, usize)>)> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let mut tokens = input.split_whitespace();
    let n: usize = tokens
        .next()
        .context("missing grid size")?
        .parse()
        .context("grid size is not an integer")?;

    let mut seeds = Vec::new();
    for row in 0..n {
        for col in 0..n {
            let value: i64 = match tokens.next() {
                Some(token) => token
                    .parse()
                    .with_context(|| format!("cell ({row}, {col}) is not an integer"))?,
                None => bail!("grid input ended early at cell ({row}, {col})"),
            };
            if value != 0 {
                seeds.push((row, col));
            }
        }
    }

    Ok((Grid::new(n, n), seeds))
}

fn print_arrivals(grid: &Grid) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            match grid.arrival(row, col) {
                Some(step) => write!(out, "{step:>3}")?,
                None => write!(out, "{:>3}", ".")?,
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let (mut grid, seeds) = read_input()?;
    info!(
        "propagating {} seed(s) over a {}x{} grid",
        seeds.len(),
        grid.rows(),
        grid.cols()
    );

    let started = Instant::now();
    let mut propagation = WavePropagation::new(&mut grid, seeds)?;
    let stats = propagation.run_with(&mut TraceObserver);
    let elapsed = started.elapsed();

    print_arrivals(&grid)?;

    info!(
        "reached {} of {} cells in {} wave(s), max step {}, {:.3} ms",
        stats.cells_reached,
        grid.len(),
        stats.waves,
        stats.max_step,
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(())
}
