use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use log::info;

use sweep_crossings::{find_crossings, io::read_segments, LineOrPoint};

/// Find all crossings among line segments read as `x1 y1 x2 y2` lines.
#[derive(Parser)]
struct Cli {
    /// Input file; reads stdin if omitted or `-`.
    input: Option<PathBuf>,

    /// Only print the summary, not the crossings.
    #[arg(long)]
    counts_only: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let segments = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("could not open {}", path.display()))?;
            read_segments(BufReader::new(file))
                .with_context(|| format!("could not read segments from {}", path.display()))?
        }
        _ => read_segments(io::stdin().lock()).context("could not read segments from stdin")?,
    };
    info!("loaded {} segments", segments.len());

    let report = find_crossings(&segments);
    let stats = &report.stats;
    if stats.skipped > 0 {
        println!("Skipped {} degenerate segments", stats.skipped);
    }
    println!(
        "Total events processed: {}, Intersections found: {}",
        stats.events,
        report.count()
    );
    println!(
        "Events by type: {} upper, {} lower, {} intersection",
        stats.upper_events, stats.lower_events, stats.intersection_events
    );

    if !args.counts_only {
        for crossing in report.crossings.iter() {
            let [i, j] = crossing.segments;
            match crossing.geom {
                LineOrPoint::Point(p) => println!("{} {} point {} {}", i, j, p.x(), p.y()),
                LineOrPoint::Line(p, q) => {
                    println!("{} {} overlap {} {} {} {}", i, j, p.x(), p.y(), q.x(), q.y())
                }
            }
        }
    }
    Ok(())
}
