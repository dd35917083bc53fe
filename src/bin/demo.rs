//! Spindle Demo Binary
//!
//! Exercises a squares generator through the three traversal styles the
//! cursor supports: explicit advance, snapshot-advance, and the iterator
//! adapter.

use anyhow::Result;
use clap::Parser;
use spindle::logging::{init_logging, LoggingConfig};
use spindle::{emit, generator};
use tracing::info;

/// Spindle demo - thread-backed lazy generators
#[derive(Parser)]
#[command(name = "spindle-demo")]
#[command(about = "Walks a thread-backed squares generator")]
struct Cli {
    /// Number of squares to produce
    #[arg(long, default_value = "10")]
    count: i64,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    log_format: Option<String>,
}

generator! {
    /// Squares of `0..count`.
    Squares(gen, count: i64) -> i64 {
        for i in 0..count {
            emit!(gen, i * i);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    init_logging(Some(&logging))?;

    info!(count = cli.count, "Spindle demo starting");

    // Explicit advance loop.
    let mut cursor = Squares::begin(cli.count);
    while cursor != Squares::end() {
        println!("{}", cursor.value());
        cursor.advance();
    }

    // Snapshot-advance loop: each round prints the pre-advance value.
    let mut cursor = Squares::begin(cli.count);
    while cursor != Squares::end() {
        let previous = cursor.step();
        println!("{}", previous.value());
    }

    // Iterator adapter.
    let squares: Vec<i64> = Squares::begin(cli.count).into_iter().collect();
    println!("{:?}", squares);

    info!("Spindle demo finished");
    Ok(())
}
