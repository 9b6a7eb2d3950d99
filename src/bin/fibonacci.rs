//! Fibonacci sequence generator
//!
//! Prints the first N Fibonacci numbers, computed on a single worker thread.

use anyhow::{Context, Result};
use clap::Parser;
use pipulse::sequence::{fibonacci, MAX_FIBONACCI_TERMS};

/// Print the first N Fibonacci numbers (F(0) = 0, F(1) = 1)
#[derive(Parser, Debug)]
#[command(name = "fibonacci")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of terms to generate (0 to 94)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    count: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let count = usize::try_from(args.count)
        .map_err(|_| anyhow::anyhow!("N must be an integer between 0 and {}", MAX_FIBONACCI_TERMS))?;

    let terms = fibonacci(count).context("failed to generate sequence")?;
    if terms.is_empty() {
        return Ok(());
    }

    let line: Vec<String> = terms.iter().map(u64::to_string).collect();
    println!("{}", line.join(" "));
    Ok(())
}
