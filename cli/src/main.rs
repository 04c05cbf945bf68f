use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::Parser;
use log::info;

use vcd::{split::split_file, Time};

/// Split a VCD file into two parts at a time.
///
/// Both outputs get the full header (declarations and initial values). The
/// first gets everything up to and including the split time, the second
/// everything after it.
#[derive(Parser, Debug)]
#[command(name = "vcd-split")]
struct Args {
    /// Input VCD file.
    input_vcd: PathBuf,
    /// Split time in picoseconds.
    split_time: u64,
    /// Output VCD file 1 (before split).
    output1: PathBuf,
    /// Output VCD file 2 (after split).
    output2: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let split_time = Time::from(i128::from(args.split_time));

    let stats = split_file(&args.input_vcd, split_time, &args.output1, &args.output2)?;
    info!("{stats:?}");

    print_summary(io::stdout().lock(), split_time, &args.output1, &args.output2)?;
    Ok(())
}

fn print_summary(mut out: impl Write, split_time: Time, output1: &Path, output2: &Path) -> io::Result<()> {
    writeln!(out, "Split VCD at time {split_time} ps")?;
    writeln!(out, "  Created: {} (up to {split_time} ps)", output1.display())?;
    writeln!(out, "  Created: {} (from {split_time} ps onward)", output2.display())?;
    out.flush()
}
