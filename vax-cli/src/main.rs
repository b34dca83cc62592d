//! vax-disasm - list the code segment of a VAX executable image

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vax_disassembler::disassemble_to;
use vax_machine::load_image;
use vax_spec::Config;

/// Disassemble the code segment of a VAX a.out image
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image file to disassemble
    image: PathBuf,

    /// Size of the address space in bytes
    #[arg(long, default_value_t = Config::DEFAULT.memory_size)]
    memory_size: usize,

    /// Print the exec header before the listing
    #[arg(long, default_value_t = false)]
    show_header: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::DEFAULT.with_memory_size(args.memory_size);
    tracing::debug!("{}", config);

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let image = load_image(&bytes, &config)
        .with_context(|| format!("failed to load {}", args.image.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.show_header {
        writeln!(out, "{}", image.header)?;
    }

    let count = disassemble_to(&image.memory, image.code_size(), &mut out)
        .context("disassembly aborted")?;
    out.flush()?;

    tracing::info!("Disassembled {} instructions", count);
    Ok(())
}
