use anyhow::Result;
use clap::Parser;
use colored::*;
use sha2::{Digest, Sha256};

mod cli;

use cli::{display_banner, Args};
use peachpow::mining::{self, Algorithm};
use peachpow::trailer::BlockTrailer;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    let filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    display_banner();

    let algo: Algorithm = args.algo.parse()?;
    let threads = args.threads.unwrap_or_else(num_cpus::get);
    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1)
    });

    let bt = synthetic_trailer(args.bnum, args.diff);
    tracing::info!(
        algo = algo.name(),
        diff = args.diff,
        threads,
        seed,
        bnum = args.bnum,
        "benchmark block prepared"
    );

    let solution = mining::mine(&bt, algo, threads, seed)?;

    println!("{}", "block solved!".bright_green().bold());
    println!();
    for line in solution.haiku.lines() {
        println!("    {}", line.trim_end().bright_cyan().italic());
    }
    println!();
    println!("  nonce  {}", hex::encode(solution.nonce).bright_white());
    println!("  hash   {}", hex::encode(solution.hash).bright_white());
    println!(
        "  {} hashes in {:.2?} ({:.0} H/s)",
        solution.stats.hashes,
        solution.stats.elapsed,
        solution.stats.hashrate(),
    );

    Ok(())
}

/// Build a self-contained trailer for benchmarking: previous hash and
/// merkle root are derived from the block number so runs are reproducible.
fn synthetic_trailer(bnum: u64, diff: u32) -> BlockTrailer {
    let mut bt = BlockTrailer::zeroed();
    let phash: [u8; 32] = Sha256::digest(bnum.to_le_bytes()).into();
    let mroot: [u8; 32] = Sha256::digest(phash).into();
    bt.set_phash(&phash);
    bt.set_mroot(&mroot);
    bt.set_bnum(bnum);
    bt.set_difficulty(diff);
    bt
}
