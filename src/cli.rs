use clap::Parser;
use colored::*;

/// peachpow - CPU benchmark miner for the Trigg and Peach proof-of-work cores
#[derive(Parser, Debug)]
#[command(name = "peachpow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Haiku-constrained proof-of-work benchmark miner", long_about = None)]
pub struct Args {
    /// Proof-of-work core (trigg or peach)
    #[arg(short, long, default_value = "peach", value_name = "ALGORITHM")]
    pub algo: String,

    /// Difficulty in leading zero bits of the final hash
    #[arg(short, long, default_value_t = 8, value_name = "BITS")]
    pub diff: u32,

    /// Number of worker threads (default: all cores; peach needs ~1 GiB per worker)
    #[arg(short, long, value_name = "THREADS")]
    pub threads: Option<usize>,

    /// Seed for the haiku word generator (default: from the clock)
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Block number for the synthetic trailer
    #[arg(short, long, default_value_t = 1, value_name = "BNUM")]
    pub bnum: u64,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub fn display_banner() {
    println!(
        "\n{}  {}\n          {}\n",
        "peachpow".bright_magenta().bold(),
        format!("v{} | Trigg + Peach proof of work", env!("CARGO_PKG_VERSION")).bright_white(),
        "a raindrop / on sunrise air-- / drowned".bright_cyan().italic(),
    );
}
