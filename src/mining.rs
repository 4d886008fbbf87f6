//! CPU mining driver: worker threads, shutdown flag and hash-rate stats.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};

use crate::peach::Peach;
use crate::trailer::BlockTrailer;
use crate::trigg::{self, HaikuRng, Trigg};

/// How many attempts a worker batches before publishing its counter.
const COUNT_BATCH: u64 = 512;

/// The two proof-of-work cores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Trigg,
    Peach,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Trigg => "trigg",
            Algorithm::Peach => "peach",
        }
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trigg" => Ok(Algorithm::Trigg),
            "peach" => Ok(Algorithm::Peach),
            other => Err(anyhow!("unknown algorithm: {other} (expected trigg or peach)")),
        }
    }
}

/// Aggregate mining statistics.
#[derive(Debug, Clone)]
pub struct MiningStats {
    pub hashes: u64,
    pub elapsed: Duration,
}

impl MiningStats {
    pub fn hashrate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.hashes as f64 / secs
        } else {
            0.0
        }
    }
}

/// A solved block: the winning nonce, its proof-of-work hash, and the
/// haiku it spells.
pub struct Solution {
    pub nonce: [u8; 32],
    pub hash: [u8; 32],
    pub haiku: String,
    pub stats: MiningStats,
}

/// Mine the trailer until some worker finds a nonce that meets the
/// difficulty. Each worker owns an independent context (and, for Peach,
/// its own tile map) plus a distinctly seeded word generator, so the
/// loop runs without shared mutable state.
pub fn mine(bt: &BlockTrailer, algo: Algorithm, workers: usize, seed: u32) -> Result<Solution> {
    if workers == 0 {
        return Err(anyhow!("at least one worker is required"));
    }

    let shutdown = AtomicBool::new(false);
    let hashes = AtomicU64::new(0);
    let alive = AtomicUsize::new(workers);
    let found: Mutex<Option<[u8; 32]>> = Mutex::new(None);
    let start = Instant::now();

    tracing::info!(algo = algo.name(), workers, "mining started");

    std::thread::scope(|scope| {
        for worker in 0..workers {
            let rng = HaikuRng::new(seed ^ (worker as u32).wrapping_mul(0x9E37_79B9));
            let shutdown = &shutdown;
            let hashes = &hashes;
            let alive = &alive;
            let found = &found;
            scope.spawn(move || {
                let outcome = match algo {
                    Algorithm::Trigg => run_trigg(bt, rng, shutdown, hashes),
                    Algorithm::Peach => run_peach(bt, rng, shutdown, hashes),
                };
                match outcome {
                    Ok(Some(nonce)) => {
                        let mut slot = found.lock().unwrap_or_else(|p| p.into_inner());
                        if slot.is_none() {
                            *slot = Some(nonce);
                        }
                        shutdown.store(true, Ordering::SeqCst);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(worker, error = %e, "worker stopped");
                    }
                }
                alive.fetch_sub(1, Ordering::SeqCst);
            });
        }

        // Report progress from the scope's own thread until a solution
        // lands or every worker has bailed out.
        let mut last_report = Instant::now();
        while !shutdown.load(Ordering::SeqCst) && alive.load(Ordering::SeqCst) > 0 {
            std::thread::sleep(Duration::from_millis(200));
            if last_report.elapsed() >= Duration::from_secs(5) {
                let total = hashes.load(Ordering::Relaxed);
                let rate = total as f64 / start.elapsed().as_secs_f64();
                tracing::info!("{total} hashes, {rate:.0} H/s");
                last_report = Instant::now();
            }
        }
    });

    let elapsed = start.elapsed();
    let nonce = found
        .into_inner()
        .unwrap_or_else(|p| p.into_inner())
        .ok_or_else(|| anyhow!("no worker produced a solution"))?;

    let mut solved = bt.clone();
    solved.set_nonce(&nonce);
    let hash = match algo {
        Algorithm::Trigg => Trigg::pow_hash(&solved),
        Algorithm::Peach => Peach::pow_hash(&solved),
    }
    .ok_or_else(|| anyhow!("solved nonce failed the syntax check"))?;

    Ok(Solution {
        nonce,
        hash,
        haiku: trigg::haiku_text(&nonce),
        stats: MiningStats {
            hashes: hashes.load(Ordering::SeqCst),
            elapsed,
        },
    })
}

fn run_trigg(
    bt: &BlockTrailer,
    rng: HaikuRng,
    shutdown: &AtomicBool,
    hashes: &AtomicU64,
) -> Result<Option<[u8; 32]>> {
    let mut ctx = Trigg::solve(bt, rng);
    let mut local = 0u64;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            hashes.fetch_add(local, Ordering::Relaxed);
            return Ok(None);
        }
        if let Some(nonce) = ctx.generate() {
            hashes.fetch_add(local + 1, Ordering::Relaxed);
            return Ok(Some(nonce));
        }
        local += 1;
        if local == COUNT_BATCH {
            hashes.fetch_add(local, Ordering::Relaxed);
            local = 0;
        }
    }
}

fn run_peach(
    bt: &BlockTrailer,
    rng: HaikuRng,
    shutdown: &AtomicBool,
    hashes: &AtomicU64,
) -> Result<Option<[u8; 32]>> {
    let mut ctx = Peach::solve(bt, rng)?;
    let mut local = 0u64;
    loop {
        if shutdown.load(Ordering::Relaxed) {
            hashes.fetch_add(local, Ordering::Relaxed);
            return Ok(None);
        }
        if let Some(nonce) = ctx.generate() {
            hashes.fetch_add(local + 1, Ordering::Relaxed);
            return Ok(Some(nonce));
        }
        local += 1;
        if local == COUNT_BATCH {
            hashes.fetch_add(local, Ordering::Relaxed);
            local = 0;
        }
    }
}
