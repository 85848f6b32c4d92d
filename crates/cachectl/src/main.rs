//! cachectl - read a file through the slot cache and report hit rates

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use blockdev::Whence;
use clap::Parser;
use parking_lot::Mutex;
use slotcache::{SlotCache, DEFAULT_CAPACITY};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read through the cache
    file: PathBuf,

    /// Cache capacity in bytes (multiple of the 512-byte sector size)
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Request size per read in bytes
    #[arg(long, default_value_t = 256)]
    chunk: usize,

    /// Number of sequential passes over the file
    #[arg(short, long, default_value_t = 1)]
    passes: u32,

    /// Print an interim report every N milliseconds
    #[arg(long)]
    stats_interval_ms: Option<u64>,

    /// Zero the counters after the final report
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let cache = SlotCache::open(&args.file, args.capacity)
        .with_context(|| format!("opening {}", args.file.display()))?;

    info!("Cache ready: capacity {} bytes", args.capacity);
    info!("Workload: {} pass(es), {} byte chunks", args.passes, args.chunk);

    // The cache holds no locks of its own; this mutex is the serialization
    // the integration layer owes it.
    let cache = Arc::new(Mutex::new(cache));
    let done = Arc::new(AtomicBool::new(false));

    let reporter = args.stats_interval_ms.map(|interval| {
        let cache = Arc::clone(&cache);
        let done = Arc::clone(&done);

        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(interval));
                print!("{}", cache.lock().report(false));
            }
        })
    });

    let mut buf = vec![0u8; args.chunk];
    let mut total = 0u64;

    for pass in 0..args.passes {
        cache.lock().seek(0, Whence::Absolute)?;

        loop {
            let n = cache.lock().read(&mut buf)?;
            if n == 0 {
                break;
            }
            total += n as u64;
        }

        info!("Pass {} complete", pass + 1);
    }

    done.store(true, Ordering::Relaxed);
    if let Some(handle) = reporter {
        let _ = handle.join();
    }

    info!("Read {} bytes in {} pass(es)", total, args.passes);
    print!("{}", cache.lock().report(args.reset));

    Ok(())
}
