//! Walks a directory tree with a bounded number of reader threads.
//!
//! Workers list directories concurrently; the controller, on the main
//! thread, tallies files and queues every subdirectory it sees.
//!
//! Usage: `cargo run --example tree_walk -- [DIR] [WORKERS]`

use std::fs;
use std::io;
use std::path::PathBuf;
use veda_flow::prelude::*;

struct Listing {
    dirs: Vec<PathBuf>,
    files: u64,
    bytes: u64,
}

fn list(dir: &PathBuf) -> io::Result<Listing> {
    let mut listing = Listing {
        dirs: Vec::new(),
        files: 0,
        bytes: 0,
    };

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            listing.dirs.push(entry.path());
        } else if file_type.is_file() {
            listing.files += 1;
            listing.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }

    Ok(listing)
}

fn main() {
    let mut args = std::env::args().skip(1);
    let root = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let workers = args.next().and_then(|w| w.parse().ok()).unwrap_or(0);

    let mut files = 0u64;
    let mut bytes = 0u64;
    let mut errors = 0u64;

    let stats = run_breadth_first(
        workers,
        list,
        |dir, listing| match listing {
            Ok(listing) => {
                files += listing.files;
                bytes += listing.bytes;
                Verdict::Continue(listing.dirs)
            }
            Err(err) => {
                eprintln!("skipping {}: {}", dir.display(), err);
                errors += 1;
                Verdict::done()
            }
        },
        [root],
    )
    .expect("failed to start worker pool");

    println!("directories: {}", stats.completed);
    println!("files:       {}", files);
    println!("bytes:       {}", bytes);
    println!("errors:      {}", errors);
    println!(
        "workers:     {} (peak in flight {})",
        stats.workers, stats.max_inflight
    );
    println!("elapsed:     {:?}", stats.elapsed);
}
